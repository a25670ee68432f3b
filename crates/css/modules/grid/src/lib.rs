//! CSS Grid Layout Module Level 2
//! Spec: <https://www.w3.org/TR/css-grid-2/>
//!
//! This module implements CSS Grid layout, a two-dimensional layout system
//! that lets you lay out content in rows and columns. It covers the track
//! sizing algorithm, line-based and automatic item placement, named lines
//! and areas, and subgrids that reuse their parent's tracks.

// Grid container and item types
mod types;
pub use types::{
    AvailableSpace, ContentDistribution, Edges, GridAlignment, GridAutoFlow, GridAxis, GridTrack,
    GridTrackSize, LengthPercentage, TrackBreadth, TrackListType,
};

// Track lists, line names and named areas
mod track_list;
pub use track_list::{
    GridTemplate, GridTemplateArea, GridTemplateAreas, LineNameMap, RepeatCount, TrackList,
    TrackListEntry, TrackRepeat, TrackTemplate, implicit_track_size, parse_template_areas,
    parse_track_sizes, parse_track_template,
};

// Grid placement algorithm
mod placement;
pub use placement::{
    CellOccupancy, GridArea, GridLine, GridPlacement, ImplicitTrackCounts, PlacementOptions,
    PlacementResult, parse_grid_area, parse_grid_line, parse_line_pair, place_grid_items,
};

// Intrinsic contributions and content measurement
mod intrinsic;
pub use intrinsic::{
    ContentSizes, FixedContentSizes, ItemBox, ItemContribution, MeasureContent, MeasureRequest,
    TrackContribution, collect_track_contributions, measure_item_contribution,
    resolve_intrinsic_track_sizes,
};

// Track sizing algorithm
mod track_sizing;
pub use track_sizing::{
    ResolvedTrack, ResolvedTrackSizes, TrackSizingParams, distribute_extra_space, find_fr_size,
    resolve_track_sizes,
};

// Subgrids
mod subgrid;
pub use subgrid::{InheritedTracks, SubgridBinding, frame_contribution, lift_contribution, merge_line_names};

// Grid layout algorithm
mod layout;
pub use layout::{
    GridContainerInputs, GridContainerStyle, GridItem, GridItemStyle, GridLayoutResult,
    GridPlacedItem, GridPlan, axis_contributions, layout_grid, plan_grid,
};

// Layout trees with nested grids
mod tree;
pub use tree::{
    AvailableSize, ContainerGeometry, GridTree, LayoutRect, NodeId, TreeLayout, layout_tree,
};
