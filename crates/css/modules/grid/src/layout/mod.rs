//! Grid layout algorithm for a single container.
//!
//! Spec: §12 Grid Sizing
//! <https://www.w3.org/TR/css-grid-2/#layout-algorithm>

mod style;

use crate::intrinsic::{
    ItemContribution, MeasureContent, MeasureRequest, measure_item_contribution,
};
use crate::placement::{
    GridArea, ImplicitTrackCounts, PlacementOptions, PlacementResult, place_grid_items,
};
use crate::subgrid::{InheritedTracks, SubgridBinding, lift_contribution};
use crate::track_list::{GridTemplate, GridTemplateAreas, LineNameMap, TrackList};
use crate::track_sizing::{ResolvedTrackSizes, TrackSizingParams, resolve_track_sizes};
use crate::types::{AvailableSpace, GridAlignment, GridAxis, GridTrack};

pub use style::{GridContainerStyle, GridItemStyle};

/// A child of a grid container with its computed item style.
#[derive(Debug, Clone, PartialEq)]
pub struct GridItem<NodeId = usize> {
    /// Node identifier (generic to support different node ID types)
    pub node_id: NodeId,
    /// Placement, box and alignment properties
    pub style: GridItemStyle,
}

impl<NodeId> GridItem<NodeId> {
    /// Create an auto-placed item with the initial item style.
    pub fn new(node_id: NodeId) -> Self {
        Self {
            node_id,
            style: GridItemStyle::default(),
        }
    }

    /// Replace the item style.
    #[must_use]
    pub fn with_style(mut self, style: GridItemStyle) -> Self {
        self.style = style;
        self
    }
}

/// Input parameters for grid layout.
#[derive(Debug, Clone)]
pub struct GridContainerInputs<'style> {
    /// Computed container style
    pub style: &'style GridContainerStyle,
    /// Content-box width constraint
    pub available_width: AvailableSpace,
    /// Content-box height constraint
    pub available_height: AvailableSpace,
    /// Columns taken over from the parent when columns are subgridded
    pub inherited_columns: Option<InheritedTracks>,
    /// Rows taken over from the parent when rows are subgridded
    pub inherited_rows: Option<InheritedTracks>,
}

impl<'style> GridContainerInputs<'style> {
    /// Inputs for a container that is not a subgrid.
    pub fn new(
        style: &'style GridContainerStyle,
        available_width: AvailableSpace,
        available_height: AvailableSpace,
    ) -> Self {
        Self {
            style,
            available_width,
            available_height,
            inherited_columns: None,
            inherited_rows: None,
        }
    }

    /// Attach the tracks inherited on one axis.
    #[must_use]
    pub fn with_inherited(mut self, axis: GridAxis, tracks: InheritedTracks) -> Self {
        match axis {
            GridAxis::Column => self.inherited_columns = Some(tracks),
            GridAxis::Row => self.inherited_rows = Some(tracks),
        }
        self
    }

    /// Constraint along an axis.
    pub fn available(&self, axis: GridAxis) -> AvailableSpace {
        match axis {
            GridAxis::Column => self.available_width,
            GridAxis::Row => self.available_height,
        }
    }

    /// Inherited tracks, if the axis is subgridded and bound to a parent.
    pub fn subgrid_tracks(&self, axis: GridAxis) -> Option<&InheritedTracks> {
        if !self.style.template(axis).is_subgrid() {
            return None;
        }
        match axis {
            GridAxis::Column => self.inherited_columns.as_ref(),
            GridAxis::Row => self.inherited_rows.as_ref(),
        }
    }

    /// Used gap along an axis; subgrids keep their parent's gap.
    pub fn gap(&self, axis: GridAxis) -> f32 {
        self.subgrid_tracks(axis).map_or_else(
            || {
                self.style
                    .gap(axis)
                    .resolve_or_zero(self.available(axis).definite())
            },
            |inherited| inherited.sizes.gap,
        )
    }
}

/// Explicit track lists and item placement of one container.
#[derive(Debug, Clone, PartialEq)]
pub struct GridPlan {
    /// Explicit columns with their line names
    pub columns: TrackList,
    /// Explicit rows with their line names
    pub rows: TrackList,
    /// Item areas and implicit track counts
    pub placement: PlacementResult,
    /// All columns, implicit ones included
    pub column_tracks: Vec<GridTrack>,
    /// All rows, implicit ones included
    pub row_tracks: Vec<GridTrack>,
}

impl GridPlan {
    /// All tracks of an axis.
    pub fn tracks(&self, axis: GridAxis) -> &[GridTrack] {
        match axis {
            GridAxis::Column => &self.column_tracks,
            GridAxis::Row => &self.row_tracks,
        }
    }

    /// Line names numbered over the full grid, leading implicit lines included.
    pub fn line_names(&self, axis: GridAxis) -> LineNameMap {
        let explicit = match axis {
            GridAxis::Column => &self.columns,
            GridAxis::Row => &self.rows,
        };
        explicit
            .line_names
            .shifted(self.placement.counts(axis).leading)
    }
}

/// Resolve the explicit grid and place the items.
///
/// Spec: §7 Defining the Grid, §8.5 Grid Item Placement Algorithm
pub fn plan_grid<NodeId>(items: &[GridItem<NodeId>], inputs: &GridContainerInputs<'_>) -> GridPlan {
    let areas = inputs.style.areas();
    let columns = explicit_track_list(inputs, GridAxis::Column, areas.as_ref());
    let rows = explicit_track_list(inputs, GridAxis::Row, areas.as_ref());

    let placements: Vec<_> = items.iter().map(|item| item.style.placement.clone()).collect();
    let options = PlacementOptions {
        auto_flow: inputs.style.auto_flow,
        fixed_columns: inputs.subgrid_tracks(GridAxis::Column).is_some(),
        fixed_rows: inputs.subgrid_tracks(GridAxis::Row).is_some(),
    };
    let placement = place_grid_items(&placements, &columns, &rows, options);

    let full_tracks = |list: &TrackList, counts: ImplicitTrackCounts, axis: GridAxis| {
        list.grid_tracks(
            counts.leading,
            counts.trailing,
            inputs.style.auto_tracks(axis),
        )
    };
    let column_tracks = full_tracks(&columns, placement.columns, GridAxis::Column);
    let row_tracks = full_tracks(&rows, placement.rows, GridAxis::Row);

    GridPlan {
        columns,
        rows,
        placement,
        column_tracks,
        row_tracks,
    }
}

/// Explicit track list of one axis.
///
/// A subgridded axis without a parent to bind to behaves as `none`.
fn explicit_track_list(
    inputs: &GridContainerInputs<'_>,
    axis: GridAxis,
    areas: Option<&GridTemplateAreas>,
) -> TrackList {
    if let Some(inherited) = inputs.subgrid_tracks(axis) {
        let mut list = inherited.track_list();
        if let Some(areas) = areas {
            list.add_area_lines(areas, axis);
        }
        return list;
    }

    let mut list = match inputs.style.template(axis) {
        GridTemplate::Tracks(template) => {
            TrackList::from_template(template, inputs.available(axis).definite(), inputs.gap(axis))
        }
        GridTemplate::Subgrid(_) => {
            tracing::debug!("subgrid on {axis:?} is not bound to a parent, using none");
            TrackList::default()
        }
        GridTemplate::None => TrackList::default(),
    };
    if let Some(areas) = areas {
        list.ensure_track_count(areas.track_count(axis));
        list.add_area_lines(areas, axis);
    }
    list
}

/// Contributions of all items along one axis, in full-grid track numbers.
///
/// Subgrid items contribute their descendants instead of themselves.
pub fn axis_contributions<NodeId, M: MeasureContent<NodeId>>(
    items: &[GridItem<NodeId>],
    areas: &[GridArea],
    axis: GridAxis,
    known_cross_sizes: &[Option<f32>],
    measurer: &mut M,
) -> Vec<ItemContribution> {
    let mut contributions = Vec::with_capacity(items.len());
    for (index, (item, area)) in items.iter().zip(areas).enumerate() {
        let tracks = area.tracks(axis);
        let known_cross_size = known_cross_sizes.get(index).copied().flatten();
        if measurer.is_subgrid(&item.node_id, axis) {
            let span = tracks.len();
            let margins = item.style.margin.axis(axis);
            for inner in
                measurer.subgrid_contributions(&item.node_id, axis, span, known_cross_size)
            {
                let lifted = lift_contribution(&inner, span, margins);
                contributions.push(ItemContribution {
                    tracks: lifted.tracks.start + tracks.start..lifted.tracks.end + tracks.start,
                    ..lifted
                });
            }
            continue;
        }
        contributions.push(measure_item_contribution(
            measurer,
            &item.node_id,
            item.style.item_box(axis),
            tracks,
            axis,
            known_cross_size,
        ));
    }
    contributions
}

/// A grid item with its final position and size.
#[derive(Debug, Clone, PartialEq)]
pub struct GridPlacedItem<NodeId = usize> {
    /// Node identifier (generic to support different node ID types)
    pub node_id: NodeId,
    /// Final x position (border-box, relative to the content box)
    pub x: f32,
    /// Final y position (border-box, relative to the content box)
    pub y: f32,
    /// Final width (border-box)
    pub width: f32,
    /// Final height (border-box)
    pub height: f32,
    /// Grid area occupied
    pub area: GridArea,
}

/// Result of grid layout computation.
#[derive(Debug, Clone, PartialEq)]
pub struct GridLayoutResult<NodeId = usize> {
    /// Placed items in source order
    pub items: Vec<GridPlacedItem<NodeId>>,
    /// Resolved column sizes and offsets
    pub col_sizes: ResolvedTrackSizes,
    /// Resolved row sizes and offsets
    pub row_sizes: ResolvedTrackSizes,
    /// Column line names over the full grid
    pub column_names: LineNameMap,
    /// Row line names over the full grid
    pub row_names: LineNameMap,
    /// Implicit and explicit column counts
    pub column_counts: ImplicitTrackCounts,
    /// Implicit and explicit row counts
    pub row_counts: ImplicitTrackCounts,
    /// Content-box width
    pub content_width: f32,
    /// Content-box height
    pub content_height: f32,
}

impl<NodeId> GridLayoutResult<NodeId> {
    /// Resolved tracks of an axis.
    pub fn tracks(&self, axis: GridAxis) -> &ResolvedTrackSizes {
        match axis {
            GridAxis::Column => &self.col_sizes,
            GridAxis::Row => &self.row_sizes,
        }
    }

    /// Line names of an axis.
    pub fn line_names(&self, axis: GridAxis) -> &LineNameMap {
        match axis {
            GridAxis::Column => &self.column_names,
            GridAxis::Row => &self.row_names,
        }
    }
}

/// Run the grid layout algorithm.
///
/// Spec: §12.1 Grid Sizing Algorithm
/// <https://www.w3.org/TR/css-grid-2/#layout-algorithm>
///
/// 1. Resolves the explicit grid and places items
/// 2. Sizes the columns (or takes them from the parent for a subgrid)
/// 3. Sizes the rows with the item widths known
/// 4. Positions items within their grid areas and aligns them
pub fn layout_grid<NodeId: Clone, M: MeasureContent<NodeId>>(
    items: &[GridItem<NodeId>],
    inputs: &GridContainerInputs<'_>,
    measurer: &mut M,
) -> GridLayoutResult<NodeId> {
    let plan = plan_grid(items, inputs);
    let areas = &plan.placement.areas;

    tracing::debug!(
        "layout_grid: items={}, columns={}, rows={}",
        items.len(),
        plan.column_tracks.len(),
        plan.row_tracks.len()
    );

    let (col_sizes, columns) = size_columns(items, &plan, inputs, measurer);
    let column_names = plan.line_names(GridAxis::Column);
    bind_subgrid_items(items, areas, GridAxis::Column, &col_sizes, &column_names, measurer);

    let widths: Vec<Option<f32>> = columns.iter().map(|(_, width)| Some(*width)).collect();
    let row_sizes = size_axis(items, &plan, inputs, GridAxis::Row, &widths, measurer);
    let row_names = plan.line_names(GridAxis::Row);
    bind_subgrid_items(items, areas, GridAxis::Row, &row_sizes, &row_names, measurer);

    let mut rows: Vec<(f32, f32)> = items
        .iter()
        .zip(areas)
        .zip(&columns)
        .map(|((item, area), (_, width))| {
            let area_span = row_sizes.span(area.tracks(GridAxis::Row));
            align_item(measurer, item, GridAxis::Row, area_span, inputs, Some(*width))
        })
        .collect();
    align_baselines(
        items,
        &BaselineContext {
            areas,
            columns: &columns,
            row_sizes: &row_sizes,
            inputs,
        },
        &mut rows,
        measurer,
    );

    let placed = items
        .iter()
        .zip(areas)
        .zip(columns.into_iter().zip(rows))
        .map(|((item, area), ((x, width), (y, height)))| GridPlacedItem {
            node_id: item.node_id.clone(),
            x,
            y,
            width,
            height,
            area: *area,
        })
        .collect();

    GridLayoutResult {
        items: placed,
        content_width: col_sizes.content_size,
        content_height: row_sizes.content_size,
        column_names,
        row_names,
        column_counts: plan.placement.columns,
        row_counts: plan.placement.rows,
        col_sizes,
        row_sizes,
    }
}

/// Column tracks of a planned grid and the `(x, width)` of every item.
pub fn size_columns<NodeId, M: MeasureContent<NodeId>>(
    items: &[GridItem<NodeId>],
    plan: &GridPlan,
    inputs: &GridContainerInputs<'_>,
    measurer: &mut M,
) -> (ResolvedTrackSizes, Vec<(f32, f32)>) {
    let col_sizes = size_axis(items, plan, inputs, GridAxis::Column, &[], measurer);
    let columns = items
        .iter()
        .zip(&plan.placement.areas)
        .map(|(item, area)| {
            let area_span = col_sizes.span(area.tracks(GridAxis::Column));
            align_item(measurer, item, GridAxis::Column, area_span, inputs, None)
        })
        .collect();
    (col_sizes, columns)
}

/// Track sizes of one axis: inherited for a subgrid, resolved otherwise.
fn size_axis<NodeId, M: MeasureContent<NodeId>>(
    items: &[GridItem<NodeId>],
    plan: &GridPlan,
    inputs: &GridContainerInputs<'_>,
    axis: GridAxis,
    known_cross_sizes: &[Option<f32>],
    measurer: &mut M,
) -> ResolvedTrackSizes {
    if let Some(inherited) = inputs.subgrid_tracks(axis) {
        return inherited.sizes.clone();
    }
    let contributions = axis_contributions(
        items,
        &plan.placement.areas,
        axis,
        known_cross_sizes,
        measurer,
    );
    resolve_track_sizes(&TrackSizingParams {
        tracks: plan.tracks(axis),
        gap: inputs.gap(axis),
        available: inputs.available(axis),
        contributions: &contributions,
        distribution: inputs.style.content_distribution(axis),
    })
}

/// Tell subgrid items which sized tracks their area covers.
fn bind_subgrid_items<NodeId, M: MeasureContent<NodeId>>(
    items: &[GridItem<NodeId>],
    areas: &[GridArea],
    axis: GridAxis,
    tracks: &ResolvedTrackSizes,
    line_names: &LineNameMap,
    measurer: &mut M,
) {
    for (item, area) in items.iter().zip(areas) {
        if measurer.is_subgrid(&item.node_id, axis) {
            let binding =
                SubgridBinding::new(tracks, line_names, area.tracks(axis), axis, (0.0, 0.0));
            measurer.bind_subgrid(&item.node_id, binding);
        }
    }
}

/// Used self alignment of an item along an axis.
fn used_alignment<NodeId, M: MeasureContent<NodeId>>(
    measurer: &M,
    item: &GridItem<NodeId>,
    axis: GridAxis,
    inputs: &GridContainerInputs<'_>,
) -> GridAlignment {
    if measurer.is_subgrid(&item.node_id, axis) {
        return GridAlignment::Stretch;
    }
    item.style
        .self_alignment(axis)
        .unwrap_or_else(|| inputs.style.item_alignment(axis))
}

/// Offset and border-box size of an item along one axis of its grid area.
///
/// Spec: §11 Alignment and Spacing
/// <https://www.w3.org/TR/css-grid-2/#alignment>
///
/// Stretched items fill the area minus margins unless they have an explicit
/// size; the others take their fit-content size. Baseline items start at
/// their fallback position until [`align_baselines`] moves them.
fn align_item<NodeId, M: MeasureContent<NodeId>>(
    measurer: &mut M,
    item: &GridItem<NodeId>,
    axis: GridAxis,
    (area_start, area_size): (f32, f32),
    inputs: &GridContainerInputs<'_>,
    known_cross_size: Option<f32>,
) -> (f32, f32) {
    let (margin_start, margin_end) = item.style.margin.axis(axis);
    let room = (area_size - margin_start - margin_end).max(0.0);
    let alignment = used_alignment(measurer, item, axis, inputs);

    let preferred = item.style.size(axis).unwrap_or_else(|| {
        if alignment == GridAlignment::Stretch {
            return room;
        }
        measurer.measure(
            &item.node_id,
            MeasureRequest {
                axis,
                available: AvailableSpace::Definite(room),
                known_cross_size,
            },
        )
    });
    let size = item.style.clamp_size(axis, preferred);

    let offset = match alignment {
        GridAlignment::Start | GridAlignment::Stretch | GridAlignment::Baseline => margin_start,
        GridAlignment::End | GridAlignment::LastBaseline => area_size - margin_end - size,
        GridAlignment::Center => margin_start + (room - size) / 2.0,
    };
    (area_start + offset, size)
}

/// Inputs shared by the baseline pass.
struct BaselineContext<'layout> {
    areas: &'layout [GridArea],
    columns: &'layout [(f32, f32)],
    row_sizes: &'layout ResolvedTrackSizes,
    inputs: &'layout GridContainerInputs<'layout>,
}

/// One item of a baseline-sharing group.
#[derive(Debug, Clone, Copy)]
struct BaselineMember {
    index: usize,
    alignment: GridAlignment,
    /// Start line for first baselines, end line for last baselines
    row_line: usize,
    /// Baseline from the item's top border edge
    baseline: f32,
    /// Distance from the shared row edge to the baseline, margins included
    extent: f32,
}

/// Move baseline-aligned items so the items of a row share a baseline.
///
/// First baselines are shared by items starting in the same row, last
/// baselines by items ending in the same row. Only the block axis has
/// baselines; inline-axis `baseline` keeps its start fallback.
///
/// Spec: §11.6 Baseline Alignment
fn align_baselines<NodeId, M: MeasureContent<NodeId>>(
    items: &[GridItem<NodeId>],
    context: &BaselineContext<'_>,
    rows: &mut [(f32, f32)],
    measurer: &mut M,
) {
    let mut members: Vec<BaselineMember> = Vec::new();
    for (index, item) in items.iter().enumerate() {
        let alignment = used_alignment(measurer, item, GridAxis::Row, context.inputs);
        let (Some(area), Some((_, width)), Some((_, height))) = (
            context.areas.get(index),
            context.columns.get(index),
            rows.get(index),
        ) else {
            continue;
        };
        let (margin_start, margin_end) = item.style.margin.axis(GridAxis::Row);
        let member = match alignment {
            GridAlignment::Baseline => {
                let baseline = measurer.first_baseline(&item.node_id, *width, *height);
                BaselineMember {
                    index,
                    alignment,
                    row_line: area.row_start,
                    baseline,
                    extent: margin_start + baseline,
                }
            }
            GridAlignment::LastBaseline => {
                let baseline = measurer.last_baseline(&item.node_id, *width, *height);
                BaselineMember {
                    index,
                    alignment,
                    row_line: area.row_end,
                    baseline,
                    extent: *height - baseline + margin_end,
                }
            }
            GridAlignment::Start
            | GridAlignment::End
            | GridAlignment::Center
            | GridAlignment::Stretch => continue,
        };
        members.push(member);
    }

    for member in &members {
        let shared = members
            .iter()
            .filter(|other| other.alignment == member.alignment && other.row_line == member.row_line)
            .map(|other| other.extent)
            .fold(0.0, f32::max);
        let Some(area) = context.areas.get(member.index) else {
            continue;
        };
        let (area_start, area_size) = context.row_sizes.span(area.tracks(GridAxis::Row));
        let Some((y, _)) = rows.get_mut(member.index) else {
            continue;
        };
        *y = if member.alignment == GridAlignment::LastBaseline {
            area_start + area_size - shared - member.baseline
        } else {
            area_start + shared - member.baseline
        };
    }

    if !members.is_empty() {
        tracing::trace!("aligned {} items to shared baselines", members.len());
    }
}
