//! Intrinsic contributions of grid items and their resolution into tracks.
//!
//! Spec: §12.5 Resolve Intrinsic Track Sizes
//! <https://www.w3.org/TR/css-grid-2/#algo-content>

use std::collections::HashMap;
use std::hash::Hash;
use std::ops::Range;

use crate::subgrid::SubgridBinding;
use crate::track_sizing::{ResolvedTrack, distribute_extra_space, max_breadth, min_breadth};
use crate::types::{AvailableSpace, GridAxis, GridTrack, TrackBreadth};

/// A measurement question asked of the content layout.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeasureRequest {
    /// Axis to measure along
    pub axis: GridAxis,
    /// Sizing constraint along that axis
    pub available: AvailableSpace,
    /// Definite size on the other axis, if already known
    pub known_cross_size: Option<f32>,
}

/// External content measurement (text shaping or nested layout).
///
/// Returns the content-box size of the item's content along `request.axis`.
pub trait MeasureContent<NodeId> {
    /// Measure one item.
    fn measure(&mut self, node: &NodeId, request: MeasureRequest) -> f32;

    /// Check whether an item is a subgrid along `axis`.
    ///
    /// Subgrid items contribute through [`Self::subgrid_contributions`] and
    /// always fill their grid area on that axis.
    fn is_subgrid(&self, node: &NodeId, axis: GridAxis) -> bool {
        let _ = (node, axis);
        false
    }

    /// Contributions of a subgrid item's descendants along a subgridded axis.
    ///
    /// Track ranges are relative to the item's own area of `span` tracks and
    /// already include the subgrid's padding and border. `known_cross_size`
    /// is the item's border-box size on the other axis, when already sized.
    fn subgrid_contributions(
        &mut self,
        node: &NodeId,
        axis: GridAxis,
        span: usize,
        known_cross_size: Option<f32>,
    ) -> Vec<ItemContribution> {
        let _ = (node, axis, span, known_cross_size);
        Vec::new()
    }

    /// Hand a subgrid item the sized parent tracks of its area.
    ///
    /// Called once per subgridded axis after the parent sized that axis, so
    /// later measurements of the item can use the inherited tracks. The
    /// binding's insets are zero; the implementor knows the item's own
    /// padding and border.
    fn bind_subgrid(&mut self, node: &NodeId, binding: SubgridBinding<'_>) {
        let _ = (node, binding);
    }

    /// First baseline of an item laid out at `width` by `height`, from its
    /// top border edge. Items without one synthesize it from the bottom edge.
    fn first_baseline(&mut self, node: &NodeId, width: f32, height: f32) -> f32 {
        let _ = (node, width);
        height
    }

    /// Last baseline of an item laid out at `width` by `height`, from its
    /// top border edge.
    fn last_baseline(&mut self, node: &NodeId, width: f32, height: f32) -> f32 {
        let _ = (node, width);
        height
    }
}

/// Min- and max-content sizes along one axis.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ContentSizes {
    /// min-content size
    pub min_content: f32,
    /// max-content size
    pub max_content: f32,
}

impl ContentSizes {
    /// Sizes with the same min- and max-content value.
    pub fn fixed(size: f32) -> Self {
        Self {
            min_content: size,
            max_content: size,
        }
    }

    /// Size under a given constraint: definite space behaves like fit-content.
    pub fn under(&self, available: AvailableSpace) -> f32 {
        match available {
            AvailableSpace::MinContent => self.min_content,
            AvailableSpace::MaxContent => self.max_content,
            AvailableSpace::Definite(space) => self.max_content.min(space).max(self.min_content),
        }
    }
}

/// Measurer backed by a table of precomputed content sizes.
///
/// Unknown nodes measure as zero.
#[derive(Debug, Clone)]
pub struct FixedContentSizes<NodeId> {
    sizes: HashMap<NodeId, (ContentSizes, ContentSizes)>,
    /// `(first, last)` baselines from the top border edge
    baselines: HashMap<NodeId, (f32, f32)>,
}

impl<NodeId> Default for FixedContentSizes<NodeId> {
    fn default() -> Self {
        Self {
            sizes: HashMap::new(),
            baselines: HashMap::new(),
        }
    }
}

impl<NodeId: Eq + Hash> FixedContentSizes<NodeId> {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `(width, height)` content sizes for a node.
    pub fn insert(&mut self, node: NodeId, width: ContentSizes, height: ContentSizes) {
        self.sizes.insert(node, (width, height));
    }

    /// Builder form of [`FixedContentSizes::insert`].
    #[must_use]
    pub fn with(mut self, node: NodeId, width: ContentSizes, height: ContentSizes) -> Self {
        self.insert(node, width, height);
        self
    }

    /// Record fixed first and last baselines for a node.
    #[must_use]
    pub fn with_baselines(mut self, node: NodeId, first: f32, last: f32) -> Self {
        self.baselines.insert(node, (first, last));
        self
    }
}

impl<NodeId: Eq + Hash> MeasureContent<NodeId> for FixedContentSizes<NodeId> {
    fn measure(&mut self, node: &NodeId, request: MeasureRequest) -> f32 {
        self.sizes.get(node).map_or(0.0, |(width, height)| {
            let sizes = match request.axis {
                GridAxis::Column => width,
                GridAxis::Row => height,
            };
            sizes.under(request.available)
        })
    }

    fn first_baseline(&mut self, node: &NodeId, _: f32, height: f32) -> f32 {
        self.baselines.get(node).map_or(height, |(first, _)| *first)
    }

    fn last_baseline(&mut self, node: &NodeId, _: f32, height: f32) -> f32 {
        self.baselines.get(node).map_or(height, |(_, last)| *last)
    }
}

/// Box properties of an item along one axis.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ItemBox {
    /// Definite preferred size (`width`/`height`)
    pub size: Option<f32>,
    /// Definite minimum size (`min-width`/`min-height`)
    pub min_size: Option<f32>,
    /// Definite maximum size (`max-width`/`max-height`)
    pub max_size: Option<f32>,
    /// `(start, end)` margins
    pub margin: (f32, f32),
}

/// Margin-box contributions of one item along one axis.
///
/// Spec: §6.6 Automatic Minimum Size of Grid Items
#[derive(Debug, Clone, PartialEq)]
pub struct ItemContribution {
    /// 0-based tracks spanned by the item
    pub tracks: Range<usize>,
    /// min-content contribution
    pub min_content: f32,
    /// max-content contribution
    pub max_content: f32,
    /// Minimum contribution (used for `auto` minimums)
    pub minimum: f32,
}

impl ItemContribution {
    /// Number of spanned tracks.
    pub fn span(&self) -> usize {
        self.tracks.len()
    }

    /// Contribution used for `auto` minimums under a sizing constraint.
    pub fn automatic_minimum(&self, available: AvailableSpace) -> f32 {
        match available {
            AvailableSpace::MinContent => self.min_content,
            AvailableSpace::MaxContent => self.max_content,
            AvailableSpace::Definite(_) => self.minimum,
        }
    }
}

/// Measure an item's contributions along `axis`.
pub fn measure_item_contribution<NodeId, M: MeasureContent<NodeId>>(
    measurer: &mut M,
    node: &NodeId,
    item: ItemBox,
    tracks: Range<usize>,
    axis: GridAxis,
    known_cross_size: Option<f32>,
) -> ItemContribution {
    let margins = item.margin.0 + item.margin.1;
    let floor = item.min_size.unwrap_or(0.0);

    let (min_content, max_content) = item.size.map_or_else(
        || {
            let mut measure = |available| {
                measurer.measure(
                    node,
                    MeasureRequest {
                        axis,
                        available,
                        known_cross_size,
                    },
                )
            };
            let min_content = measure(AvailableSpace::MinContent);
            (min_content, measure(AvailableSpace::MaxContent).max(min_content))
        },
        |size| (size, size),
    );
    // Explicit sizes stand in for the content-based minimum.
    let minimum = item.min_size.or(item.size).unwrap_or(min_content);
    // max-* caps every contribution, min-* wins over it.
    let clamp = |size: f32| item.max_size.map_or(size, |max| size.min(max)).max(floor) + margins;

    ItemContribution {
        tracks,
        min_content: clamp(min_content),
        max_content: clamp(max_content),
        minimum: clamp(minimum),
    }
}

/// Aggregated single-track contributions.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TrackContribution {
    /// Largest min-content contribution
    pub base: f32,
    /// Largest max-content contribution
    pub growth_limit: f32,
    /// Largest contribution for an `auto` minimum
    pub automatic_minimum: f32,
}

/// Aggregate the contributions of items spanning exactly one track.
///
/// Tracks without such items get `None`.
pub fn collect_track_contributions(
    contributions: &[ItemContribution],
    track_count: usize,
    available: AvailableSpace,
) -> Vec<Option<TrackContribution>> {
    let mut tracks: Vec<Option<TrackContribution>> = vec![None; track_count];
    for contribution in contributions.iter().filter(|item| item.span() == 1) {
        let Some(slot) = tracks.get_mut(contribution.tracks.start) else {
            continue;
        };
        let track = slot.get_or_insert_with(TrackContribution::default);
        track.base = track.base.max(contribution.min_content);
        track.growth_limit = track.growth_limit.max(contribution.max_content);
        track.automatic_minimum = track
            .automatic_minimum
            .max(contribution.automatic_minimum(available));
    }
    tracks
}

/// Which track property a distribution step grows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Target {
    Base,
    GrowthLimit,
}

/// The distribution steps run for each group of items with the same span.
///
/// Spec: §12.5 step 3
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SpanStep {
    /// Base sizes of tracks with an intrinsic minimum
    IntrinsicMinimums,
    /// Base sizes of tracks with a content-based minimum
    ContentMinimums,
    /// Base sizes of tracks with a max-content minimum
    MaxContentMinimums,
    /// Growth limits of tracks with an intrinsic maximum
    IntrinsicMaximums,
    /// Growth limits of tracks with a max-content maximum
    MaxContentMaximums,
}

impl SpanStep {
    const ALL: [Self; 5] = [
        Self::IntrinsicMinimums,
        Self::ContentMinimums,
        Self::MaxContentMinimums,
        Self::IntrinsicMaximums,
        Self::MaxContentMaximums,
    ];

    fn target(self) -> Target {
        match self {
            Self::IntrinsicMinimums | Self::ContentMinimums | Self::MaxContentMinimums => {
                Target::Base
            }
            Self::IntrinsicMaximums | Self::MaxContentMaximums => Target::GrowthLimit,
        }
    }

    fn affects(self, min: TrackBreadth, max: TrackBreadth, available: AvailableSpace) -> bool {
        match self {
            Self::IntrinsicMinimums => min.is_intrinsic(),
            Self::ContentMinimums => {
                matches!(min, TrackBreadth::MinContent | TrackBreadth::MaxContent)
            }
            Self::MaxContentMinimums => {
                min == TrackBreadth::MaxContent
                    || (available == AvailableSpace::MaxContent && min == TrackBreadth::Auto)
            }
            Self::IntrinsicMaximums => max.is_intrinsic(),
            Self::MaxContentMaximums => {
                matches!(max, TrackBreadth::MaxContent | TrackBreadth::Auto)
            }
        }
    }

    fn contribution(self, item: &ItemContribution, available: AvailableSpace) -> f32 {
        match self {
            Self::IntrinsicMinimums => item.automatic_minimum(available),
            Self::ContentMinimums | Self::IntrinsicMaximums => item.min_content,
            Self::MaxContentMinimums | Self::MaxContentMaximums => item.max_content,
        }
    }
}

/// Resolve intrinsic track sizes from item contributions.
///
/// `tracks` must be initialized (§12.4); on return every growth limit is
/// finite and no smaller than its base size.
///
/// Spec: §12.5 Resolve Intrinsic Track Sizes
pub fn resolve_intrinsic_track_sizes(
    tracks: &mut [ResolvedTrack],
    functions: &[GridTrack],
    contributions: &[ItemContribution],
    gap: f32,
    available: AvailableSpace,
) {
    let basis = available.definite();
    let is_flexible = |index: usize| {
        functions
            .get(index)
            .is_some_and(|track| max_breadth(track, basis).is_flexible())
    };
    let (flex_items, mut other_items): (Vec<&ItemContribution>, Vec<&ItemContribution>) =
        contributions
            .iter()
            .filter(|item| !item.tracks.is_empty())
            .partition(|item| item.tracks.clone().any(is_flexible));

    // Single-span items.
    let single: Vec<ItemContribution> = other_items
        .iter()
        .filter(|item| item.span() == 1)
        .map(|item| (*item).clone())
        .collect();
    let per_track = collect_track_contributions(&single, tracks.len(), available);
    for (index, (track, contribution)) in tracks.iter_mut().zip(per_track).enumerate() {
        let (Some(function), Some(contribution)) = (functions.get(index), contribution) else {
            continue;
        };
        size_single_span_track(track, function, &contribution, available);
    }

    // Multi-span items not crossing flexible tracks, by increasing span.
    other_items.retain(|item| item.span() > 1);
    other_items.sort_by_key(|item| item.span());
    let mut group_start = 0;
    while group_start < other_items.len() {
        let span = other_items.get(group_start).map_or(0, |item| item.span());
        let group_end = other_items
            .iter()
            .skip(group_start)
            .position(|item| item.span() != span)
            .map_or(other_items.len(), |offset| group_start + offset);
        let group = other_items.get(group_start..group_end).unwrap_or(&[]);
        distribute_span_group(tracks, functions, group, gap, available);
        group_start = group_end;
    }

    // Items crossing flexible tracks, all together, by flex factor.
    let mut planned = vec![0.0f32; tracks.len()];
    for item in &flex_items {
        let affected: Vec<usize> = item
            .tracks
            .clone()
            .filter(|index| {
                is_flexible(*index)
                    && functions
                        .get(*index)
                        .is_some_and(|track| min_breadth(track, basis).is_intrinsic())
            })
            .collect();
        let weights: Vec<f32> = affected
            .iter()
            .map(|index| functions.get(*index).map_or(0.0, |track| track.size.flex_factor()))
            .collect();
        let current: f32 = item
            .tracks
            .clone()
            .filter_map(|index| tracks.get(index).map(|track| track.base_size))
            .sum();
        let space = item.automatic_minimum(available) - current - gaps_within(item, gap);
        plan_increase(&mut planned, &affected, &weights, space, None);
    }
    for (track, increase) in tracks.iter_mut().zip(&planned) {
        track.base_size += increase;
    }

    for track in tracks.iter_mut() {
        if track.growth_limit.is_infinite() || track.growth_limit < track.base_size {
            track.growth_limit = track.base_size;
        }
    }
}

fn gaps_within(item: &ItemContribution, gap: f32) -> f32 {
    gap * item.span().saturating_sub(1) as f32
}

/// Size a track from the items spanning only it.
fn size_single_span_track(
    track: &mut ResolvedTrack,
    function: &GridTrack,
    contribution: &TrackContribution,
    available: AvailableSpace,
) {
    let basis = available.definite();
    let max_fixed = max_breadth(function, basis).fixed_size(basis);

    match min_breadth(function, basis) {
        TrackBreadth::MinContent => track.base_size = track.base_size.max(contribution.base),
        TrackBreadth::MaxContent => {
            track.base_size = track.base_size.max(contribution.growth_limit);
        }
        TrackBreadth::Auto => {
            // Content-based minimums never push past a fixed maximum.
            let minimum = max_fixed.map_or(contribution.automatic_minimum, |limit| {
                contribution.automatic_minimum.min(limit)
            });
            track.base_size = track.base_size.max(minimum);
        }
        TrackBreadth::Length(_) | TrackBreadth::Percentage(_) | TrackBreadth::Flex(_) => {}
    }

    let grow_to = |current: f32, value: f32| {
        if current.is_infinite() {
            value
        } else {
            current.max(value)
        }
    };
    match max_breadth(function, basis) {
        TrackBreadth::MinContent => {
            track.growth_limit = grow_to(track.growth_limit, contribution.base);
        }
        TrackBreadth::MaxContent | TrackBreadth::Auto => {
            track.growth_limit = grow_to(track.growth_limit, contribution.growth_limit);
        }
        TrackBreadth::Length(_) | TrackBreadth::Percentage(_) | TrackBreadth::Flex(_) => {}
    }
    if let Some(limit) = function.size.fit_content_limit(basis) {
        track.growth_limit = track.growth_limit.min(limit).max(track.base_size);
    }
    if track.growth_limit.is_finite() && track.growth_limit < track.base_size {
        track.growth_limit = track.base_size;
    }
}

/// Run the five distribution steps for items sharing one span.
fn distribute_span_group(
    tracks: &mut [ResolvedTrack],
    functions: &[GridTrack],
    group: &[&ItemContribution],
    gap: f32,
    available: AvailableSpace,
) {
    let basis = available.definite();
    let affects = |step: SpanStep, index: usize| {
        functions.get(index).is_some_and(|track| {
            step.affects(min_breadth(track, basis), max_breadth(track, basis), available)
        })
    };

    for step in SpanStep::ALL {
        let target = step.target();
        let mut planned = vec![0.0f32; tracks.len()];
        for item in group {
            let affected: Vec<usize> = item
                .tracks
                .clone()
                .filter(|index| affects(step, *index))
                .collect();
            if affected.is_empty() {
                continue;
            }
            let current: f32 = item
                .tracks
                .clone()
                .filter_map(|index| tracks.get(index))
                .map(|track| match target {
                    Target::Base => track.base_size,
                    Target::GrowthLimit if track.growth_limit.is_infinite() => track.base_size,
                    Target::GrowthLimit => track.growth_limit,
                })
                .sum();
            let space = step.contribution(item, available) - current - gaps_within(item, gap);
            let weights: Vec<f32> = affected
                .iter()
                .map(|index| tracks.get(*index).map_or(0.0, |track| track.base_size))
                .collect();
            let caps: Vec<f32> = affected
                .iter()
                .map(|index| {
                    let Some(track) = tracks.get(*index) else {
                        return 0.0;
                    };
                    match target {
                        Target::Base => track.growth_limit - track.base_size,
                        Target::GrowthLimit => {
                            let current_limit = if track.growth_limit.is_infinite() {
                                track.base_size
                            } else {
                                track.growth_limit
                            };
                            functions
                                .get(*index)
                                .and_then(|function| function.size.fit_content_limit(basis))
                                .map_or(f32::INFINITY, |limit| (limit - current_limit).max(0.0))
                        }
                    }
                })
                .collect();
            plan_increase(&mut planned, &affected, &weights, space, Some(&caps));
        }

        for (index, (track, increase)) in tracks.iter_mut().zip(&planned).enumerate() {
            match target {
                Target::Base => track.base_size += increase,
                Target::GrowthLimit if !affects(step, index) => {}
                Target::GrowthLimit => {
                    if track.growth_limit.is_infinite() {
                        if *increase > 0.0 {
                            track.growth_limit = track.base_size + increase;
                        }
                    } else {
                        track.growth_limit += increase;
                    }
                }
            }
            if track.growth_limit.is_finite() && track.growth_limit < track.base_size {
                track.growth_limit = track.base_size;
            }
        }
    }
}

/// Record the increase one item needs, keeping the largest per track.
fn plan_increase(
    planned: &mut [f32],
    affected: &[usize],
    weights: &[f32],
    space: f32,
    caps: Option<&[f32]>,
) {
    if space <= 0.0 || affected.is_empty() {
        return;
    }
    let unlimited = vec![f32::INFINITY; affected.len()];
    let (mut increases, leftover) =
        distribute_extra_space(space, weights, caps.unwrap_or(&unlimited));
    // Space no track can absorb within its limit is shared past the limits.
    if leftover > 0.0 {
        let (beyond, _) = distribute_extra_space(leftover, weights, &unlimited);
        for (increase, extra) in increases.iter_mut().zip(beyond) {
            *increase += extra;
        }
    }
    for (index, increase) in affected.iter().zip(increases) {
        if let Some(slot) = planned.get_mut(*index) {
            *slot = slot.max(increase);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::GridTrackSize;

    const EPSILON: f32 = 1e-3;

    fn initialized(functions: &[GridTrack]) -> Vec<ResolvedTrack> {
        functions
            .iter()
            .map(|track| ResolvedTrack::initial(track, None))
            .collect()
    }

    fn item(tracks: Range<usize>, min_content: f32, max_content: f32) -> ItemContribution {
        ItemContribution {
            tracks,
            min_content,
            max_content,
            minimum: min_content,
        }
    }

    /// The fixed measurer answers per axis and constraint.
    ///
    /// # Panics
    /// Panics if the measured size is wrong.
    #[test]
    fn fixed_sizes_measure_per_constraint() {
        let mut sizes = FixedContentSizes::new().with(
            7_u32,
            ContentSizes {
                min_content: 40.0,
                max_content: 120.0,
            },
            ContentSizes::fixed(20.0),
        );
        let request = |axis, available| MeasureRequest {
            axis,
            available,
            known_cross_size: None,
        };
        let width = sizes.measure(&7, request(GridAxis::Column, AvailableSpace::Definite(80.0)));
        assert!((width - 80.0).abs() < EPSILON);
        let narrow = sizes.measure(&7, request(GridAxis::Column, AvailableSpace::Definite(10.0)));
        assert!((narrow - 40.0).abs() < EPSILON);
        let height = sizes.measure(&7, request(GridAxis::Row, AvailableSpace::MaxContent));
        assert!((height - 20.0).abs() < EPSILON);
        let unknown = sizes.measure(&8, request(GridAxis::Row, AvailableSpace::MaxContent));
        assert!(unknown.abs() < EPSILON);
    }

    /// Explicit sizes and margins shape the contribution.
    ///
    /// # Panics
    /// Panics if the contribution is wrong.
    #[test]
    fn contribution_includes_margins_and_explicit_size() {
        let mut sizes = FixedContentSizes::new().with(
            1_u32,
            ContentSizes {
                min_content: 30.0,
                max_content: 90.0,
            },
            ContentSizes::default(),
        );
        let measured = measure_item_contribution(
            &mut sizes,
            &1,
            ItemBox {
                margin: (5.0, 5.0),
                ..ItemBox::default()
            },
            0..1,
            GridAxis::Column,
            None,
        );
        assert!((measured.min_content - 40.0).abs() < EPSILON);
        assert!((measured.max_content - 100.0).abs() < EPSILON);

        let sized = measure_item_contribution(
            &mut sizes,
            &1,
            ItemBox {
                size: Some(50.0),
                ..ItemBox::default()
            },
            0..1,
            GridAxis::Column,
            None,
        );
        assert!((sized.min_content - 50.0).abs() < EPSILON);
        assert!((sized.minimum - 50.0).abs() < EPSILON);
    }

    /// max-* caps the contributions and min-* overrides the cap.
    ///
    /// # Panics
    /// Panics if a contribution escapes its bounds.
    #[test]
    fn contribution_respects_max_size() {
        let mut sizes = FixedContentSizes::new().with(
            1_u32,
            ContentSizes {
                min_content: 30.0,
                max_content: 90.0,
            },
            ContentSizes::default(),
        );
        let capped = measure_item_contribution(
            &mut sizes,
            &1,
            ItemBox {
                max_size: Some(60.0),
                margin: (0.0, 10.0),
                ..ItemBox::default()
            },
            0..1,
            GridAxis::Column,
            None,
        );
        assert!((capped.min_content - 40.0).abs() < EPSILON);
        assert!((capped.max_content - 70.0).abs() < EPSILON);

        let floored = measure_item_contribution(
            &mut sizes,
            &1,
            ItemBox {
                min_size: Some(80.0),
                max_size: Some(20.0),
                ..ItemBox::default()
            },
            0..1,
            GridAxis::Column,
            None,
        );
        assert!((floored.min_content - 80.0).abs() < EPSILON);
        assert!((floored.max_content - 80.0).abs() < EPSILON);
        assert!((floored.minimum - 80.0).abs() < EPSILON);
    }

    /// Single-span items size `auto` tracks to their max-content growth limit.
    ///
    /// # Panics
    /// Panics if the base size or growth limit is wrong.
    #[test]
    fn single_span_auto_track() {
        let functions = [GridTrack::explicit(GridTrackSize::AUTO)];
        let mut tracks = initialized(&functions);
        resolve_intrinsic_track_sizes(
            &mut tracks,
            &functions,
            &[item(0..1, 30.0, 80.0)],
            0.0,
            AvailableSpace::Definite(500.0),
        );
        let track = tracks.first().copied().unwrap_or_default();
        assert!((track.base_size - 30.0).abs() < EPSILON);
        assert!((track.growth_limit - 80.0).abs() < EPSILON);
    }

    /// A spanning item grows tracks in proportion to their current base sizes.
    ///
    /// # Panics
    /// Panics if the distribution is not weighted.
    #[test]
    fn spanning_item_weighted_by_base() {
        let functions = [
            GridTrack::explicit(GridTrackSize::AUTO),
            GridTrack::explicit(GridTrackSize::AUTO),
        ];
        let mut tracks = initialized(&functions);
        resolve_intrinsic_track_sizes(
            &mut tracks,
            &functions,
            &[item(0..1, 10.0, 10.0), item(1..2, 30.0, 30.0), item(0..2, 90.0, 90.0)],
            10.0,
            AvailableSpace::Definite(500.0),
        );
        // 90 - 40 - 10 = 40 extra, split 1:3.
        let bases: Vec<f32> = tracks.iter().map(|track| track.base_size).collect();
        assert!((bases.first().copied().unwrap_or(0.0) - 20.0).abs() < EPSILON);
        assert!((bases.get(1).copied().unwrap_or(0.0) - 60.0).abs() < EPSILON);
    }

    /// Zero-sized tracks share a spanning contribution equally.
    ///
    /// # Panics
    /// Panics if the distribution is not equal.
    #[test]
    fn spanning_item_equal_when_empty() {
        let functions = [
            GridTrack::explicit(GridTrackSize::AUTO),
            GridTrack::explicit(GridTrackSize::AUTO),
            GridTrack::explicit(GridTrackSize::px(50.0)),
        ];
        let mut tracks = initialized(&functions);
        resolve_intrinsic_track_sizes(
            &mut tracks,
            &functions,
            &[item(0..3, 150.0, 150.0)],
            0.0,
            AvailableSpace::Definite(500.0),
        );
        let bases: Vec<f32> = tracks.iter().map(|track| track.base_size).collect();
        assert!((bases.first().copied().unwrap_or(0.0) - 50.0).abs() < EPSILON);
        assert!((bases.get(1).copied().unwrap_or(0.0) - 50.0).abs() < EPSILON);
        assert!((bases.get(2).copied().unwrap_or(0.0) - 50.0).abs() < EPSILON);
    }

    /// `fit-content()` clamps the growth limit to its argument.
    ///
    /// # Panics
    /// Panics if the limit is not applied.
    #[test]
    fn fit_content_clamps_growth() {
        let functions = [GridTrack::explicit(GridTrackSize::FitContent(
            crate::types::LengthPercentage::Length(100.0),
        ))];
        let mut tracks = initialized(&functions);
        resolve_intrinsic_track_sizes(
            &mut tracks,
            &functions,
            &[item(0..1, 40.0, 300.0)],
            0.0,
            AvailableSpace::Definite(500.0),
        );
        let track = tracks.first().copied().unwrap_or_default();
        assert!((track.base_size - 40.0).abs() < EPSILON);
        assert!((track.growth_limit - 100.0).abs() < EPSILON);
    }
}
