//! Grid track sizing algorithm.
//!
//! Spec: §12 Grid Sizing
//! <https://www.w3.org/TR/css-grid-2/#algo-track-sizing>

mod distribution;
mod expansion;
mod helpers;
mod resolution;

use std::ops::Range;

use crate::intrinsic::{ItemContribution, resolve_intrinsic_track_sizes};
use crate::types::{AvailableSpace, ContentDistribution, GridTrack};

pub use distribution::{content_offsets, distribute_extra_space};
pub use expansion::{expand_flexible_tracks, find_fr_size, stretch_auto_tracks};
pub use helpers::{collapsed_tracks, max_breadth, min_breadth, total_gaps};
pub use resolution::{initialize_tracks, maximize_tracks};

/// Sizing state of one track while the algorithm runs.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ResolvedTrack {
    /// Base size
    pub base_size: f32,
    /// Growth limit (may be infinite before intrinsic resolution finishes)
    pub growth_limit: f32,
}

/// Parameters for track sizing.
#[derive(Debug, Clone, Copy)]
pub struct TrackSizingParams<'params> {
    /// All tracks of the axis, implicit ones included
    pub tracks: &'params [GridTrack],
    /// Gap between tracks
    pub gap: f32,
    /// Content-box size of the container along this axis
    pub available: AvailableSpace,
    /// Item contributions along this axis
    pub contributions: &'params [ItemContribution],
    /// justify-content / align-content
    pub distribution: ContentDistribution,
}

/// Resolved track sizes after running the track sizing algorithm.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ResolvedTrackSizes {
    /// Final size of each track
    pub sizes: Vec<f32>,
    /// Start offset of each track within the content box
    pub offsets: Vec<f32>,
    /// Gap between tracks
    pub gap: f32,
    /// Content-box size along this axis (the track total when indefinite)
    pub content_size: f32,
}

impl ResolvedTrackSizes {
    /// Tracks packed at the start with the given gap.
    pub fn from_sizes(sizes: Vec<f32>, gap: f32) -> Self {
        let collapsed = vec![false; sizes.len()];
        let offsets = content_offsets(&sizes, &collapsed, gap, 0.0, ContentDistribution::Start);
        let content_size = sizes.iter().sum::<f32>() + total_gaps(&collapsed, gap);
        Self {
            sizes,
            offsets,
            gap,
            content_size,
        }
    }

    /// Number of tracks.
    pub fn track_count(&self) -> usize {
        self.sizes.len()
    }

    /// Get the final size for a track.
    pub fn size(&self, index: usize) -> f32 {
        self.sizes.get(index).copied().unwrap_or(0.0)
    }

    /// Get the start offset for a track.
    pub fn offset(&self, index: usize) -> f32 {
        self.offsets.get(index).copied().unwrap_or(0.0)
    }

    /// Offset and size of the area covered by a track range, gaps inside it included.
    pub fn span(&self, tracks: Range<usize>) -> (f32, f32) {
        if tracks.is_empty() || tracks.start >= self.sizes.len() {
            return (self.end(), 0.0);
        }
        let last = tracks.end.min(self.sizes.len()) - 1;
        let start = self.offset(tracks.start);
        (start, self.offset(last) + self.size(last) - start)
    }

    /// Size of the area covered by a track range, gaps inside it included.
    pub fn span_size(&self, tracks: Range<usize>) -> f32 {
        self.span(tracks).1
    }

    /// End edge of the last track.
    pub fn end(&self) -> f32 {
        self.sizes
            .len()
            .checked_sub(1)
            .map_or(0.0, |last| self.offset(last) + self.size(last))
    }

    /// Positions of all grid lines (one more than tracks).
    pub fn line_positions(&self) -> Vec<f32> {
        let mut lines = self.offsets.clone();
        lines.push(self.end());
        lines
    }
}

/// Resolve track sizes according to the grid sizing algorithm.
///
/// Spec: §12.3 Track Sizing Algorithm
/// <https://www.w3.org/TR/css-grid-2/#algo-track-sizing>
///
/// Runs initialization, intrinsic resolution, maximization, flexible
/// expansion and `auto` stretching, then places the tracks according to the
/// content distribution. Empty `auto-fit` tracks collapse to zero.
pub fn resolve_track_sizes(params: &TrackSizingParams<'_>) -> ResolvedTrackSizes {
    let basis = params.available.definite();
    let collapsed = collapsed_tracks(params.tracks, params.contributions);
    let gaps = total_gaps(&collapsed, params.gap);

    tracing::debug!(
        "resolve_track_sizes: tracks={}, available={:?}, items={}, gaps={}",
        params.tracks.len(),
        params.available,
        params.contributions.len(),
        gaps
    );

    let mut tracks = initialize_tracks(params.tracks, basis, &collapsed);
    resolve_intrinsic_track_sizes(
        &mut tracks,
        params.tracks,
        params.contributions,
        params.gap,
        params.available,
    );
    maximize_tracks(&mut tracks, params.available, gaps, &collapsed);
    expand_flexible_tracks(
        &mut tracks,
        params.tracks,
        params.contributions,
        params.available,
        params.gap,
        gaps,
        &collapsed,
    );
    if params.distribution.stretches() {
        stretch_auto_tracks(&mut tracks, params.tracks, params.available, gaps, &collapsed);
    }

    let sizes: Vec<f32> = tracks
        .iter()
        .zip(&collapsed)
        .map(|(track, is_collapsed)| if *is_collapsed { 0.0 } else { track.base_size })
        .collect();
    let used = sizes.iter().sum::<f32>() + gaps;
    let free_space = basis.map_or(0.0, |size| size - used);
    let offsets = content_offsets(
        &sizes,
        &collapsed,
        params.gap,
        free_space,
        params.distribution,
    );

    tracing::trace!("resolve_track_sizes: sizes={sizes:?}, offsets={offsets:?}");

    ResolvedTrackSizes {
        sizes,
        offsets,
        gap: params.gap,
        content_size: basis.unwrap_or(used),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{GridTrackSize, TrackBreadth, TrackListType};

    const EPSILON: f32 = 1e-3;

    fn explicit(sizes: &[GridTrackSize]) -> Vec<GridTrack> {
        sizes.iter().copied().map(GridTrack::explicit).collect()
    }

    fn resolve(
        tracks: &[GridTrack],
        gap: f32,
        available: AvailableSpace,
        contributions: &[ItemContribution],
    ) -> ResolvedTrackSizes {
        resolve_track_sizes(&TrackSizingParams {
            tracks,
            gap,
            available,
            contributions,
            distribution: ContentDistribution::Normal,
        })
    }

    fn item(tracks: Range<usize>, size: f32) -> ItemContribution {
        ItemContribution {
            tracks,
            min_content: size,
            max_content: size,
            minimum: size,
        }
    }

    /// Test resolution of fixed-size tracks.
    ///
    /// # Panics
    /// Panics if assertions fail.
    #[test]
    fn test_resolve_fixed_tracks() {
        let tracks = explicit(&[GridTrackSize::px(100.0), GridTrackSize::px(200.0)]);
        let result = resolve(&tracks, 10.0, AvailableSpace::Definite(400.0), &[]);

        assert!((result.size(0) - 100.0).abs() < EPSILON);
        assert!((result.size(1) - 200.0).abs() < EPSILON);
        assert!((result.offset(1) - 110.0).abs() < EPSILON);
    }

    /// Test resolution of flexible tracks with fr units.
    ///
    /// # Panics
    /// Panics if assertions fail.
    #[test]
    fn test_resolve_flex_tracks() {
        let tracks = explicit(&[
            GridTrackSize::px(100.0),
            GridTrackSize::fr(1.0),
            GridTrackSize::fr(2.0),
        ]);
        let result = resolve(&tracks, 0.0, AvailableSpace::Definite(400.0), &[]);

        assert!((result.size(0) - 100.0).abs() < EPSILON);
        // Remaining 300px distributed as 1:2
        assert!((result.size(1) - 100.0).abs() < EPSILON);
        assert!((result.size(2) - 200.0).abs() < EPSILON);
    }

    /// A flexible track whose minimum exceeds its share stops flexing.
    ///
    /// # Panics
    /// Panics if the minimum is not honoured.
    #[test]
    fn flex_minimum_restarts_distribution() {
        let tracks = explicit(&[
            GridTrackSize::minmax(TrackBreadth::Length(150.0), TrackBreadth::Flex(1.0)),
            GridTrackSize::px(50.0),
        ]);
        let result = resolve(&tracks, 0.0, AvailableSpace::Definite(180.0), &[]);
        assert!((result.size(0) - 150.0).abs() < EPSILON);
        assert!((result.size(1) - 50.0).abs() < EPSILON);

        let shared = explicit(&[
            GridTrackSize::minmax(TrackBreadth::Length(120.0), TrackBreadth::Flex(1.0)),
            GridTrackSize::fr(1.0),
        ]);
        let restarted = resolve(&shared, 0.0, AvailableSpace::Definite(200.0), &[]);
        assert!((restarted.size(0) - 120.0).abs() < EPSILON);
        assert!((restarted.size(1) - 80.0).abs() < EPSILON);
    }

    /// Negative free space gives flexible tracks no growth.
    ///
    /// # Panics
    /// Panics if a flexible track grows.
    #[test]
    fn negative_free_space_freezes_flex() {
        let tracks = explicit(&[GridTrackSize::px(300.0), GridTrackSize::fr(1.0)]);
        let result = resolve(&tracks, 0.0, AvailableSpace::Definite(200.0), &[]);
        assert!(result.size(1).abs() < EPSILON);
        assert!((result.content_size - 200.0).abs() < EPSILON);
    }

    /// `auto` tracks absorb leftover space under `normal` distribution.
    ///
    /// # Panics
    /// Panics if the auto tracks are not stretched.
    #[test]
    fn auto_tracks_stretch() {
        let tracks = explicit(&[GridTrackSize::AUTO, GridTrackSize::px(100.0), GridTrackSize::AUTO]);
        let result = resolve(
            &tracks,
            0.0,
            AvailableSpace::Definite(400.0),
            &[item(0..1, 50.0), item(2..3, 30.0)],
        );
        // 400 - 100 - 50 - 30 = 220, maximized then split equally.
        assert!((result.size(0) - 160.0).abs() < EPSILON);
        assert!((result.size(2) - 140.0).abs() < EPSILON);
    }

    /// An indefinite container takes the size of its tracks.
    ///
    /// # Panics
    /// Panics if the content size is wrong.
    #[test]
    fn indefinite_container_sums_tracks() {
        let tracks = explicit(&[GridTrackSize::AUTO, GridTrackSize::fr(1.0)]);
        let result = resolve(
            &tracks,
            10.0,
            AvailableSpace::MaxContent,
            &[item(0..1, 40.0), item(1..2, 60.0)],
        );
        assert!((result.size(0) - 40.0).abs() < EPSILON);
        assert!((result.size(1) - 60.0).abs() < EPSILON);
        assert!((result.content_size - 110.0).abs() < EPSILON);
    }

    /// Empty auto-fit tracks collapse and the occupied ones flex.
    ///
    /// # Panics
    /// Panics if the empty tracks keep their size.
    #[test]
    fn test_auto_fit_minmax_single_item() {
        let repeated = GridTrack {
            size: GridTrackSize::minmax(TrackBreadth::Length(200.0), TrackBreadth::Flex(1.0)),
            track_type: TrackListType::AutoFit,
        };
        let tracks = vec![repeated; 2];
        let result = resolve(&tracks, 10.0, AvailableSpace::Definite(569.0), &[item(0..1, 0.0)]);

        assert!((result.size(0) - 569.0).abs() < EPSILON);
        assert!(result.size(1).abs() < EPSILON);
    }

    /// Spans include the gaps strictly between their tracks.
    ///
    /// # Panics
    /// Panics if the span size is wrong.
    #[test]
    fn span_size_includes_inner_gaps() {
        let sizes = ResolvedTrackSizes::from_sizes(vec![70.0, 70.0, 70.0], 10.0);
        assert!((sizes.span_size(0..2) - 150.0).abs() < EPSILON);
        assert_eq!(sizes.line_positions(), vec![0.0, 80.0, 160.0, 230.0]);
        assert!((sizes.content_size - 230.0).abs() < EPSILON);
    }
}
