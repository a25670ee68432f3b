//! Helper functions for track sizing.

use crate::intrinsic::ItemContribution;
use crate::types::{GridTrack, TrackBreadth, TrackListType};

/// Effective min track sizing function.
///
/// A percentage against an indefinite basis behaves as `auto`.
pub fn min_breadth(track: &GridTrack, basis: Option<f32>) -> TrackBreadth {
    match track.size.min_breadth() {
        TrackBreadth::Percentage(_) if basis.is_none() => TrackBreadth::Auto,
        breadth => breadth,
    }
}

/// Effective max track sizing function.
///
/// A percentage against an indefinite basis behaves as `auto`.
pub fn max_breadth(track: &GridTrack, basis: Option<f32>) -> TrackBreadth {
    match track.size.max_breadth() {
        TrackBreadth::Percentage(_) if basis.is_none() => TrackBreadth::Auto,
        breadth => breadth,
    }
}

/// Flags for `auto-fit` tracks that no item spans; they collapse to zero.
///
/// Spec: §7.2.3.2 Repeat-to-fill
pub fn collapsed_tracks(tracks: &[GridTrack], contributions: &[ItemContribution]) -> Vec<bool> {
    let mut collapsed: Vec<bool> = tracks
        .iter()
        .map(|track| track.track_type == TrackListType::AutoFit)
        .collect();
    for contribution in contributions {
        for index in contribution.tracks.clone() {
            if let Some(flag) = collapsed.get_mut(index) {
                *flag = false;
            }
        }
    }
    collapsed
}

/// Total gutter size between the tracks that are not collapsed.
pub fn total_gaps(collapsed: &[bool], gap: f32) -> f32 {
    let visible = collapsed.iter().filter(|flag| !**flag).count();
    gap * visible.saturating_sub(1) as f32
}
