//! Flexible track expansion and stretching of `auto` tracks.

use std::ops::Range;

use crate::intrinsic::ItemContribution;
use crate::types::{AvailableSpace, GridTrack, TrackBreadth};

use super::ResolvedTrack;
use super::helpers::max_breadth;

/// Size of one `fr` that fills `space` with the tracks in `indices`.
///
/// Tracks whose base size exceeds their flex share are treated as inflexible
/// and the fraction is recomputed over the rest. Collapsed tracks never flex.
///
/// Spec: §12.7.1 Find the Size of an fr
pub fn find_fr_size(
    tracks: &[ResolvedTrack],
    functions: &[GridTrack],
    indices: Range<usize>,
    space: f32,
    basis: Option<f32>,
    collapsed: &[bool],
) -> f32 {
    let factor_of = |index: usize| {
        functions
            .get(index)
            .filter(|track| {
                !collapsed.get(index).copied().unwrap_or(false)
                    && max_breadth(track, basis).is_flexible()
            })
            .map(|track| track.size.flex_factor())
    };
    let base_of = |index: usize| tracks.get(index).map_or(0.0, |track| track.base_size);
    let mut inflexible: Vec<bool> = indices.clone().map(|index| factor_of(index).is_none()).collect();

    loop {
        let mut leftover = space;
        let mut flex_sum = 0.0f32;
        for (offset, index) in indices.clone().enumerate() {
            if inflexible.get(offset).copied().unwrap_or(true) {
                leftover -= base_of(index);
            } else {
                flex_sum += factor_of(index).unwrap_or(0.0);
            }
        }
        // A flex sum below one takes only that share of the leftover space.
        let hypothetical = leftover / flex_sum.max(1.0);

        let mut restarted = false;
        for (offset, index) in indices.clone().enumerate() {
            let Some(flag) = inflexible.get_mut(offset) else {
                continue;
            };
            if *flag {
                continue;
            }
            if base_of(index) > hypothetical * factor_of(index).unwrap_or(0.0) {
                *flag = true;
                restarted = true;
            }
        }
        if !restarted {
            return hypothetical.max(0.0);
        }
    }
}

/// Grow flexible tracks to their share of the free space.
///
/// Spec: §12.7 Expand Flexible Tracks
pub fn expand_flexible_tracks(
    tracks: &mut [ResolvedTrack],
    functions: &[GridTrack],
    contributions: &[ItemContribution],
    available: AvailableSpace,
    gap: f32,
    gaps: f32,
    collapsed: &[bool],
) {
    let basis = available.definite();
    let flexible: Vec<(usize, f32)> = functions
        .iter()
        .enumerate()
        .filter(|(index, track)| {
            !collapsed.get(*index).copied().unwrap_or(false)
                && max_breadth(track, basis).is_flexible()
        })
        .map(|(index, track)| (index, track.size.flex_factor()))
        .collect();
    if flexible.is_empty() {
        return;
    }

    let fr_size = match available {
        AvailableSpace::MinContent => 0.0,
        AvailableSpace::Definite(size) => {
            find_fr_size(
                tracks,
                functions,
                0..tracks.len(),
                size - gaps,
                basis,
                collapsed,
            )
        }
        AvailableSpace::MaxContent => {
            let mut fr_size = 0.0f32;
            for (index, factor) in &flexible {
                let base = tracks.get(*index).map_or(0.0, |track| track.base_size);
                fr_size = fr_size.max(if *factor > 1.0 { base / factor } else { base });
            }
            for item in contributions {
                let crosses_flex = item
                    .tracks
                    .clone()
                    .any(|index| flexible.iter().any(|(flex_index, _)| *flex_index == index));
                if !crosses_flex {
                    continue;
                }
                let item_gaps = gap * item.span().saturating_sub(1) as f32;
                fr_size = fr_size.max(find_fr_size(
                    tracks,
                    functions,
                    item.tracks.clone(),
                    item.max_content - item_gaps,
                    basis,
                    collapsed,
                ));
            }
            fr_size
        }
    };

    tracing::debug!(
        "expand_flexible_tracks: fr_size={}, flex_tracks={}",
        fr_size,
        flexible.len()
    );

    for (index, factor) in flexible {
        let Some(track) = tracks.get_mut(index) else {
            continue;
        };
        let flex_size = fr_size * factor;
        if flex_size > track.base_size {
            track.base_size = flex_size;
        }
        track.growth_limit = track.growth_limit.max(track.base_size);
    }
}

/// Share the remaining free space equally between tracks with an `auto` max.
///
/// Spec: §12.8 Stretch auto Tracks
pub fn stretch_auto_tracks(
    tracks: &mut [ResolvedTrack],
    functions: &[GridTrack],
    available: AvailableSpace,
    gaps: f32,
    collapsed: &[bool],
) {
    let AvailableSpace::Definite(size) = available else {
        return;
    };
    let used: f32 = tracks.iter().map(|track| track.base_size).sum();
    let free_space = size - used - gaps;
    if free_space <= 0.0 {
        return;
    }
    let auto_tracks: Vec<usize> = functions
        .iter()
        .enumerate()
        .filter(|(index, track)| {
            !collapsed.get(*index).copied().unwrap_or(false)
                && max_breadth(track, Some(size)) == TrackBreadth::Auto
        })
        .map(|(index, _)| index)
        .collect();
    if auto_tracks.is_empty() {
        return;
    }
    let share = free_space / auto_tracks.len() as f32;
    for index in auto_tracks {
        if let Some(track) = tracks.get_mut(index) {
            track.base_size += share;
            track.growth_limit = track.growth_limit.max(track.base_size);
        }
    }
}
