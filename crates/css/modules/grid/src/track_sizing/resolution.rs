//! Track initialization and maximization.

use crate::types::{AvailableSpace, GridTrack};

use super::ResolvedTrack;
use super::distribution::distribute_extra_space;
use super::helpers::{max_breadth, min_breadth};

impl ResolvedTrack {
    /// Initial base size and growth limit of a track.
    ///
    /// Spec: §12.4 Initialize Track Sizes
    pub fn initial(track: &GridTrack, basis: Option<f32>) -> Self {
        let base_size = min_breadth(track, basis).fixed_size(basis).unwrap_or(0.0);
        let growth_limit = max_breadth(track, basis)
            .fixed_size(basis)
            .map_or(f32::INFINITY, |limit| limit.max(base_size));
        Self {
            base_size,
            growth_limit,
        }
    }
}

/// Initialize every track; collapsed tracks are fixed at zero.
pub fn initialize_tracks(
    functions: &[GridTrack],
    basis: Option<f32>,
    collapsed: &[bool],
) -> Vec<ResolvedTrack> {
    functions
        .iter()
        .zip(collapsed)
        .map(|(track, is_collapsed)| {
            if *is_collapsed {
                ResolvedTrack::default()
            } else {
                ResolvedTrack::initial(track, basis)
            }
        })
        .collect()
}

/// Grow base sizes towards growth limits using the free space.
///
/// Spec: §12.6 Maximize Tracks
pub fn maximize_tracks(
    tracks: &mut [ResolvedTrack],
    available: AvailableSpace,
    gaps: f32,
    collapsed: &[bool],
) {
    match available {
        AvailableSpace::MinContent => {}
        AvailableSpace::MaxContent => {
            for track in tracks.iter_mut() {
                track.base_size = track.base_size.max(track.growth_limit);
            }
        }
        AvailableSpace::Definite(size) => {
            let used: f32 = tracks.iter().map(|track| track.base_size).sum();
            let free_space = size - used - gaps;
            if free_space <= 0.0 {
                return;
            }
            let growable: Vec<usize> = (0..tracks.len())
                .filter(|index| !collapsed.get(*index).copied().unwrap_or(false))
                .collect();
            let weights = vec![1.0; growable.len()];
            let caps: Vec<f32> = growable
                .iter()
                .map(|index| {
                    tracks
                        .get(*index)
                        .map_or(0.0, |track| track.growth_limit - track.base_size)
                })
                .collect();
            let (increases, _) = distribute_extra_space(free_space, &weights, &caps);
            for (index, increase) in growable.iter().zip(increases) {
                if let Some(track) = tracks.get_mut(*index) {
                    track.base_size += increase;
                }
            }
            tracing::trace!("maximize_tracks: free_space={free_space}");
        }
    }
}
