//! Space distribution between tracks.

use crate::types::ContentDistribution;

/// Distribute `space` over tracks in proportion to `weights`, capping each
/// track's increase at its entry in `caps`.
///
/// Tracks share equally when all remaining weights are zero. Returns the
/// increase per track and the space no track could absorb.
pub fn distribute_extra_space(space: f32, weights: &[f32], caps: &[f32]) -> (Vec<f32>, f32) {
    let mut increases = vec![0.0f32; weights.len()];
    let mut frozen: Vec<bool> = (0..weights.len())
        .map(|index| caps.get(index).is_none_or(|cap| *cap <= 0.0))
        .collect();
    let mut remaining = space;

    while remaining > f32::EPSILON {
        let active: Vec<usize> = (0..weights.len())
            .filter(|index| !frozen.get(*index).copied().unwrap_or(true))
            .collect();
        if active.is_empty() {
            break;
        }
        let weight_sum: f32 = active
            .iter()
            .map(|index| weights.get(*index).copied().unwrap_or(0.0))
            .sum();
        let share_of = |index: usize| {
            if weight_sum > 0.0 {
                remaining * weights.get(index).copied().unwrap_or(0.0) / weight_sum
            } else {
                remaining / active.len() as f32
            }
        };
        let room_of = |index: usize, increases: &[f32]| {
            caps.get(index).copied().unwrap_or(0.0) - increases.get(index).copied().unwrap_or(0.0)
        };

        let capped: Vec<usize> = active
            .iter()
            .copied()
            .filter(|index| share_of(*index) >= room_of(*index, &increases))
            .collect();
        if capped.is_empty() {
            for index in &active {
                let share = share_of(*index);
                if let Some(increase) = increases.get_mut(*index) {
                    *increase += share;
                }
            }
            remaining = 0.0;
            break;
        }
        // Freeze the tracks that hit their cap and share the rest again.
        for index in capped {
            let room = room_of(index, &increases);
            if let Some(increase) = increases.get_mut(index) {
                *increase += room;
            }
            if let Some(flag) = frozen.get_mut(index) {
                *flag = true;
            }
            remaining -= room;
        }
    }

    (increases, remaining.max(0.0))
}

/// Track start offsets after aligning the tracks in the container.
///
/// `free_space` is what remains of a definite container size after tracks
/// and gutters; collapsed tracks take no space and no gutters.
///
/// Spec: §10.5 Aligning the Grid: the justify-content and align-content properties
pub fn content_offsets(
    sizes: &[f32],
    collapsed: &[bool],
    gap: f32,
    free_space: f32,
    distribution: ContentDistribution,
) -> Vec<f32> {
    let visible = collapsed.iter().filter(|flag| !**flag).count();
    let free_space = free_space.max(0.0);

    let (leading, between) = match distribution {
        ContentDistribution::Normal | ContentDistribution::Start | ContentDistribution::Stretch => {
            (0.0, 0.0)
        }
        ContentDistribution::End => (free_space, 0.0),
        ContentDistribution::Center => (free_space / 2.0, 0.0),
        ContentDistribution::SpaceBetween if visible > 1 => {
            (0.0, free_space / (visible - 1) as f32)
        }
        ContentDistribution::SpaceBetween => (0.0, 0.0),
        ContentDistribution::SpaceAround if visible > 0 => {
            let share = free_space / visible as f32;
            (share / 2.0, share)
        }
        ContentDistribution::SpaceAround => (0.0, 0.0),
        ContentDistribution::SpaceEvenly => {
            let share = free_space / (visible + 1) as f32;
            (share, share)
        }
    };

    let mut offsets = Vec::with_capacity(sizes.len());
    let mut position = leading;
    let mut first = true;
    for (index, size) in sizes.iter().enumerate() {
        if collapsed.get(index).copied().unwrap_or(false) {
            offsets.push(position);
            continue;
        }
        if !first {
            position += gap + between;
        }
        first = false;
        offsets.push(position);
        position += size;
    }
    offsets
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-4;

    /// Weighted distribution freezes capped tracks and redistributes.
    ///
    /// # Panics
    /// Panics if the increases are wrong.
    #[test]
    fn weighted_distribution_respects_caps() {
        let (increases, leftover) = distribute_extra_space(60.0, &[10.0, 20.0], &[5.0, 100.0]);
        assert!((increases.first().copied().unwrap_or(0.0) - 5.0).abs() < EPSILON);
        assert!((increases.get(1).copied().unwrap_or(0.0) - 55.0).abs() < EPSILON);
        assert!(leftover.abs() < EPSILON);

        let (_, overflow) = distribute_extra_space(60.0, &[0.0, 0.0], &[10.0, 10.0]);
        assert!((overflow - 40.0).abs() < EPSILON);
    }

    /// Space distribution modes place tracks as expected.
    ///
    /// # Panics
    /// Panics if an offset is wrong.
    #[test]
    fn content_distribution_offsets() {
        let sizes = [10.0, 10.0, 10.0];
        let open = [false; 3];
        let between = content_offsets(&sizes, &open, 0.0, 60.0, ContentDistribution::SpaceBetween);
        assert_eq!(between, vec![0.0, 40.0, 80.0]);
        let center = content_offsets(&sizes, &open, 5.0, 20.0, ContentDistribution::Center);
        assert_eq!(center, vec![10.0, 25.0, 40.0]);
        let evenly = content_offsets(&sizes, &open, 0.0, 40.0, ContentDistribution::SpaceEvenly);
        assert_eq!(evenly, vec![10.0, 30.0, 50.0]);
    }

    /// Collapsed tracks take neither space nor gutters.
    ///
    /// # Panics
    /// Panics if a collapsed track shifts its neighbours.
    #[test]
    fn collapsed_tracks_have_no_gutters() {
        let offsets = content_offsets(
            &[100.0, 0.0, 100.0],
            &[false, true, false],
            10.0,
            0.0,
            ContentDistribution::Start,
        );
        assert_eq!(offsets, vec![0.0, 100.0, 110.0]);
    }
}
