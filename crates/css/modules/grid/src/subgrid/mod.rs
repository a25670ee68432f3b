//! Subgrids: nested grid containers that reuse a slice of their parent's tracks.
//!
//! Spec: §9 Subgrids
//! <https://www.w3.org/TR/css-grid-2/#subgrids>

use std::ops::Range;

use crate::intrinsic::ItemContribution;
use crate::track_list::{LineNameMap, TrackList};
use crate::track_sizing::ResolvedTrackSizes;
use crate::types::GridAxis;

/// Tracks a subgrid takes over from its parent on one axis.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct InheritedTracks {
    /// Track sizes and offsets within the subgrid's content box
    pub sizes: ResolvedTrackSizes,
    /// Inherited and own line names, numbered from the subgrid's first line
    pub line_names: LineNameMap,
}

impl InheritedTracks {
    /// Explicit track list the subgrid places its items against.
    pub fn track_list(&self) -> TrackList {
        let mut list = TrackList::auto_tracks(self.sizes.track_count());
        list.line_names = self.line_names.clone();
        list
    }
}

/// Read-only view of the parent tracks spanned by a subgrid on one axis.
///
/// The parent may itself be a subgrid; its resolved tracks are then the
/// slice it inherited, so references pass through intermediate subgrids.
#[derive(Debug, Clone)]
pub struct SubgridBinding<'tracks> {
    /// Resolved tracks of the parent grid
    pub tracks: &'tracks ResolvedTrackSizes,
    /// Parent line names, numbered over the parent's full grid
    pub line_names: &'tracks LineNameMap,
    /// Parent tracks covered by the subgrid's grid area
    pub range: Range<usize>,
    /// Subgridded axis
    pub axis: GridAxis,
    /// Padding plus border of the subgrid at the start and end of the axis
    pub insets: (f32, f32),
}

impl<'tracks> SubgridBinding<'tracks> {
    /// Bind a subgrid to the parent tracks of its area.
    pub fn new(
        tracks: &'tracks ResolvedTrackSizes,
        line_names: &'tracks LineNameMap,
        range: Range<usize>,
        axis: GridAxis,
        insets: (f32, f32),
    ) -> Self {
        Self {
            tracks,
            line_names,
            range,
            axis,
            insets,
        }
    }

    /// Number of inherited tracks.
    pub fn track_count(&self) -> usize {
        self.range.len()
    }

    /// Inherited tracks as seen from the subgrid's content box.
    ///
    /// Sizes and gaps come unchanged from the parent, except that the
    /// subgrid's padding and border eat into its edge tracks.
    ///
    /// Spec: §9 Subgrids, item 5
    pub fn resolve(&self) -> ResolvedTrackSizes {
        let (area_start, area_size) = self.tracks.span(self.range.clone());
        let origin = area_start + self.insets.0;
        let limit = (area_start + area_size - self.insets.1).max(origin);

        let mut sizes = Vec::with_capacity(self.track_count());
        let mut offsets = Vec::with_capacity(self.track_count());
        for index in self.range.clone() {
            let start = self.tracks.offset(index).clamp(origin, limit);
            let end = (self.tracks.offset(index) + self.tracks.size(index)).clamp(start, limit);
            offsets.push(start - origin);
            sizes.push(end - start);
        }

        tracing::trace!(
            "subgrid {:?} tracks {:?}: sizes={sizes:?}, insets={:?}",
            self.axis,
            self.range,
            self.insets
        );

        ResolvedTrackSizes {
            sizes,
            offsets,
            gap: self.tracks.gap,
            content_size: limit - origin,
        }
    }

    /// Resolved tracks and merged line names for the subgrid.
    pub fn inherit(&self, own_names: &[Vec<String>]) -> InheritedTracks {
        InheritedTracks {
            sizes: self.resolve(),
            line_names: merge_line_names(self.line_names, self.range.clone(), own_names),
        }
    }
}

/// Line names of a subgrid: the parent's names on the spanned lines plus
/// the names listed in its own `subgrid` value, both renumbered from the
/// subgrid's first line.
///
/// Own names apply positionally; names past the last spanned line are
/// ignored.
pub fn merge_line_names(
    inherited: &LineNameMap,
    range: Range<usize>,
    own_names: &[Vec<String>],
) -> LineNameMap {
    let mut merged = LineNameMap::new();
    for (name, lines) in inherited.iter() {
        for line in lines
            .iter()
            .filter(|line| (range.start..=range.end).contains(*line))
        {
            merged.insert(name, line - range.start);
        }
    }
    for (line, names) in own_names.iter().enumerate().take(range.len() + 1) {
        for name in names {
            merged.insert(name, line);
        }
    }
    merged
}

/// Add the subgrid's padding and border to a descendant contribution that
/// touches an edge of its `span` tracks.
pub fn lift_contribution(
    contribution: &ItemContribution,
    span: usize,
    insets: (f32, f32),
) -> ItemContribution {
    let mut extra = 0.0;
    if contribution.tracks.start == 0 {
        extra += insets.0;
    }
    if contribution.tracks.end >= span {
        extra += insets.1;
    }
    let end = contribution.tracks.end.min(span);
    ItemContribution {
        tracks: contribution.tracks.start.min(end)..end,
        min_content: contribution.min_content + extra,
        max_content: contribution.max_content + extra,
        minimum: contribution.minimum + extra,
    }
}

/// Contribution of the subgrid's own frame over its whole span, so an
/// empty subgrid still claims room for its padding and border.
pub fn frame_contribution(span: usize, insets: (f32, f32)) -> ItemContribution {
    let frame = insets.0 + insets.1;
    ItemContribution {
        tracks: 0..span,
        min_content: frame,
        max_content: frame,
        minimum: frame,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-4;

    fn close(actual: f32, expected: f32) -> bool {
        (actual - expected).abs() < EPSILON
    }

    /// Padding shrinks the first and last inherited tracks only.
    ///
    /// # Panics
    /// Panics if an inherited size or offset is wrong.
    #[test]
    fn padding_shrinks_edge_tracks() {
        let parent = ResolvedTrackSizes::from_sizes(vec![100.0, 150.0, 100.0], 0.0);
        let names = LineNameMap::new();
        let binding = SubgridBinding::new(&parent, &names, 0..3, GridAxis::Column, (8.0, 8.0));
        let inherited = binding.resolve();

        assert!(close(inherited.size(0), 92.0));
        assert!(close(inherited.size(1), 150.0));
        assert!(close(inherited.size(2), 92.0));
        assert!(close(inherited.offset(1), 92.0));
        assert!(close(inherited.content_size, 334.0));
    }

    /// A partial span keeps the parent's gaps between the inherited tracks.
    ///
    /// # Panics
    /// Panics if the gap is not inherited.
    #[test]
    fn partial_span_keeps_gaps() {
        let parent = ResolvedTrackSizes::from_sizes(vec![50.0, 60.0, 70.0], 10.0);
        let names = LineNameMap::new();
        let binding = SubgridBinding::new(&parent, &names, 1..3, GridAxis::Row, (0.0, 0.0));
        let inherited = binding.resolve();

        assert_eq!(inherited.track_count(), 2);
        assert!(close(inherited.offset(0), 0.0));
        assert!(close(inherited.offset(1), 70.0));
        assert!(close(inherited.size(1), 70.0));
        assert!(close(inherited.gap, 10.0));
        assert!(close(inherited.content_size, 140.0));
    }

    /// Own names are added next to the inherited ones.
    ///
    /// # Panics
    /// Panics if a name is lost or misplaced.
    #[test]
    fn line_names_merge_positionally() {
        let mut parent = LineNameMap::new();
        parent.insert("outer", 1);
        parent.insert("main", 2);
        parent.insert("far", 4);
        let own = vec![vec!["a".to_owned()], vec![], vec!["b".to_owned(), "main".to_owned()]];

        let merged = merge_line_names(&parent, 1..3, &own);
        assert_eq!(merged.lines("outer"), &[0]);
        assert_eq!(merged.lines("main"), &[1, 2]);
        assert_eq!(merged.lines("a"), &[0]);
        assert_eq!(merged.lines("b"), &[2]);
        assert!(!merged.contains("far"));
    }

    /// Edge items carry the frame into the parent's sizing.
    ///
    /// # Panics
    /// Panics if the padding is added to the wrong items.
    #[test]
    fn lifted_contributions_include_frame() {
        let inner = ItemContribution {
            tracks: 1..2,
            min_content: 40.0,
            max_content: 60.0,
            minimum: 40.0,
        };
        let middle = lift_contribution(&inner, 3, (5.0, 7.0));
        assert!(close(middle.max_content, 60.0));

        let edge = ItemContribution {
            tracks: 2..3,
            ..inner
        };
        let lifted = lift_contribution(&edge, 3, (5.0, 7.0));
        assert!(close(lifted.max_content, 67.0));
        assert!(close(frame_contribution(3, (5.0, 7.0)).min_content, 12.0));
    }
}
