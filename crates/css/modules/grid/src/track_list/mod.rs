//! Explicit track lists and their line names.
//!
//! Spec: §7.2 Explicit Track Sizing
//! <https://www.w3.org/TR/css-grid-2/#track-sizing>

mod areas;
mod parser;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::types::{GridAxis, GridTrack, GridTrackSize, TrackListType};

pub use areas::{GridTemplateArea, GridTemplateAreas};
pub use parser::{parse_template_areas, parse_track_sizes, parse_track_template};

/// Repetition count of a `repeat()` entry.
///
/// Spec: §7.2.3 Repeating Rows and Columns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RepeatCount {
    /// repeat(<integer>, ...)
    Count(u16),
    /// repeat(auto-fill, ...)
    AutoFill,
    /// repeat(auto-fit, ...)
    AutoFit,
}

/// Repeat pattern for track lists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackRepeat {
    /// How many times the pattern is repeated
    pub count: RepeatCount,
    /// Repeated track sizing functions
    pub tracks: Vec<GridTrackSize>,
    /// Line names around the repeated tracks (`tracks.len() + 1` entries)
    pub line_names: Vec<Vec<String>>,
}

impl TrackRepeat {
    /// Repeat without line names.
    pub fn new(count: RepeatCount, tracks: Vec<GridTrackSize>) -> Self {
        let line_names = vec![Vec::new(); tracks.len() + 1];
        Self {
            count,
            tracks,
            line_names,
        }
    }

    /// Check if this is an `auto-fill`/`auto-fit` repetition.
    pub fn is_auto(&self) -> bool {
        matches!(self.count, RepeatCount::AutoFill | RepeatCount::AutoFit)
    }

    fn names_at(&self, index: usize) -> &[String] {
        self.line_names
            .get(index)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

/// One entry of a declared track list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TrackListEntry {
    /// A single track
    Track(GridTrackSize),
    /// A `repeat()` entry
    Repeat(TrackRepeat),
}

/// A declared `<track-list>` with bracketed line names between entries.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TrackTemplate {
    /// Track and repeat entries in order
    pub entries: Vec<TrackListEntry>,
    /// Line names before, between and after the entries (`entries.len() + 1`)
    pub line_names: Vec<Vec<String>>,
}

impl TrackTemplate {
    /// Template made of plain tracks without line names.
    pub fn from_sizes(sizes: impl IntoIterator<Item = GridTrackSize>) -> Self {
        let entries: Vec<TrackListEntry> = sizes.into_iter().map(TrackListEntry::Track).collect();
        let line_names = vec![Vec::new(); entries.len() + 1];
        Self {
            entries,
            line_names,
        }
    }

    /// Attach names to the line before entry `line` (line `entries.len()` is the last one).
    #[must_use]
    pub fn with_line_names(mut self, line: usize, names: &[&str]) -> Self {
        if self.line_names.len() < self.entries.len() + 1 {
            self.line_names.resize(self.entries.len() + 1, Vec::new());
        }
        if let Some(slot) = self.line_names.get_mut(line) {
            slot.extend(names.iter().map(|name| (*name).to_owned()));
        }
        self
    }

    fn names_at(&self, index: usize) -> &[String] {
        self.line_names
            .get(index)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    fn auto_repeat(&self) -> Option<&TrackRepeat> {
        self.entries.iter().find_map(|entry| match entry {
            TrackListEntry::Repeat(repeat) if repeat.is_auto() => Some(repeat),
            _ => None,
        })
    }
}

/// Declared value of `grid-template-columns` / `grid-template-rows`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub enum GridTemplate {
    /// `none`: no explicit tracks
    #[default]
    None,
    /// An explicit track list
    Tracks(TrackTemplate),
    /// `subgrid`, with optional line names for the subgrid's own lines
    Subgrid(Vec<Vec<String>>),
}

impl GridTemplate {
    /// Template made of plain tracks.
    pub fn tracks(sizes: impl IntoIterator<Item = GridTrackSize>) -> Self {
        Self::Tracks(TrackTemplate::from_sizes(sizes))
    }

    /// Check whether this axis is subgridded.
    pub fn is_subgrid(&self) -> bool {
        matches!(self, Self::Subgrid(_))
    }
}

/// Ordered multimap from line name to the (0-based) lines carrying it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LineNameMap {
    names: BTreeMap<String, SmallVec<[usize; 2]>>,
}

impl LineNameMap {
    /// Create an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that `line` carries `name`.
    pub fn insert(&mut self, name: &str, line: usize) {
        let lines = self.names.entry(name.to_owned()).or_default();
        if let Err(position) = lines.binary_search(&line) {
            lines.insert(position, line);
        }
    }

    /// Lines carrying `name`, in ascending order.
    pub fn lines(&self, name: &str) -> &[usize] {
        self.names
            .get(name)
            .map(SmallVec::as_slice)
            .unwrap_or(&[])
    }

    /// Check if any line carries `name`.
    pub fn contains(&self, name: &str) -> bool {
        !self.lines(name).is_empty()
    }

    /// Names attached to a given line, in name order.
    pub fn names_at(&self, line: usize) -> Vec<&str> {
        self.names
            .iter()
            .filter(|(_, lines)| lines.contains(&line))
            .map(|(name, _)| name.as_str())
            .collect()
    }

    /// Iterate `(name, lines)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[usize])> {
        self.names
            .iter()
            .map(|(name, lines)| (name.as_str(), lines.as_slice()))
    }

    /// Copy of this map with every line moved by `offset`.
    #[must_use]
    pub fn shifted(&self, offset: usize) -> Self {
        let names = self
            .names
            .iter()
            .map(|(name, lines)| {
                (
                    name.clone(),
                    lines.iter().map(|line| line + offset).collect(),
                )
            })
            .collect();
        Self { names }
    }

    /// Check if the map is empty.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// An expanded explicit track list: one sizing function per track plus line names.
///
/// `tracks.len()` tracks are bounded by `tracks.len() + 1` lines.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TrackList {
    /// Explicit tracks
    pub tracks: Vec<GridTrack>,
    /// Names of the explicit lines
    pub line_names: LineNameMap,
}

impl TrackList {
    /// Track list of `count` `auto` tracks without names.
    pub fn auto_tracks(count: usize) -> Self {
        Self {
            tracks: vec![GridTrack::explicit(GridTrackSize::AUTO); count],
            line_names: LineNameMap::new(),
        }
    }

    /// Expand a declared template.
    ///
    /// Integer repeats are multiplied out. `auto-fill`/`auto-fit` repeats are
    /// expanded to as many repetitions as fit in `available` (content size of
    /// the container along this axis), or a single repetition when it is
    /// indefinite.
    ///
    /// Spec: §7.2.3.2 Repeat-to-fill: auto-fill and auto-fit repetitions
    pub fn from_template(template: &TrackTemplate, available: Option<f32>, gap: f32) -> Self {
        let auto_repetitions = template
            .auto_repeat()
            .map_or(0, |repeat| auto_repeat_count(template, repeat, available, gap));

        let mut list = Self::default();
        for (index, entry) in template.entries.iter().enumerate() {
            list.add_names(list.tracks.len(), template.names_at(index));
            match entry {
                TrackListEntry::Track(size) => list.tracks.push(GridTrack::explicit(*size)),
                TrackListEntry::Repeat(repeat) => {
                    let repetitions = match repeat.count {
                        RepeatCount::Count(count) => usize::from(count),
                        RepeatCount::AutoFill | RepeatCount::AutoFit => auto_repetitions,
                    };
                    let track_type = if repeat.count == RepeatCount::AutoFit {
                        TrackListType::AutoFit
                    } else {
                        TrackListType::Explicit
                    };
                    list.expand_repeat(repeat, repetitions, track_type);
                }
            }
        }
        list.add_names(list.tracks.len(), template.names_at(template.entries.len()));

        tracing::trace!(
            "expanded track template: {} tracks ({} auto repetitions)",
            list.tracks.len(),
            auto_repetitions
        );
        list
    }

    fn expand_repeat(&mut self, repeat: &TrackRepeat, repetitions: usize, track_type: TrackListType) {
        for _ in 0..repetitions {
            for (index, size) in repeat.tracks.iter().enumerate() {
                self.add_names(self.tracks.len(), repeat.names_at(index));
                self.tracks.push(GridTrack {
                    size: *size,
                    track_type,
                });
            }
            // Trailing names merge with the leading names of the next repetition.
            self.add_names(self.tracks.len(), repeat.names_at(repeat.tracks.len()));
        }
    }

    fn add_names(&mut self, line: usize, names: &[String]) {
        for name in names {
            self.line_names.insert(name, line);
        }
    }

    /// Number of explicit tracks.
    pub fn track_count(&self) -> usize {
        self.tracks.len()
    }

    /// Number of explicit lines.
    pub fn line_count(&self) -> usize {
        self.tracks.len() + 1
    }

    /// Grow the explicit grid with `auto` tracks up to `count` tracks.
    ///
    /// Used when `grid-template-areas` defines more rows/columns than the
    /// track list.
    pub fn ensure_track_count(&mut self, count: usize) {
        while self.tracks.len() < count {
            self.tracks.push(GridTrack::explicit(GridTrackSize::AUTO));
        }
    }

    /// Add the implicit `<area>-start` / `<area>-end` names of named areas.
    ///
    /// Spec: §7.3.2 Implicitly-Assigned Line Names
    pub fn add_area_lines(&mut self, areas: &GridTemplateAreas, axis: GridAxis) {
        for area in areas.areas() {
            let (start, end) = area.lines(axis);
            self.line_names.insert(&format!("{}-start", area.name), start);
            self.line_names.insert(&format!("{}-end", area.name), end);
        }
    }

    /// Resolve the `occurrence`-th line named `name` to a signed line coordinate.
    ///
    /// Coordinates are 0-based relative to the start of the explicit grid;
    /// negative values lie before it. A positive occurrence counts from the
    /// start, a negative one from the end. When not enough lines carry the
    /// name, every implicit line on that side is assumed to carry it.
    ///
    /// Spec: §8.3 Line-based Placement
    pub fn find_line(&self, name: &str, occurrence: i32) -> i32 {
        let lines = self.line_names.lines(name);
        let available = lines.len() as i32;
        let last_line = self.track_count() as i32;
        if occurrence > 0 {
            match lines.get((occurrence - 1) as usize) {
                Some(line) => *line as i32,
                None => last_line + (occurrence - available),
            }
        } else {
            let wanted = -occurrence;
            if wanted <= available {
                lines
                    .get((available - wanted) as usize)
                    .map_or(0, |line| *line as i32)
            } else {
                -(wanted - available)
            }
        }
    }

    /// Build the full track vector with implicit tracks on both sides.
    ///
    /// Leading implicit tracks cycle the `grid-auto-*` pattern backwards from
    /// its last entry, trailing ones forwards from its first.
    pub fn grid_tracks(
        &self,
        leading: usize,
        trailing: usize,
        auto_pattern: &[GridTrackSize],
    ) -> Vec<GridTrack> {
        let mut tracks = Vec::with_capacity(leading + self.tracks.len() + trailing);
        for distance in (1..=leading).rev() {
            tracks.push(GridTrack::implicit(implicit_track_size(
                auto_pattern,
                -(distance as isize),
            )));
        }
        tracks.extend_from_slice(&self.tracks);
        for offset in 0..trailing {
            tracks.push(GridTrack::implicit(implicit_track_size(
                auto_pattern,
                offset as isize,
            )));
        }
        tracks
    }
}

/// Sizing function of an implicit track.
///
/// `offset` 0 is the first track after the explicit grid, -1 the track just
/// before it.
///
/// Spec: §7.6 Implicit Track Sizing
pub fn implicit_track_size(pattern: &[GridTrackSize], offset: isize) -> GridTrackSize {
    if pattern.is_empty() {
        return GridTrackSize::AUTO;
    }
    let len = pattern.len() as isize;
    let index = offset.rem_euclid(len) as usize;
    pattern.get(index).copied().unwrap_or(GridTrackSize::AUTO)
}

/// Size a track is assumed to have when counting auto repetitions.
fn repetition_size(size: &GridTrackSize, available: Option<f32>) -> Option<f32> {
    size.max_breadth()
        .fixed_size(available)
        .or_else(|| size.min_breadth().fixed_size(available))
        .or_else(|| size.fit_content_limit(available))
}

/// Number of `auto-fill`/`auto-fit` repetitions that fit without overflow.
fn auto_repeat_count(
    template: &TrackTemplate,
    repeat: &TrackRepeat,
    available: Option<f32>,
    gap: f32,
) -> usize {
    let Some(space) = available else {
        return 1;
    };

    let mut repeat_size = 0.0;
    for size in &repeat.tracks {
        match repetition_size(size, available) {
            Some(len) => repeat_size += len,
            None => return 1,
        }
    }

    let mut other_size = 0.0;
    let mut other_count = 0usize;
    for entry in &template.entries {
        match entry {
            TrackListEntry::Track(size) => {
                other_size += repetition_size(size, available).unwrap_or(0.0);
                other_count += 1;
            }
            TrackListEntry::Repeat(fixed) if !fixed.is_auto() => {
                let RepeatCount::Count(count) = fixed.count else {
                    continue;
                };
                for size in &fixed.tracks {
                    other_size +=
                        repetition_size(size, available).unwrap_or(0.0) * f32::from(count);
                }
                other_count += fixed.tracks.len() * usize::from(count);
            }
            TrackListEntry::Repeat(_) => {}
        }
    }

    // total = other + n * repeat + (other_count + n * k - 1) * gap <= space
    let per_repetition = repeat_size + repeat.tracks.len() as f32 * gap;
    let remaining = space - other_size - (other_count as f32 - 1.0) * gap;
    if per_repetition <= 0.0 {
        return 1;
    }
    ((remaining / per_repetition).floor() as usize).max(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TrackBreadth;

    /// Integer repeats multiply the pattern and merge adjacent line names.
    ///
    /// # Panics
    /// Panics if the expansion or names are wrong.
    #[test]
    fn integer_repeat_expands_with_names() {
        let repeat = TrackRepeat {
            count: RepeatCount::Count(3),
            tracks: vec![GridTrackSize::px(50.0)],
            line_names: vec![vec!["a".to_owned()], vec!["b".to_owned()]],
        };
        let template = TrackTemplate {
            entries: vec![TrackListEntry::Repeat(repeat)],
            line_names: vec![Vec::new(), Vec::new()],
        };
        let list = TrackList::from_template(&template, None, 0.0);
        assert_eq!(list.track_count(), 3);
        assert_eq!(list.line_names.lines("a"), &[0, 1, 2]);
        assert_eq!(list.line_names.lines("b"), &[1, 2, 3]);
    }

    /// Auto-fill fits as many repetitions as the container allows.
    ///
    /// # Panics
    /// Panics if the repetition count is wrong.
    #[test]
    fn auto_fill_counts_repetitions_with_gaps() {
        let template = TrackTemplate {
            entries: vec![TrackListEntry::Repeat(TrackRepeat::new(
                RepeatCount::AutoFill,
                vec![GridTrackSize::minmax(
                    TrackBreadth::Length(200.0),
                    TrackBreadth::Flex(1.0),
                )],
            ))],
            line_names: vec![Vec::new(), Vec::new()],
        };
        // 2 * 200 + 10 = 410 <= 569 < 3 * 200 + 20
        let list = TrackList::from_template(&template, Some(569.0), 10.0);
        assert_eq!(list.track_count(), 2);

        let indefinite = TrackList::from_template(&template, None, 10.0);
        assert_eq!(indefinite.track_count(), 1);
    }

    /// Auto-fit tracks are tagged so they can collapse later.
    ///
    /// # Panics
    /// Panics if the track types are wrong.
    #[test]
    fn auto_fit_tracks_are_tagged() {
        let template = TrackTemplate {
            entries: vec![
                TrackListEntry::Track(GridTrackSize::px(40.0)),
                TrackListEntry::Repeat(TrackRepeat::new(
                    RepeatCount::AutoFit,
                    vec![GridTrackSize::px(100.0)],
                )),
            ],
            line_names: vec![Vec::new(); 3],
        };
        let list = TrackList::from_template(&template, Some(300.0), 0.0);
        assert_eq!(list.track_count(), 3);
        assert_eq!(
            list.tracks.get(0).map(|track| track.track_type),
            Some(TrackListType::Explicit)
        );
        assert_eq!(
            list.tracks.get(2).map(|track| track.track_type),
            Some(TrackListType::AutoFit)
        );
    }

    /// Named lines resolve by occurrence and extend into the implicit grid.
    ///
    /// # Panics
    /// Panics if a line resolves to the wrong coordinate.
    #[test]
    fn find_line_by_occurrence() {
        let template = TrackTemplate::from_sizes(vec![GridTrackSize::px(10.0); 3])
            .with_line_names(0, &["edge"])
            .with_line_names(3, &["edge"]);
        let list = TrackList::from_template(&template, None, 0.0);
        assert_eq!(list.find_line("edge", 1), 0);
        assert_eq!(list.find_line("edge", 2), 3);
        assert_eq!(list.find_line("edge", -1), 3);
        // Not enough named lines: implicit lines are assumed to carry the name.
        assert_eq!(list.find_line("edge", 4), 5);
        assert_eq!(list.find_line("edge", -3), -1);
        assert_eq!(list.find_line("missing", 1), 4);
    }

    /// Implicit tracks cycle the auto pattern in both directions.
    ///
    /// # Panics
    /// Panics if the cycling order is wrong.
    #[test]
    fn implicit_pattern_cycles() {
        let pattern = [GridTrackSize::px(10.0), GridTrackSize::px(20.0)];
        assert_eq!(implicit_track_size(&pattern, 0), GridTrackSize::px(10.0));
        assert_eq!(implicit_track_size(&pattern, 3), GridTrackSize::px(20.0));
        assert_eq!(implicit_track_size(&pattern, -1), GridTrackSize::px(20.0));
        assert_eq!(implicit_track_size(&pattern, -2), GridTrackSize::px(10.0));
        assert_eq!(implicit_track_size(&[], 5), GridTrackSize::AUTO);
    }
}
