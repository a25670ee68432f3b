//! Grid item placement algorithm.
//!
//! Spec: §8 Placing Grid Items
//! <https://www.w3.org/TR/css-grid-2/#placement>

mod occupancy;
mod parser;

use std::cmp::Ordering;
use std::ops::Range;

use serde::{Deserialize, Serialize};

use crate::track_list::TrackList;
use crate::types::{GridAutoFlow, GridAxis};

pub use occupancy::CellOccupancy;
pub use parser::{parse_grid_area, parse_grid_line, parse_line_pair};

/// One edge of a grid item's placement (`grid-row-start` etc.).
///
/// Spec: §8.3 Line-based Placement
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GridLine {
    /// `auto`
    #[default]
    Auto,
    /// `<integer>`; negative values count from the end of the explicit grid
    Line(i32),
    /// `<custom-ident> [<integer>]`
    Named(String, Option<i32>),
    /// `span <integer>`
    Span(u32),
    /// `span <custom-ident> [<integer>]`
    NamedSpan(String, u32),
}

impl GridLine {
    /// Check if this is `auto`.
    pub fn is_auto(&self) -> bool {
        matches!(self, Self::Auto)
    }
}

/// Declared placement of a grid item on both axes.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GridPlacement {
    /// grid-row-start
    pub row_start: GridLine,
    /// grid-row-end
    pub row_end: GridLine,
    /// grid-column-start
    pub column_start: GridLine,
    /// grid-column-end
    pub column_end: GridLine,
}

impl GridPlacement {
    /// Fully automatic placement.
    pub fn auto() -> Self {
        Self::default()
    }

    /// Placement from `grid-row` / `grid-column` pairs.
    pub fn new(row: (GridLine, GridLine), column: (GridLine, GridLine)) -> Self {
        Self {
            row_start: row.0,
            row_end: row.1,
            column_start: column.0,
            column_end: column.1,
        }
    }

    /// `(start, end)` edges along an axis.
    pub fn axis(&self, axis: GridAxis) -> (&GridLine, &GridLine) {
        match axis {
            GridAxis::Row => (&self.row_start, &self.row_end),
            GridAxis::Column => (&self.column_start, &self.column_end),
        }
    }
}

/// Area occupied by a grid item (row/column span).
///
/// Lines are 1-indexed within the full grid, leading implicit tracks included.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridArea {
    /// Row start line (1-indexed)
    pub row_start: usize,
    /// Row end line (1-indexed, exclusive)
    pub row_end: usize,
    /// Column start line (1-indexed)
    pub col_start: usize,
    /// Column end line (1-indexed, exclusive)
    pub col_end: usize,
}

impl GridArea {
    /// Create a new grid area.
    pub fn new(row_start: usize, row_end: usize, col_start: usize, col_end: usize) -> Self {
        Self {
            row_start,
            row_end,
            col_start,
            col_end,
        }
    }

    /// Get the row span (number of rows occupied).
    pub fn row_span(&self) -> usize {
        self.row_end.saturating_sub(self.row_start)
    }

    /// Get the column span (number of columns occupied).
    pub fn col_span(&self) -> usize {
        self.col_end.saturating_sub(self.col_start)
    }

    /// 0-based track range covered along an axis.
    pub fn tracks(&self, axis: GridAxis) -> Range<usize> {
        match axis {
            GridAxis::Row => self.row_start.saturating_sub(1)..self.row_end.saturating_sub(1),
            GridAxis::Column => self.col_start.saturating_sub(1)..self.col_end.saturating_sub(1),
        }
    }

    /// Check if this area overlaps with another area.
    pub fn overlaps(&self, other: &Self) -> bool {
        self.row_start < other.row_end
            && self.row_end > other.row_start
            && self.col_start < other.col_end
            && self.col_end > other.col_start
    }

    fn from_tracks(rows: &Range<usize>, columns: &Range<usize>) -> Self {
        Self::new(rows.start + 1, rows.end + 1, columns.start + 1, columns.end + 1)
    }
}

/// Track counts of one axis after placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ImplicitTrackCounts {
    /// Implicit tracks before the explicit grid
    pub leading: usize,
    /// Explicit tracks
    pub explicit: usize,
    /// Implicit tracks after the explicit grid
    pub trailing: usize,
}

impl ImplicitTrackCounts {
    /// Total number of tracks.
    pub fn total(&self) -> usize {
        self.leading + self.explicit + self.trailing
    }
}

/// Options controlling placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PlacementOptions {
    /// grid-auto-flow
    pub auto_flow: GridAutoFlow,
    /// Column axis is subgridded: no implicit columns, lines are clamped
    pub fixed_columns: bool,
    /// Row axis is subgridded: no implicit rows, lines are clamped
    pub fixed_rows: bool,
}

impl PlacementOptions {
    fn is_fixed(&self, axis: GridAxis) -> bool {
        match axis {
            GridAxis::Row => self.fixed_rows,
            GridAxis::Column => self.fixed_columns,
        }
    }
}

/// Result of the placement algorithm.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PlacementResult {
    /// One area per item, in item order
    pub areas: Vec<GridArea>,
    /// Column track counts
    pub columns: ImplicitTrackCounts,
    /// Row track counts
    pub rows: ImplicitTrackCounts,
}

impl PlacementResult {
    /// Track counts along an axis.
    pub fn counts(&self, axis: GridAxis) -> ImplicitTrackCounts {
        match axis {
            GridAxis::Row => self.rows,
            GridAxis::Column => self.columns,
        }
    }
}

/// Which edge a line reference sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LineEdge {
    Start,
    End,
}

/// Placement of an item along one axis after line resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
enum AxisPlacement {
    /// Signed, 0-based lines relative to the explicit grid start
    Definite { start: i32, end: i32 },
    /// Auto-placed with the given span
    Auto { span: usize },
}

/// Placement of an item along one axis in full-grid track coordinates.
#[derive(Debug, Clone, PartialEq, Eq)]
enum AxisSlot {
    Definite(Range<usize>),
    Auto(usize),
}

impl AxisSlot {
    fn span(&self) -> usize {
        match self {
            Self::Definite(range) => range.len(),
            Self::Auto(span) => *span,
        }
    }

    fn range(&self) -> Option<Range<usize>> {
        match self {
            Self::Definite(range) => Some(range.clone()),
            Self::Auto(_) => None,
        }
    }
}

fn span_len(span: u32) -> i32 {
    i32::try_from(span.max(1)).unwrap_or(i32::MAX)
}

/// Resolve a non-span line reference to a signed 0-based line.
fn resolve_line(line: &GridLine, lines: &TrackList, edge: LineEdge) -> Option<i32> {
    match line {
        GridLine::Line(index) if *index > 0 => Some(index - 1),
        GridLine::Line(index) if *index < 0 => {
            let line_count = i32::try_from(lines.line_count()).unwrap_or(i32::MAX);
            Some(line_count + index)
        }
        GridLine::Named(name, None) => {
            let suffix = match edge {
                LineEdge::Start => "start",
                LineEdge::End => "end",
            };
            let area_line = format!("{name}-{suffix}");
            if lines.line_names.contains(&area_line) {
                Some(lines.find_line(&area_line, 1))
            } else {
                Some(lines.find_line(name, 1))
            }
        }
        GridLine::Named(name, Some(occurrence)) if *occurrence != 0 => {
            Some(lines.find_line(name, *occurrence))
        }
        _ => None,
    }
}

/// Line reached by spanning forward from `from` to the `count`-th line named `name`.
fn named_span_forward(lines: &TrackList, name: &str, count: u32, from: i32) -> i32 {
    let mut remaining = i32::try_from(count.max(1)).unwrap_or(i32::MAX);
    for line in lines.line_names.lines(name) {
        let line = *line as i32;
        if line > from {
            remaining -= 1;
            if remaining == 0 {
                return line;
            }
        }
    }
    // Implicit lines after the explicit grid carry every name.
    from.max(lines.track_count() as i32) + remaining
}

/// Line reached by spanning backward from `from` to the `count`-th line named `name`.
fn named_span_backward(lines: &TrackList, name: &str, count: u32, from: i32) -> i32 {
    let mut remaining = i32::try_from(count.max(1)).unwrap_or(i32::MAX);
    for line in lines.line_names.lines(name).iter().rev() {
        let line = *line as i32;
        if line < from {
            remaining -= 1;
            if remaining == 0 {
                return line;
            }
        }
    }
    from.min(0) - remaining
}

/// Resolve both edges of one axis.
///
/// Spec: §8.3.1 Grid Placement Conflict Handling
fn resolve_axis(start: &GridLine, end: &GridLine, lines: &TrackList) -> AxisPlacement {
    let start_line = resolve_line(start, lines, LineEdge::Start);
    let end_line = resolve_line(end, lines, LineEdge::End);

    match (start_line, end_line) {
        (Some(start_line), Some(end_line)) => match start_line.cmp(&end_line) {
            Ordering::Less => AxisPlacement::Definite {
                start: start_line,
                end: end_line,
            },
            Ordering::Greater => AxisPlacement::Definite {
                start: end_line,
                end: start_line,
            },
            Ordering::Equal => AxisPlacement::Definite {
                start: start_line,
                end: start_line + 1,
            },
        },
        (Some(start_line), None) => {
            let end_line = match end {
                GridLine::Span(span) => start_line + span_len(*span),
                GridLine::NamedSpan(name, count) => {
                    named_span_forward(lines, name, *count, start_line)
                }
                _ => start_line + 1,
            };
            AxisPlacement::Definite {
                start: start_line,
                end: end_line,
            }
        }
        (None, Some(end_line)) => {
            let start_line = match start {
                GridLine::Span(span) => end_line - span_len(*span),
                GridLine::NamedSpan(name, count) => {
                    named_span_backward(lines, name, *count, end_line)
                }
                _ => end_line - 1,
            };
            AxisPlacement::Definite {
                start: start_line,
                end: end_line,
            }
        }
        (None, None) => {
            // Two spans: the end one is ignored. A named span without a
            // definite line to search from spans a single track.
            let span = match (start, end) {
                (GridLine::Span(span), _) | (GridLine::Auto, GridLine::Span(span)) => *span,
                _ => 1,
            };
            AxisPlacement::Auto {
                span: span.max(1) as usize,
            }
        }
    }
}

/// Clamp a placement into a subgridded axis of `count` tracks.
fn clamp_axis(placement: AxisPlacement, count: usize) -> AxisPlacement {
    let count = count.max(1);
    match placement {
        AxisPlacement::Definite { start, end } => {
            let last = i32::try_from(count).unwrap_or(i32::MAX);
            let start = start.clamp(0, last - 1);
            let end = end.clamp(start + 1, last);
            AxisPlacement::Definite { start, end }
        }
        AxisPlacement::Auto { span } => AxisPlacement::Auto {
            span: span.min(count),
        },
    }
}

/// Map `(major, minor)` ranges of the flow to `(rows, columns)`.
fn to_grid(
    primary: GridAxis,
    major: Range<usize>,
    minor: Range<usize>,
) -> (Range<usize>, Range<usize>) {
    match primary {
        GridAxis::Column => (major, minor),
        GridAxis::Row => (minor, major),
    }
}

/// Place grid items according to the grid placement algorithm.
///
/// Spec: §8.5 Grid Item Placement Algorithm
/// <https://www.w3.org/TR/css-grid-2/#auto-placement-algo>
///
/// Items with definite positions on both axes are placed first, then items
/// locked to a row (column for column flow), then everything else in order
/// with the auto-placement cursor. Sparse packing never moves the cursor
/// backwards; dense packing restarts from the grid origin for every item.
/// Lines outside the explicit grid add implicit tracks on either side.
pub fn place_grid_items(
    placements: &[GridPlacement],
    columns: &TrackList,
    rows: &TrackList,
    options: PlacementOptions,
) -> PlacementResult {
    let primary = options.auto_flow.primary_axis();
    let major = primary.other();
    let dense = options.auto_flow.is_dense();
    let lines_for = |axis: GridAxis| match axis {
        GridAxis::Row => rows,
        GridAxis::Column => columns,
    };

    // Resolve every item on both axes in signed explicit-grid coordinates.
    let resolved: Vec<[AxisPlacement; 2]> = placements
        .iter()
        .map(|placement| {
            [major, primary].map(|axis| {
                let (start, end) = placement.axis(axis);
                let lines = lines_for(axis);
                let axis_placement = resolve_axis(start, end, lines);
                if options.is_fixed(axis) {
                    clamp_axis(axis_placement, lines.track_count())
                } else {
                    axis_placement
                }
            })
        })
        .collect();

    // Leading implicit tracks shift the whole grid so indices are non-negative.
    let leading = |slot: usize| {
        let min_start = resolved
            .iter()
            .filter_map(|axes| match axes.get(slot) {
                Some(AxisPlacement::Definite { start, .. }) => Some(*start),
                _ => None,
            })
            .min()
            .unwrap_or(0);
        usize::try_from(-min_start).unwrap_or(0)
    };
    let major_leading = leading(0);
    let minor_leading = leading(1);

    let to_slot = |placement: &AxisPlacement, offset: usize| match placement {
        AxisPlacement::Definite { start, end } => {
            let shift = |line: i32| usize::try_from(i64::from(line) + offset as i64).unwrap_or(0);
            AxisSlot::Definite(shift(*start)..shift(*end))
        }
        AxisPlacement::Auto { span } => AxisSlot::Auto(*span),
    };
    let slots: Vec<(AxisSlot, AxisSlot)> = resolved
        .iter()
        .map(|axes| {
            let [major_axis, minor_axis] = axes;
            (
                to_slot(major_axis, major_leading),
                to_slot(minor_axis, minor_leading),
            )
        })
        .collect();

    let explicit_major = lines_for(major).track_count();
    let explicit_minor = lines_for(primary).track_count();
    let fixed_major = options.is_fixed(major).then_some(explicit_major);
    let fixed_minor = options.is_fixed(primary);

    let mut occupancy = CellOccupancy::new();
    let mut placed: Vec<Option<(Range<usize>, Range<usize>)>> = vec![None; slots.len()];
    let occupy = |occupancy: &mut CellOccupancy, major_range: &Range<usize>, minor_range: &Range<usize>| {
        let (row_range, column_range) = to_grid(primary, major_range.clone(), minor_range.clone());
        occupancy.occupy(row_range, column_range);
    };
    let is_free = |occupancy: &CellOccupancy, major_range: &Range<usize>, minor_range: &Range<usize>| {
        let (row_range, column_range) = to_grid(primary, major_range.clone(), minor_range.clone());
        occupancy.is_area_free(row_range, column_range)
    };

    // 1. Items with definite positions on both axes.
    for (index, (major_slot, minor_slot)) in slots.iter().enumerate() {
        if let (Some(major_range), Some(minor_range)) = (major_slot.range(), minor_slot.range()) {
            occupy(&mut occupancy, &major_range, &minor_range);
            if let Some(slot) = placed.get_mut(index) {
                *slot = Some((major_range, minor_range));
            }
        }
    }

    // 2. Items locked to a major track: search along the minor axis.
    let mut minor_limit = explicit_minor + minor_leading;
    let mut lane_cursors: Vec<(usize, usize)> = Vec::new();
    for (index, (major_slot, minor_slot)) in slots.iter().enumerate() {
        let (Some(major_range), AxisSlot::Auto(span)) = (major_slot.range(), minor_slot) else {
            continue;
        };
        let lane = major_range.start;
        let start_from = if dense {
            0
        } else {
            lane_cursors
                .iter()
                .find(|(cursor_lane, _)| *cursor_lane == lane)
                .map_or(0, |(_, cursor)| *cursor)
        };
        let mut minor_start = start_from;
        loop {
            if fixed_minor && minor_start + span > explicit_minor {
                minor_start = explicit_minor.saturating_sub(*span);
                break;
            }
            if is_free(&occupancy, &major_range, &(minor_start..minor_start + span)) {
                break;
            }
            minor_start += 1;
        }
        let minor_range = minor_start..minor_start + span;
        occupy(&mut occupancy, &major_range, &minor_range);
        match lane_cursors.iter_mut().find(|(cursor_lane, _)| *cursor_lane == lane) {
            Some(entry) => entry.1 = minor_range.end,
            None => lane_cursors.push((lane, minor_range.end)),
        }
        if let Some(slot) = placed.get_mut(index) {
            *slot = Some((major_range, minor_range));
        }
    }

    // 3. Size the minor axis of the implicit grid.
    for (_, minor_slot) in &slots {
        minor_limit = minor_limit.max(minor_slot.span());
    }
    if !fixed_minor {
        for (_, minor_range) in placed.iter().flatten() {
            minor_limit = minor_limit.max(minor_range.end);
        }
        // Definite minor lines of items still waiting for a major position.
        for (_, minor_slot) in &slots {
            if let Some(minor_range) = minor_slot.range() {
                minor_limit = minor_limit.max(minor_range.end);
            }
        }
    }

    // 4. Everything else, with the auto-placement cursor.
    let mut cursor_major = 0usize;
    let mut cursor_minor = 0usize;
    for (index, (major_slot, minor_slot)) in slots.iter().enumerate() {
        if placed.get(index).is_some_and(Option::is_some) {
            continue;
        }
        let AxisSlot::Auto(major_span) = *major_slot else {
            continue;
        };
        let fits_major = |start: usize| fixed_major.is_none_or(|count| start + major_span <= count);

        let (major_range, minor_range) = match minor_slot.range() {
            Some(minor_range) => {
                let mut major_start = if dense {
                    0
                } else {
                    if minor_range.start < cursor_minor {
                        cursor_major += 1;
                    }
                    cursor_major
                };
                loop {
                    if !fits_major(major_start) {
                        major_start = fixed_major.unwrap_or(0).saturating_sub(major_span);
                        break;
                    }
                    if is_free(&occupancy, &(major_start..major_start + major_span), &minor_range) {
                        break;
                    }
                    major_start += 1;
                }
                if !dense {
                    cursor_major = major_start;
                    cursor_minor = minor_range.start;
                }
                (major_start..major_start + major_span, minor_range)
            }
            None => {
                let minor_span = minor_slot.span();
                let (mut major_start, mut minor_start) = if dense {
                    (0, 0)
                } else {
                    (cursor_major, cursor_minor)
                };
                loop {
                    if minor_start + minor_span > minor_limit {
                        major_start += 1;
                        minor_start = 0;
                        continue;
                    }
                    if !fits_major(major_start) {
                        major_start = fixed_major.unwrap_or(0).saturating_sub(major_span);
                        minor_start = 0;
                        break;
                    }
                    if is_free(
                        &occupancy,
                        &(major_start..major_start + major_span),
                        &(minor_start..minor_start + minor_span),
                    ) {
                        break;
                    }
                    minor_start += 1;
                }
                if !dense {
                    cursor_major = major_start;
                    cursor_minor = minor_start;
                }
                (
                    major_start..major_start + major_span,
                    minor_start..minor_start + minor_span,
                )
            }
        };
        occupy(&mut occupancy, &major_range, &minor_range);
        if let Some(slot) = placed.get_mut(index) {
            *slot = Some((major_range, minor_range));
        }
    }

    // Final track counts on both axes.
    let mut major_total = explicit_major + major_leading;
    let mut minor_total = minor_limit;
    for (major_range, minor_range) in placed.iter().flatten() {
        major_total = major_total.max(major_range.end);
        minor_total = minor_total.max(minor_range.end);
    }
    let counts = |leading_count: usize, explicit: usize, total: usize| ImplicitTrackCounts {
        leading: leading_count,
        explicit,
        trailing: total.saturating_sub(leading_count + explicit),
    };
    let major_counts = counts(major_leading, explicit_major, major_total);
    let minor_counts = counts(minor_leading, explicit_minor, minor_total);

    let areas: Vec<GridArea> = placed
        .into_iter()
        .map(|slot| {
            let (major_range, minor_range) = slot.unwrap_or((0..1, 0..1));
            let (row_range, column_range) = to_grid(primary, major_range, minor_range);
            GridArea::from_tracks(&row_range, &column_range)
        })
        .collect();

    let (row_counts, column_counts) = match primary {
        GridAxis::Column => (major_counts, minor_counts),
        GridAxis::Row => (minor_counts, major_counts),
    };

    tracing::debug!(
        "placed {} grid items: {} columns ({} leading), {} rows ({} leading)",
        areas.len(),
        column_counts.total(),
        column_counts.leading,
        row_counts.total(),
        row_counts.leading
    );

    PlacementResult {
        areas,
        columns: column_counts,
        rows: row_counts,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::track_list::TrackTemplate;
    use crate::types::GridTrackSize;

    fn explicit(count: usize) -> TrackList {
        TrackList::from_template(
            &TrackTemplate::from_sizes(vec![GridTrackSize::px(10.0); count]),
            None,
            0.0,
        )
    }

    fn options(auto_flow: GridAutoFlow) -> PlacementOptions {
        PlacementOptions {
            auto_flow,
            ..PlacementOptions::default()
        }
    }

    /// Test grid area span calculation.
    ///
    /// # Panics
    /// Panics if assertions fail.
    #[test]
    fn test_grid_area_span() {
        let area = GridArea::new(1, 3, 2, 5);
        assert_eq!(area.row_span(), 2);
        assert_eq!(area.col_span(), 3);
        assert_eq!(area.tracks(GridAxis::Column), 1..4);
    }

    /// Test grid area overlap detection.
    ///
    /// # Panics
    /// Panics if assertions fail.
    #[test]
    fn test_grid_area_overlaps() {
        let area1 = GridArea::new(1, 3, 1, 3);
        let area2 = GridArea::new(2, 4, 2, 4);
        let area3 = GridArea::new(4, 5, 4, 5);

        assert!(area1.overlaps(&area2));
        assert!(area2.overlaps(&area1));
        assert!(!area1.overlaps(&area3));
        assert!(!area3.overlaps(&area1));
    }

    /// Auto items fill rows in order and wrap.
    ///
    /// # Panics
    /// Panics if placement is wrong.
    #[test]
    fn test_place_grid_items_basic() {
        let items = vec![GridPlacement::auto(); 3];
        let result = place_grid_items(&items, &explicit(2), &explicit(2), options(GridAutoFlow::Row));

        assert_eq!(
            result.areas,
            vec![
                GridArea::new(1, 2, 1, 2),
                GridArea::new(1, 2, 2, 3),
                GridArea::new(2, 3, 1, 2)
            ]
        );
    }

    /// Implicit columns from a definite column line are open to auto items.
    ///
    /// # Panics
    /// Panics if an auto item wraps before the implicit columns are used.
    #[test]
    fn definite_columns_widen_the_auto_flow() {
        let fourth_column = GridPlacement::new(
            (GridLine::Auto, GridLine::Auto),
            (GridLine::Line(4), GridLine::Auto),
        );
        let mut items = vec![GridPlacement::auto(); 3];
        items.push(fourth_column);
        let result = place_grid_items(&items, &explicit(2), &explicit(1), options(GridAutoFlow::Row));

        let cells: Vec<_> = result
            .areas
            .iter()
            .map(|area| (area.row_start, area.col_start))
            .collect();
        assert_eq!(cells, vec![(1, 1), (1, 2), (1, 3), (1, 4)]);
        assert_eq!(result.columns.trailing, 2);
        assert_eq!(result.rows.total(), 1);
    }

    /// Column flow fills columns first and adds implicit columns.
    ///
    /// # Panics
    /// Panics if placement is wrong.
    #[test]
    fn column_flow_fills_columns() {
        let items = vec![GridPlacement::auto(); 3];
        let result = place_grid_items(&items, &explicit(1), &explicit(2), options(GridAutoFlow::Column));
        assert_eq!(result.areas.get(2).copied(), Some(GridArea::new(1, 2, 2, 3)));
        assert_eq!(result.columns.trailing, 1);
    }

    /// Negative lines count from the end; lines before the grid add leading tracks.
    ///
    /// # Panics
    /// Panics if the lines resolve incorrectly.
    #[test]
    fn negative_lines_and_leading_tracks() {
        let last = GridPlacement::new(
            (GridLine::Auto, GridLine::Auto),
            (GridLine::Line(-1), GridLine::Auto),
        );
        let result = place_grid_items(&[last], &explicit(3), &explicit(1), options(GridAutoFlow::Row));
        // -1 is line 4; the item spans the first implicit column.
        assert_eq!(result.areas.first().map(|area| area.col_start), Some(4));
        assert_eq!(result.columns.trailing, 1);

        let before = GridPlacement::new(
            (GridLine::Line(1), GridLine::Auto),
            (GridLine::Line(-6), GridLine::Line(1)),
        );
        let shifted = place_grid_items(&[before], &explicit(3), &explicit(1), options(GridAutoFlow::Row));
        assert_eq!(shifted.columns.leading, 2);
        assert_eq!(shifted.areas.first().copied(), Some(GridArea::new(1, 2, 1, 3)));
    }

    /// Sparse packing never backfills; dense packing does.
    ///
    /// # Panics
    /// Panics if packing order is wrong.
    #[test]
    fn dense_packing_backfills_holes() {
        let wide = GridPlacement::new(
            (GridLine::Auto, GridLine::Auto),
            (GridLine::Span(2), GridLine::Auto),
        );
        let items = vec![GridPlacement::auto(), wide, GridPlacement::auto()];

        let sparse = place_grid_items(&items, &explicit(2), &TrackList::default(), options(GridAutoFlow::Row));
        assert_eq!(sparse.areas.get(2).copied(), Some(GridArea::new(3, 4, 1, 2)));

        let dense = place_grid_items(&items, &explicit(2), &TrackList::default(), options(GridAutoFlow::RowDense));
        assert_eq!(dense.areas.get(1).copied(), Some(GridArea::new(2, 3, 1, 3)));
        assert_eq!(dense.areas.get(2).copied(), Some(GridArea::new(1, 2, 2, 3)));
    }

    /// Items locked to a row are placed before fully automatic ones.
    ///
    /// # Panics
    /// Panics if the locked item is not honoured.
    #[test]
    fn row_locked_items_go_first() {
        let locked = GridPlacement::new(
            (GridLine::Line(1), GridLine::Auto),
            (GridLine::Auto, GridLine::Auto),
        );
        let items = vec![GridPlacement::auto(), locked];
        let result = place_grid_items(&items, &explicit(2), &explicit(1), options(GridAutoFlow::Row));
        assert_eq!(result.areas.get(1).copied(), Some(GridArea::new(1, 2, 1, 2)));
        assert_eq!(result.areas.first().copied(), Some(GridArea::new(1, 2, 2, 3)));
    }

    /// Named spans and area lines resolve through the line name map.
    ///
    /// # Panics
    /// Panics if names resolve to the wrong lines.
    #[test]
    fn named_lines_and_spans() {
        let columns = TrackList::from_template(
            &TrackTemplate::from_sizes(vec![GridTrackSize::px(10.0); 4])
                .with_line_names(1, &["main-start", "gutter"])
                .with_line_names(3, &["gutter"]),
            None,
            0.0,
        );
        let item = GridPlacement::new(
            (GridLine::Auto, GridLine::Auto),
            (
                GridLine::Named("main".to_owned(), None),
                GridLine::NamedSpan("gutter".to_owned(), 1),
            ),
        );
        let result = place_grid_items(&[item], &columns, &explicit(1), options(GridAutoFlow::Row));
        assert_eq!(result.areas.first().map(|area| (area.col_start, area.col_end)), Some((2, 4)));
    }

    /// Subgridded axes clamp lines instead of growing implicit tracks.
    ///
    /// # Panics
    /// Panics if an implicit track is created.
    #[test]
    fn fixed_axis_clamps_lines() {
        let item = GridPlacement::new(
            (GridLine::Auto, GridLine::Auto),
            (GridLine::Line(2), GridLine::Line(9)),
        );
        let result = place_grid_items(
            &[item],
            &explicit(3),
            &explicit(1),
            PlacementOptions {
                fixed_columns: true,
                ..PlacementOptions::default()
            },
        );
        assert_eq!(result.columns.total(), 3);
        assert_eq!(result.areas.first().map(|area| (area.col_start, area.col_end)), Some((2, 4)));
    }
}
