//! Named grid areas.
//!
//! Spec: §7.3 Named Areas: the grid-template-areas property
//! <https://www.w3.org/TR/css-grid-2/#grid-template-areas-property>

use crate::types::GridAxis;

/// A named rectangle of cells; lines are 0-based and end-exclusive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridTemplateArea {
    /// Area name
    pub name: String,
    /// First row line
    pub row_start: usize,
    /// Last row line
    pub row_end: usize,
    /// First column line
    pub column_start: usize,
    /// Last column line
    pub column_end: usize,
}

impl GridTemplateArea {
    /// `(start, end)` lines along an axis.
    pub fn lines(&self, axis: GridAxis) -> (usize, usize) {
        match axis {
            GridAxis::Row => (self.row_start, self.row_end),
            GridAxis::Column => (self.column_start, self.column_end),
        }
    }
}

/// Validated value of `grid-template-areas`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GridTemplateAreas {
    row_count: usize,
    column_count: usize,
    areas: Vec<GridTemplateArea>,
}

impl GridTemplateAreas {
    /// Build from the row strings, e.g. `["a a b", "c c b"]`.
    ///
    /// Returns `None` when rows have different cell counts or an area is not
    /// a single filled rectangle; the declaration is then invalid.
    pub fn from_rows<S: AsRef<str>>(rows: &[S]) -> Option<Self> {
        let cells: Vec<Vec<Option<&str>>> = rows
            .iter()
            .map(|row| {
                row.as_ref()
                    .split_whitespace()
                    .map(|token| (!token.chars().all(|ch| ch == '.')).then_some(token))
                    .collect()
            })
            .collect();

        let column_count = cells.first().map_or(0, Vec::len);
        if column_count == 0 || cells.iter().any(|row| row.len() != column_count) {
            log::warn!(target: "css::grid::parse", "grid-template-areas rows have unequal or zero cell counts");
            return None;
        }

        let mut areas: Vec<GridTemplateArea> = Vec::new();
        for (row_index, row) in cells.iter().enumerate() {
            for (column_index, cell) in row.iter().enumerate() {
                let Some(name) = cell else {
                    continue;
                };
                if let Some(area) = areas.iter_mut().find(|area| area.name == *name) {
                    area.row_start = area.row_start.min(row_index);
                    area.row_end = area.row_end.max(row_index + 1);
                    area.column_start = area.column_start.min(column_index);
                    area.column_end = area.column_end.max(column_index + 1);
                } else {
                    areas.push(GridTemplateArea {
                        name: (*name).to_owned(),
                        row_start: row_index,
                        row_end: row_index + 1,
                        column_start: column_index,
                        column_end: column_index + 1,
                    });
                }
            }
        }

        for area in &areas {
            let filled = (area.row_start..area.row_end).all(|row_index| {
                (area.column_start..area.column_end).all(|column_index| {
                    cells
                        .get(row_index)
                        .and_then(|row| row.get(column_index))
                        .is_some_and(|cell| *cell == Some(area.name.as_str()))
                })
            });
            if !filled {
                log::warn!(target: "css::grid::parse", "grid area '{}' is not rectangular", area.name);
                return None;
            }
        }

        Some(Self {
            row_count: cells.len(),
            column_count,
            areas,
        })
    }

    /// Number of rows in the area matrix.
    pub fn row_count(&self) -> usize {
        self.row_count
    }

    /// Number of columns in the area matrix.
    pub fn column_count(&self) -> usize {
        self.column_count
    }

    /// Number of tracks the matrix spans along an axis.
    pub fn track_count(&self, axis: GridAxis) -> usize {
        match axis {
            GridAxis::Row => self.row_count,
            GridAxis::Column => self.column_count,
        }
    }

    /// The named areas.
    pub fn areas(&self) -> &[GridTemplateArea] {
        &self.areas
    }

    /// Look up an area by name.
    pub fn area(&self, name: &str) -> Option<&GridTemplateArea> {
        self.areas.iter().find(|area| area.name == name)
    }
}
