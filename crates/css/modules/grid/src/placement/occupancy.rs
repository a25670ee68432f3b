//! Cell occupancy matrix used by auto-placement.

use std::ops::Range;

/// Growable matrix of occupied grid cells, indexed `[row][column]`.
///
/// Cells outside the allocated matrix are free; occupying them grows it.
#[derive(Debug, Clone, Default)]
pub struct CellOccupancy {
    rows: Vec<Vec<bool>>,
}

impl CellOccupancy {
    /// Create an empty matrix.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check that no cell of the area is occupied.
    pub fn is_area_free(&self, rows: Range<usize>, columns: Range<usize>) -> bool {
        rows.into_iter().all(|row| {
            self.rows.get(row).is_none_or(|cells| {
                columns
                    .clone()
                    .all(|column| !cells.get(column).copied().unwrap_or(false))
            })
        })
    }

    /// Mark every cell of the area as occupied.
    pub fn occupy(&mut self, rows: Range<usize>, columns: Range<usize>) {
        if self.rows.len() < rows.end {
            self.rows.resize_with(rows.end, Vec::new);
        }
        for row in rows {
            let Some(cells) = self.rows.get_mut(row) else {
                continue;
            };
            if cells.len() < columns.end {
                cells.resize(columns.end, false);
            }
            for column in columns.clone() {
                if let Some(cell) = cells.get_mut(column) {
                    *cell = true;
                }
            }
        }
    }

    /// Number of rows holding at least one allocated cell.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Occupying an area makes overlapping areas unavailable.
    ///
    /// # Panics
    /// Panics if the occupancy check is wrong.
    #[test]
    fn occupied_cells_block_overlaps() {
        let mut occupancy = CellOccupancy::new();
        occupancy.occupy(1..3, 2..4);
        assert_eq!(occupancy.row_count(), 3);
        assert!(!occupancy.is_area_free(2..3, 3..5));
        assert!(occupancy.is_area_free(0..1, 0..10));
        assert!(occupancy.is_area_free(1..3, 0..2));
        assert!(occupancy.is_area_free(5..9, 2..4));
    }
}
