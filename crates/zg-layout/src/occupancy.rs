// ABOUTME: Sparse occupancy grid of reserved cells.
// ABOUTME: Collision checks and row-major first-fit scanning for auto-placement.

use std::collections::HashSet;

/// Tracks which unit cells are reserved. Rows are unbounded; columns are
/// capped by the caller's column count. Holds no panel references.
#[derive(Debug, Default)]
pub struct OccupancyGrid {
    cells: HashSet<(i32, i32)>,
}

impl OccupancyGrid {
    pub fn new() -> Self {
        Self::default()
    }

    /// True if every cell covered by the span is free and indices are valid
    pub fn span_free(&self, row: i32, col: i32, row_span: i32, col_span: i32) -> bool {
        if row < 0 || col < 0 || row_span <= 0 || col_span <= 0 {
            return false;
        }
        for r in row..row + row_span {
            for c in col..col + col_span {
                if self.cells.contains(&(r, c)) {
                    return false;
                }
            }
        }
        true
    }

    /// Reserve the span. Fails without mutation if any covered cell is
    /// already reserved or the indices are negative.
    pub fn reserve(&mut self, row: i32, col: i32, row_span: i32, col_span: i32) -> bool {
        if !self.span_free(row, col, row_span, col_span) {
            return false;
        }
        for r in row..row + row_span {
            for c in col..col + col_span {
                self.cells.insert((r, c));
            }
        }
        true
    }

    pub fn release(&mut self, row: i32, col: i32, row_span: i32, col_span: i32) {
        for r in row..row + row_span {
            for c in col..col + col_span {
                self.cells.remove(&(r, c));
            }
        }
    }

    /// First top-left cell, scanning row-major from (0,0), whose full span
    /// is free. Rows grow without bound so a fit always exists; a span
    /// wider than the grid is clamped to the column count.
    pub fn find_first_fit(&self, row_span: i32, col_span: i32, column_count: i32) -> (i32, i32) {
        let column_count = column_count.max(1);
        let col_span = col_span.clamp(1, column_count);
        let row_span = row_span.max(1);
        let mut row = 0;
        loop {
            for col in 0..=(column_count - col_span) {
                if self.span_free(row, col, row_span, col_span) {
                    return (row, col);
                }
            }
            row += 1;
        }
    }

    pub fn clear(&mut self) {
        self.cells.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Number of rows in use (highest reserved row + 1)
    pub fn row_count(&self) -> i32 {
        self.cells.iter().map(|&(r, _)| r + 1).max().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reserve_then_collide() {
        let mut grid = OccupancyGrid::new();
        assert!(grid.reserve(0, 0, 1, 2));
        // Overlaps the second covered cell
        assert!(!grid.reserve(0, 1, 1, 1));
        // Failed reserve must not have mutated anything
        assert!(grid.span_free(0, 2, 1, 1));
        assert!(grid.reserve(0, 2, 1, 1));
    }

    #[test]
    fn negative_indices_rejected() {
        let mut grid = OccupancyGrid::new();
        assert!(!grid.reserve(-1, 0, 1, 1));
        assert!(!grid.reserve(0, -1, 1, 1));
        assert!(!grid.reserve(0, 0, 0, 1));
        assert!(grid.is_empty());
    }

    #[test]
    fn release_frees_cells() {
        let mut grid = OccupancyGrid::new();
        assert!(grid.reserve(1, 1, 2, 2));
        grid.release(1, 1, 2, 2);
        assert!(grid.is_empty());
        assert!(grid.reserve(1, 1, 2, 2));
    }

    #[test]
    fn first_fit_scans_row_major() {
        let mut grid = OccupancyGrid::new();
        assert!(grid.reserve(0, 0, 1, 1));
        assert!(grid.reserve(0, 2, 1, 1));
        // Columns: 0 used, 1 free, 2 used
        assert_eq!(grid.find_first_fit(1, 1, 3), (0, 1));
        // A 1x2 span cannot fit in row 0
        assert_eq!(grid.find_first_fit(1, 2, 3), (1, 0));
    }

    #[test]
    fn first_fit_grows_rows_without_bound() {
        let mut grid = OccupancyGrid::new();
        for col in 0..2 {
            assert!(grid.reserve(0, col, 1, 1));
            assert!(grid.reserve(1, col, 1, 1));
        }
        assert_eq!(grid.find_first_fit(1, 1, 2), (2, 0));
        assert_eq!(grid.row_count(), 2);
    }

    #[test]
    fn oversized_span_clamps_to_column_count() {
        let grid = OccupancyGrid::new();
        assert_eq!(grid.find_first_fit(1, 5, 3), (0, 0));
    }
}
