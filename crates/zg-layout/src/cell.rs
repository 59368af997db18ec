// ABOUTME: Grid cell assignments and cell-to-rect conversion.
// ABOUTME: The -1 sentinel marks a panel as unassigned, to be auto-placed.

use zg_core::Rect;

/// A panel's position and span in the grid. Row/column of -1 means
/// "unassigned, auto-place".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellAssignment {
    pub row: i32,
    pub col: i32,
    pub row_span: i32,
    pub col_span: i32,
}

impl CellAssignment {
    /// Sentinel for auto-placement with a 1x1 span
    pub const AUTO: CellAssignment = CellAssignment {
        row: -1,
        col: -1,
        row_span: 1,
        col_span: 1,
    };

    pub const fn new(row: i32, col: i32, row_span: i32, col_span: i32) -> Self {
        Self {
            row,
            col,
            row_span,
            col_span,
        }
    }

    /// Auto-place with an explicit span
    pub const fn auto_span(row_span: i32, col_span: i32) -> Self {
        Self::new(-1, -1, row_span, col_span)
    }

    pub fn is_auto(&self) -> bool {
        self.row < 0 || self.col < 0
    }

    /// Assigned position with positive spans
    pub fn is_valid(&self) -> bool {
        self.row >= 0 && self.col >= 0 && self.row_span > 0 && self.col_span > 0
    }
}

impl Default for CellAssignment {
    fn default() -> Self {
        Self::AUTO
    }
}

/// Compute the rectangle a cell assignment occupies inside `content`
/// (the container rect already inset by margins). Unit cells divide the
/// content evenly; spans absorb the spacing between the cells they cover.
pub fn cell_rect(
    content: Rect,
    cell: CellAssignment,
    column_count: i32,
    row_count: i32,
    spacing: f32,
) -> Rect {
    let cols = column_count.max(1) as f32;
    let rows = row_count.max(1) as f32;
    let cell_w = (content.width - (cols - 1.0) * spacing) / cols;
    let cell_h = (content.height - (rows - 1.0) * spacing) / rows;

    let col = cell.col.max(0) as f32;
    let row = cell.row.max(0) as f32;
    let col_span = cell.col_span.max(1) as f32;
    let row_span = cell.row_span.max(1) as f32;

    Rect::new(
        content.x + col * (cell_w + spacing),
        content.y + row * (cell_h + spacing),
        col_span * cell_w + (col_span - 1.0) * spacing,
        row_span * cell_h + (row_span - 1.0) * spacing,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auto_sentinel_is_auto() {
        assert!(CellAssignment::AUTO.is_auto());
        assert!(!CellAssignment::AUTO.is_valid());
        assert!(CellAssignment::new(0, 0, 1, 1).is_valid());
        assert!(!CellAssignment::new(0, 0, 0, 1).is_valid());
    }

    #[test]
    fn unit_cells_tile_the_content() {
        let content = Rect::new(0.0, 0.0, 310.0, 100.0);
        // 3 columns, 10.0 spacing: each cell 96.666 wide
        let a = cell_rect(content, CellAssignment::new(0, 0, 1, 1), 3, 1, 10.0);
        let b = cell_rect(content, CellAssignment::new(0, 1, 1, 1), 3, 1, 10.0);
        assert!((a.width - 96.666_67).abs() < 1e-3);
        assert!((b.x - (a.x + a.width + 10.0)).abs() < 1e-3);
    }

    #[test]
    fn span_absorbs_inner_spacing() {
        let content = Rect::new(0.0, 0.0, 310.0, 100.0);
        let spanned = cell_rect(content, CellAssignment::new(0, 0, 1, 2), 3, 1, 10.0);
        let unit = cell_rect(content, CellAssignment::new(0, 0, 1, 1), 3, 1, 10.0);
        assert!((spanned.width - (unit.width * 2.0 + 10.0)).abs() < 1e-3);
    }

    #[test]
    fn second_row_offsets_by_height_and_spacing() {
        let content = Rect::new(0.0, 0.0, 300.0, 210.0);
        let top = cell_rect(content, CellAssignment::new(0, 0, 1, 1), 2, 2, 10.0);
        let bottom = cell_rect(content, CellAssignment::new(1, 0, 1, 1), 2, 2, 10.0);
        assert!((bottom.y - (top.y + top.height + 10.0)).abs() < 1e-3);
    }
}
