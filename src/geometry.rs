//! Overlay geometry for prime-term groupings.
//!
//! A group arrives as an inclusive rectangular span in grid coordinates
//! (label row and column excluded). This module turns it into an absolute
//! rectangle in the same pixel units the grid itself is laid out in, so the
//! overlay needs no further calibration to sit exactly on the cells.
//!
//! The simplification service never emits wrap-around groups: a prime
//! implicant that wraps at a grid edge is split into plain rectangles before
//! it reaches us, so every span here is axis-aligned and contiguous.

use crate::adapter::GroupSpan;

/// Edge length of one cell, in px. Shared with the grid renderer: the
/// overlay math in this file and the flex layout in `grid.rs` must use the
/// same pitch or the rectangles drift off the cells.
pub const CELL_SIZE: f32 = 72.0;
/// Gap between adjacent cells, in px. Shared with the grid renderer.
pub const GAP_SIZE: f32 = 4.0;

pub const ROW_HEADER_WIDTH: f32 = 84.0;
pub const COLUMN_HEADER_HEIGHT: f32 = 40.0;
/// Padding around the whole grid block. The overlay anchor offsets by it, so
/// it lives here with the other shared layout constants.
pub const GRID_PADDING: f32 = 16.0;

/// Absolute overlay rectangle, relative to the top-left of the cell area.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OverlayRect {
    pub top: f32,
    pub left: f32,
    pub width: f32,
    pub height: f32,
}

/// Convert a group span into overlay geometry. Spans are inclusive, so a
/// single cell has a span of one row and one column. Inverted spans are
/// normalized locally (the adapter already drops them, but the math here
/// must not be able to panic on unchecked input).
pub fn overlay_rect(span: &GroupSpan, cell_size: f32, gap_size: f32) -> OverlayRect {
    let (row_start, row_end) = ordered(span.row_start, span.row_end);
    let (col_start, col_end) = ordered(span.col_start, span.col_end);
    let col_span = (col_end - col_start + 1) as f32;
    let row_span = (row_end - row_start + 1) as f32;

    OverlayRect {
        top: row_start as f32 * (cell_size + gap_size),
        left: col_start as f32 * (cell_size + gap_size),
        width: col_span * cell_size + (col_span - 1.0) * gap_size,
        height: row_span * cell_size + (row_span - 1.0) * gap_size,
    }
}

fn ordered(start: usize, end: usize) -> (usize, usize) {
    (start.min(end), start.max(end))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn span(row_start: usize, row_end: usize, col_start: usize, col_end: usize) -> GroupSpan {
        GroupSpan {
            row_start,
            row_end,
            col_start,
            col_end,
            color: "red".into(),
        }
    }

    #[test]
    fn two_by_two_group_includes_interior_gap() {
        let rect = overlay_rect(&span(0, 1, 0, 1), 6.0, 0.25);
        assert_eq!(
            rect,
            OverlayRect {
                top: 0.0,
                left: 0.0,
                width: 12.25,
                height: 12.25,
            }
        );
    }

    #[test]
    fn single_cell_group_is_one_cell_wide() {
        let rect = overlay_rect(&span(1, 1, 1, 1), 6.0, 0.25);
        assert_eq!(rect.width, 6.0);
        assert_eq!(rect.height, 6.0);
        assert_eq!(rect.top, 6.25);
        assert_eq!(rect.left, 6.25);
    }

    #[test]
    fn offset_follows_cell_pitch() {
        let rect = overlay_rect(&span(2, 3, 1, 3), CELL_SIZE, GAP_SIZE);
        assert_eq!(rect.top, 2.0 * (CELL_SIZE + GAP_SIZE));
        assert_eq!(rect.left, CELL_SIZE + GAP_SIZE);
        assert_eq!(rect.width, 3.0 * CELL_SIZE + 2.0 * GAP_SIZE);
        assert_eq!(rect.height, 2.0 * CELL_SIZE + GAP_SIZE);
    }

    #[test]
    fn inverted_span_is_normalized_not_panicked_on() {
        let rect = overlay_rect(&span(1, 0, 3, 1), 6.0, 0.25);
        assert_eq!(rect, overlay_rect(&span(0, 1, 1, 3), 6.0, 0.25));
    }

    #[test]
    fn full_row_group_spans_the_grid() {
        let rect = overlay_rect(&span(0, 0, 0, 3), CELL_SIZE, GAP_SIZE);
        assert_eq!(rect.width, 4.0 * CELL_SIZE + 3.0 * GAP_SIZE);
        assert_eq!(rect.height, CELL_SIZE);
        assert_eq!(rect.top, 0.0);
    }
}
