//! Pure projection of the map state onto a renderable grid.
//!
//! `grid.rs` paints exactly what this module produces; every layout decision
//! (which index sits where, which positions are inert filler) is made here,
//! where it can be tested without a window.

use crate::layout::{self, MapLayout};
use crate::state::{CellValue, MapState};

/// One position in the rendered grid body.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GridSlot {
    /// A real minterm cell: clickable, carries the store's value.
    Cell { index: usize, value: CellValue },
    /// An inert placeholder for positions the current variable count does
    /// not use. Not interactive, not wired to the store.
    Filler,
}

#[derive(Clone, Debug)]
pub struct GridRow {
    pub label: &'static str,
    pub slots: Vec<GridSlot>,
}

/// Everything the grid component needs to draw: corner axis names, column
/// labels, and one labelled row of slots per layout row.
#[derive(Clone, Debug)]
pub struct GridView {
    pub row_axis: &'static str,
    pub col_axis: &'static str,
    pub col_labels: &'static [&'static str],
    pub rows: Vec<GridRow>,
}

impl GridView {
    pub fn slot(&self, row: usize, col: usize) -> Option<GridSlot> {
        self.rows.get(row).and_then(|r| r.slots.get(col)).copied()
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn col_count(&self) -> usize {
        self.col_labels.len()
    }
}

/// Project the current state onto the gray-code grid. Indices beyond
/// `2^n - 1` and positions past the end of a layout row become filler slots,
/// so a short row laid out on a wider column template still lines up.
pub fn project(state: &MapState) -> GridView {
    let layout: &MapLayout = layout::layout(state.vars());
    let max_index = state.vars().cell_count();

    let rows = layout
        .rows
        .iter()
        .zip(layout.row_labels)
        .map(|(indices, label)| {
            let mut slots: Vec<GridSlot> = indices
                .iter()
                .map(|&index| match state.cell(index) {
                    Ok(value) if index < max_index => GridSlot::Cell { index, value },
                    _ => GridSlot::Filler,
                })
                .collect();
            slots.resize(layout.col_count(), GridSlot::Filler);
            GridRow { label, slots }
        })
        .collect();

    GridView {
        row_axis: layout.row_axis,
        col_axis: layout.col_axis,
        col_labels: layout.col_labels,
        rows,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::{self, RawSimplifyResponse};
    use crate::geometry::{self, OverlayRect};
    use crate::state::{FormMode, VariableCount};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn every_position_is_a_real_cell_for_canonical_layouts() {
        for vars in [VariableCount::Two, VariableCount::Three, VariableCount::Four] {
            let view = project(&MapState::new(vars));
            let mut seen: Vec<usize> = view
                .rows
                .iter()
                .flat_map(|r| r.slots.iter())
                .map(|slot| match slot {
                    GridSlot::Cell { index, value } => {
                        assert_eq!(*value, CellValue::Zero);
                        *index
                    }
                    GridSlot::Filler => panic!("unexpected filler at {vars:?}"),
                })
                .collect();
            seen.sort_unstable();
            assert_eq!(seen, (0..vars.cell_count()).collect::<Vec<_>>());
        }
    }

    #[test]
    fn grid_shape_follows_variable_count() {
        let view = project(&MapState::new(VariableCount::Three));
        assert_eq!(view.row_count(), 2);
        assert_eq!(view.col_count(), 4);
        assert_eq!(view.rows[0].label, "0 (A')");
        assert_eq!(view.col_labels[3], "10 (BC')");
        assert_eq!(view.row_axis, "A");
        assert_eq!(view.col_axis, "BC");
    }

    #[test]
    fn toggled_values_show_up_at_their_gray_code_position() {
        let mut state = MapState::new(VariableCount::Four);
        state.toggle(13).unwrap();
        let view = project(&state);
        // Minterm 13 sits at row 2, column 1 in the 4-variable table.
        assert_eq!(
            view.slot(2, 1),
            Some(GridSlot::Cell {
                index: 13,
                value: CellValue::One,
            })
        );
    }

    // End-to-end over the pure layer: edit, mock service response, check the
    // projected grid, expression, and overlay geometry together.
    #[test]
    fn toggle_simplify_and_overlay_line_up() {
        let mut state = MapState::new(VariableCount::Four);
        state.toggle(5).unwrap();
        assert_eq!(
            state.wire_map(),
            vec!["0", "0", "0", "0", "0", "1", "0", "0", "0", "0", "0", "0", "0", "0", "0", "0"]
        );

        let raw: RawSimplifyResponse = serde_json::from_value(json!({
            "simplified_expression": "BC'D",
            "minterms": [5],
            "groups": [[1, 1, 1, 1, "blue"]],
        }))
        .unwrap();
        let result = adapter::normalize(raw, FormMode::Sop);
        assert_eq!(result.simplified_expression, "BC'D");

        // Cell m5 renders as 1 at its grid position (row 1, col 1).
        let view = project(&state);
        assert_eq!(
            view.slot(1, 1),
            Some(GridSlot::Cell {
                index: 5,
                value: CellValue::One,
            })
        );

        // The overlay covers exactly that cell.
        let rect = geometry::overlay_rect(&result.groups[0], 6.0, 0.25);
        assert_eq!(
            rect,
            OverlayRect {
                top: 6.25,
                left: 6.25,
                width: 6.0,
                height: 6.0,
            }
        );
    }
}
