use crate::state::VariableCount;

/// Fixed gray-code arrangement of minterm indices for one variable count,
/// plus the axis labels rendered around the grid. Adjacent rows and columns
/// differ by exactly one bit of the corresponding variable group, so spatial
/// adjacency implies logical adjacency.
pub struct MapLayout {
    pub rows: &'static [&'static [usize]],
    pub row_labels: &'static [&'static str],
    pub col_labels: &'static [&'static str],
    /// Variable group named in the corner cell, row side (e.g. "AB").
    pub row_axis: &'static str,
    /// Variable group named in the corner cell, column side (e.g. "CD").
    pub col_axis: &'static str,
}

// 2 variables: A on rows, B on columns.
const LAYOUT_2V: MapLayout = MapLayout {
    rows: &[&[0, 1], &[2, 3]],
    row_labels: &["0 (A')", "1 (A)"],
    col_labels: &["0 (B')", "1 (B)"],
    row_axis: "A",
    col_axis: "B",
};

// 3 variables: A on rows, BC on columns.
const LAYOUT_3V: MapLayout = MapLayout {
    rows: &[&[0, 1, 3, 2], &[4, 5, 7, 6]],
    row_labels: &["0 (A')", "1 (A)"],
    col_labels: &["00 (B'C')", "01 (B'C)", "11 (BC)", "10 (BC')"],
    row_axis: "A",
    col_axis: "BC",
};

// 4 variables: AB on rows, CD on columns.
const LAYOUT_4V: MapLayout = MapLayout {
    rows: &[
        &[0, 1, 3, 2],
        &[4, 5, 7, 6],
        &[12, 13, 15, 14],
        &[8, 9, 11, 10],
    ],
    row_labels: &["00 (A'B')", "01 (A'B)", "11 (AB)", "10 (AB')"],
    col_labels: &["00 (C'D')", "01 (C'D)", "11 (CD)", "10 (CD')"],
    row_axis: "AB",
    col_axis: "CD",
};

/// Look up the layout for a variable count. Pure and infallible: an invalid
/// count cannot be represented by [`VariableCount`], so clamping happens at
/// the input boundary rather than here.
pub fn layout(vars: VariableCount) -> &'static MapLayout {
    match vars {
        VariableCount::Two => &LAYOUT_2V,
        VariableCount::Three => &LAYOUT_3V,
        VariableCount::Four => &LAYOUT_4V,
    }
}

impl MapLayout {
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn col_count(&self) -> usize {
        self.col_labels.len()
    }

    /// Minterm index at a grid position, if that position holds a real cell.
    pub fn index_at(&self, row: usize, col: usize) -> Option<usize> {
        self.rows.get(row).and_then(|r| r.get(col)).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn collect_indices(layout: &MapLayout) -> Vec<usize> {
        let mut all: Vec<usize> = layout.rows.iter().flat_map(|r| r.iter().copied()).collect();
        all.sort_unstable();
        all
    }

    #[test]
    fn two_variable_layout_covers_each_index_once() {
        let l = layout(VariableCount::Two);
        assert_eq!(l.rows.len(), 2);
        assert!(l.rows.iter().all(|r| r.len() == 2));
        assert_eq!(collect_indices(l), vec![0, 1, 2, 3]);
    }

    #[test]
    fn three_variable_layout_covers_each_index_once() {
        let l = layout(VariableCount::Three);
        assert_eq!(l.rows.len(), 2);
        assert!(l.rows.iter().all(|r| r.len() == 4));
        assert_eq!(collect_indices(l), (0..8).collect::<Vec<_>>());
    }

    #[test]
    fn four_variable_rows_are_gray_code_ordered() {
        let l = layout(VariableCount::Four);
        assert_eq!(l.rows[0], &[0, 1, 3, 2]);
        assert_eq!(l.rows[2], &[12, 13, 15, 14]);
        assert_eq!(collect_indices(l), (0..16).collect::<Vec<_>>());
    }

    #[test]
    fn consecutive_rows_and_columns_differ_by_one_bit() {
        for vars in [VariableCount::Two, VariableCount::Three, VariableCount::Four] {
            let l = layout(vars);
            for row in l.rows {
                for pair in row.windows(2) {
                    assert_eq!((pair[0] ^ pair[1]).count_ones(), 1, "{vars:?} row {row:?}");
                }
            }
            for rows in l.rows.windows(2) {
                for col in 0..rows[0].len() {
                    assert_eq!(
                        (rows[0][col] ^ rows[1][col]).count_ones(),
                        1,
                        "{vars:?} col {col}"
                    );
                }
            }
        }
    }

    #[test]
    fn labels_match_grid_shape() {
        for vars in [VariableCount::Two, VariableCount::Three, VariableCount::Four] {
            let l = layout(vars);
            assert_eq!(l.row_labels.len(), l.row_count());
            assert!(l.rows.iter().all(|r| r.len() <= l.col_count()));
        }
    }

    #[test]
    fn index_lookup() {
        let l = layout(VariableCount::Four);
        assert_eq!(l.index_at(2, 1), Some(13));
        assert_eq!(l.index_at(4, 0), None);
        assert_eq!(l.index_at(0, 4), None);
    }
}
