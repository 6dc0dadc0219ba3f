use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum StateError {
    #[error("variable count must be 2, 3 or 4 (got {0})")]
    InvalidVariableCount(u8),
    #[error("cell index {index} out of range for a {len}-cell map")]
    IndexOutOfRange { index: usize, len: usize },
}

/// Number of input variables of the mapped function. Keeping this a closed
/// enum makes the layout tables infallible; validation happens once, at the
/// point where a raw number enters the system.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VariableCount {
    Two,
    Three,
    Four,
}

impl VariableCount {
    pub fn as_u8(self) -> u8 {
        match self {
            VariableCount::Two => 2,
            VariableCount::Three => 3,
            VariableCount::Four => 4,
        }
    }

    /// Number of minterm cells: 2^n.
    pub fn cell_count(self) -> usize {
        1 << self.as_u8()
    }
}

impl TryFrom<u8> for VariableCount {
    type Error = StateError;

    fn try_from(n: u8) -> Result<Self, StateError> {
        match n {
            2 => Ok(VariableCount::Two),
            3 => Ok(VariableCount::Three),
            4 => Ok(VariableCount::Four),
            other => Err(StateError::InvalidVariableCount(other)),
        }
    }
}

/// Tri-state value of one truth-table cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CellValue {
    #[default]
    Zero,
    One,
    DontCare,
}

impl CellValue {
    /// Cyclic toggle: 0 -> 1 -> X -> 0. Applying it three times is the
    /// identity.
    pub fn next(self) -> CellValue {
        match self {
            CellValue::Zero => CellValue::One,
            CellValue::One => CellValue::DontCare,
            CellValue::DontCare => CellValue::Zero,
        }
    }

    /// Wire form used by the simplification service.
    pub fn as_wire(self) -> &'static str {
        match self {
            CellValue::Zero => "0",
            CellValue::One => "1",
            CellValue::DontCare => "X",
        }
    }

    /// Glyph shown inside the cell.
    pub fn glyph(self) -> &'static str {
        self.as_wire()
    }
}

/// SOP / POS presentation and request mode. Not derived from cell state;
/// switching it re-issues the simplify request.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub enum FormMode {
    #[default]
    #[serde(rename = "SOP")]
    Sop,
    #[serde(rename = "POS")]
    Pos,
}

impl FormMode {
    pub fn label(self) -> &'static str {
        match self {
            FormMode::Sop => "SOP",
            FormMode::Pos => "POS",
        }
    }
}

/// The editable truth table: one tri-state value per minterm index, plus the
/// variable count and form mode. Owned exclusively by the grid entity; every
/// operation is a plain state transition.
#[derive(Clone, Debug)]
pub struct MapState {
    vars: VariableCount,
    cells: Vec<CellValue>,
    mode: FormMode,
}

impl MapState {
    pub fn new(vars: VariableCount) -> Self {
        Self {
            vars,
            cells: vec![CellValue::Zero; vars.cell_count()],
            mode: FormMode::Sop,
        }
    }

    pub fn vars(&self) -> VariableCount {
        self.vars
    }

    pub fn mode(&self) -> FormMode {
        self.mode
    }

    pub fn cells(&self) -> &[CellValue] {
        &self.cells
    }

    pub fn cell(&self, index: usize) -> Result<CellValue, StateError> {
        self.cells
            .get(index)
            .copied()
            .ok_or(StateError::IndexOutOfRange {
                index,
                len: self.cells.len(),
            })
    }

    /// Cycle one cell through 0 -> 1 -> X -> 0.
    pub fn toggle(&mut self, index: usize) -> Result<(), StateError> {
        let len = self.cells.len();
        let cell = self
            .cells
            .get_mut(index)
            .ok_or(StateError::IndexOutOfRange { index, len })?;
        *cell = cell.next();
        Ok(())
    }

    /// Switch to a new variable count, discarding all prior values. There is
    /// no migration of overlapping indices; every cell comes back as Zero.
    pub fn resize(&mut self, vars: VariableCount) {
        self.vars = vars;
        self.cells = vec![CellValue::Zero; vars.cell_count()];
    }

    pub fn fill_all(&mut self) {
        self.cells.fill(CellValue::One);
    }

    pub fn clear_all(&mut self) {
        self.cells.fill(CellValue::Zero);
    }

    pub fn set_mode(&mut self, mode: FormMode) {
        self.mode = mode;
    }

    /// Serialize the whole map in the service's wire form ("0"/"1"/"X").
    pub fn wire_map(&self) -> Vec<String> {
        self.cells.iter().map(|c| c.as_wire().to_string()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn toggle_cycles_zero_one_dont_care() {
        let mut state = MapState::new(VariableCount::Two);
        state.toggle(3).unwrap();
        assert_eq!(state.cell(3).unwrap(), CellValue::One);
        state.toggle(3).unwrap();
        assert_eq!(state.cell(3).unwrap(), CellValue::DontCare);
        state.toggle(3).unwrap();
        assert_eq!(state.cell(3).unwrap(), CellValue::Zero);
    }

    #[test]
    fn triple_toggle_is_identity_at_every_count() {
        for vars in [VariableCount::Two, VariableCount::Three, VariableCount::Four] {
            let mut state = MapState::new(vars);
            // Start from a mixed grid so the law is checked from every value.
            for i in 0..vars.cell_count() {
                for _ in 0..(i % 3) {
                    state.toggle(i).unwrap();
                }
            }
            let before = state.cells().to_vec();
            for i in 0..vars.cell_count() {
                state.toggle(i).unwrap();
                state.toggle(i).unwrap();
                state.toggle(i).unwrap();
            }
            assert_eq!(state.cells(), &before[..]);
        }
    }

    #[test]
    fn toggle_out_of_range_fails() {
        let mut state = MapState::new(VariableCount::Two);
        assert_eq!(
            state.toggle(4),
            Err(StateError::IndexOutOfRange { index: 4, len: 4 })
        );
    }

    #[test]
    fn resize_discards_everything() {
        let mut state = MapState::new(VariableCount::Four);
        state.fill_all();
        state.resize(VariableCount::Three);
        assert_eq!(state.cells().len(), 8);
        assert!(state.cells().iter().all(|c| *c == CellValue::Zero));

        // Resizing to the same count also resets.
        state.toggle(0).unwrap();
        state.resize(VariableCount::Three);
        assert_eq!(state.cell(0).unwrap(), CellValue::Zero);
    }

    #[test]
    fn fill_and_clear_keep_length() {
        let mut state = MapState::new(VariableCount::Three);
        state.fill_all();
        assert!(state.cells().iter().all(|c| *c == CellValue::One));
        assert_eq!(state.cells().len(), 8);
        state.clear_all();
        assert!(state.cells().iter().all(|c| *c == CellValue::Zero));
        assert_eq!(state.cells().len(), 8);
    }

    #[test]
    fn variable_count_rejects_out_of_range() {
        assert_eq!(
            VariableCount::try_from(1),
            Err(StateError::InvalidVariableCount(1))
        );
        assert_eq!(
            VariableCount::try_from(5),
            Err(StateError::InvalidVariableCount(5))
        );
        assert_eq!(VariableCount::try_from(3), Ok(VariableCount::Three));
    }

    #[test]
    fn wire_map_uses_service_encoding() {
        let mut state = MapState::new(VariableCount::Two);
        state.toggle(1).unwrap();
        state.toggle(2).unwrap();
        state.toggle(2).unwrap();
        assert_eq!(state.wire_map(), vec!["0", "1", "X", "0"]);
    }
}
