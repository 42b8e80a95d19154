//! Layout shape and ordering policies

use serde::{Deserialize, Serialize};

/// One person per seat, or two-person teams
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeatingMode {
    #[default]
    Single,
    Pair,
}

/// Left/right gender preference inside a pair slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PairOrder {
    /// Male on the left where possible
    #[default]
    MaleLeft,
    /// Female on the left where possible
    FemaleLeft,
    /// Even slots start male, odd slots start female
    Alternate,
    /// No gender preference
    Random,
}

/// Where the board sits relative to the grid (rendering hint only)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoardPosition {
    #[default]
    Top,
    Bottom,
}

/// Grid shape (rows × units per row)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutShape {
    pub rows: usize,
    pub units_per_row: usize,
    pub mode: SeatingMode,
}

impl LayoutShape {
    pub fn single(rows: usize, units_per_row: usize) -> Self {
        Self {
            rows,
            units_per_row,
            mode: SeatingMode::Single,
        }
    }

    pub fn pair(rows: usize, units_per_row: usize) -> Self {
        Self {
            rows,
            units_per_row,
            mode: SeatingMode::Pair,
        }
    }

    /// Slots requested by the shape (seats or pair slots)
    #[inline]
    pub fn slots(&self) -> usize {
        self.rows * self.units_per_row
    }

    /// Slots actually laid out for a roster of `roster_len` people.
    ///
    /// Pair layouts are never shrunk below what seats everyone.
    pub fn capacity_for(&self, roster_len: usize) -> usize {
        match self.mode {
            SeatingMode::Single => self.slots(),
            SeatingMode::Pair => self.slots().max(roster_len.div_ceil(2)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_capacity_ignores_roster() {
        let shape = LayoutShape::single(2, 3);
        assert_eq!(shape.capacity_for(50), 6);
        assert_eq!(shape.capacity_for(1), 6);
    }

    #[test]
    fn test_pair_capacity_grows_to_fit() {
        let shape = LayoutShape::pair(1, 2);
        assert_eq!(shape.capacity_for(3), 2);
        assert_eq!(shape.capacity_for(7), 4);
        assert_eq!(shape.capacity_for(8), 4);
        assert_eq!(shape.capacity_for(9), 5);
    }

    #[test]
    fn test_pair_order_serde_names() {
        let json = serde_json::to_string(&PairOrder::FemaleLeft).unwrap();
        assert_eq!(json, "\"female_left\"");
    }
}
