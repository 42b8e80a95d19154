//! Seat grids produced by the allocators
//!
//! Empty slots are kept in place so renderers can draw placeholders at
//! fixed positions.

use serde::{Deserialize, Serialize};

use crate::person::Person;

/// People per pair slot
pub const PAIR_SIZE: usize = 2;

/// Single-seat grid: one optional person per seat
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SingleGrid {
    seats: Vec<Option<Person>>,
}

impl SingleGrid {
    pub fn from_seats(seats: Vec<Option<Person>>) -> Self {
        Self { seats }
    }

    pub fn capacity(&self) -> usize {
        self.seats.len()
    }

    pub fn seats(&self) -> &[Option<Person>] {
        &self.seats
    }

    pub fn get(&self, index: usize) -> Option<&Person> {
        self.seats.get(index).and_then(Option::as_ref)
    }

    pub fn people(&self) -> impl Iterator<Item = &Person> + '_ {
        self.seats.iter().flatten()
    }

    pub fn placed_count(&self) -> usize {
        self.people().count()
    }

    /// Seat index of the person with this id
    pub fn position_of(&self, id: u32) -> Option<usize> {
        self.seats
            .iter()
            .position(|seat| seat.as_ref().is_some_and(|p| p.id == id))
    }

    /// Chunk into display rows of `units_per_row` seats
    pub fn rows(&self, units_per_row: usize) -> Vec<&[Option<Person>]> {
        self.seats.chunks(units_per_row.max(1)).collect()
    }
}

/// Pair grid: each slot holds zero to two people, left first
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PairGrid {
    slots: Vec<Vec<Person>>,
}

impl PairGrid {
    pub fn from_slots(slots: Vec<Vec<Person>>) -> Self {
        Self { slots }
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn slots(&self) -> &[Vec<Person>] {
        &self.slots
    }

    pub fn get(&self, index: usize) -> Option<&[Person]> {
        self.slots.get(index).map(Vec::as_slice)
    }

    pub fn people(&self) -> impl Iterator<Item = &Person> + '_ {
        self.slots.iter().flatten()
    }

    pub fn placed_count(&self) -> usize {
        self.slots.iter().map(Vec::len).sum()
    }

    /// Slot index of the person with this id
    pub fn position_of(&self, id: u32) -> Option<usize> {
        self.slots
            .iter()
            .position(|slot| slot.iter().any(|p| p.id == id))
    }

    /// Chunk into display rows of `units_per_row` slots
    pub fn rows(&self, units_per_row: usize) -> Vec<&[Vec<Person>]> {
        self.slots.chunks(units_per_row.max(1)).collect()
    }
}

/// Either kind of grid
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", content = "slots", rename_all = "snake_case")]
pub enum SeatGrid {
    Single(SingleGrid),
    Pair(PairGrid),
}

impl SeatGrid {
    pub fn capacity(&self) -> usize {
        match self {
            Self::Single(grid) => grid.capacity(),
            Self::Pair(grid) => grid.capacity(),
        }
    }

    pub fn placed_count(&self) -> usize {
        match self {
            Self::Single(grid) => grid.placed_count(),
            Self::Pair(grid) => grid.placed_count(),
        }
    }

    pub fn position_of(&self, id: u32) -> Option<usize> {
        match self {
            Self::Single(grid) => grid.position_of(id),
            Self::Pair(grid) => grid.position_of(id),
        }
    }

    /// Every seated person, slot order
    pub fn people(&self) -> Vec<Person> {
        match self {
            Self::Single(grid) => grid.people().copied().collect(),
            Self::Pair(grid) => grid.people().copied().collect(),
        }
    }

    pub fn as_single(&self) -> Option<&SingleGrid> {
        match self {
            Self::Single(grid) => Some(grid),
            Self::Pair(_) => None,
        }
    }

    pub fn as_pair(&self) -> Option<&PairGrid> {
        match self {
            Self::Pair(grid) => Some(grid),
            Self::Single(_) => None,
        }
    }
}
