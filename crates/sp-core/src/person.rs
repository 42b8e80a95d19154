//! People on the roster

use serde::{Deserialize, Serialize};

/// Gender label used by the pairing policies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    #[inline]
    pub fn is_male(self) -> bool {
        matches!(self, Self::Male)
    }

    /// The other gender
    #[inline]
    pub fn opposite(self) -> Self {
        match self {
            Self::Male => Self::Female,
            Self::Female => Self::Male,
        }
    }
}

/// A person on the roster
///
/// `id` is the displayed number and the key used by pins. `original_number`
/// is the pre-randomization identity; sequential placement sorts on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Person {
    pub id: u32,
    pub gender: Gender,
    pub original_number: u32,
}

impl Person {
    /// Person whose displayed number equals their original number
    pub fn new(number: u32, gender: Gender) -> Self {
        Self {
            id: number,
            gender,
            original_number: number,
        }
    }

    /// Copy with a new displayed number
    pub fn relabeled(self, id: u32) -> Self {
        Self { id, ..self }
    }

    /// Sort key for sequential placement
    #[inline]
    pub fn sort_key(&self) -> u32 {
        if self.original_number == 0 {
            self.id
        } else {
            self.original_number
        }
    }
}
