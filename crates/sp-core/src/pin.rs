//! Pins: setup-time seat pins and interactive person pins

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// One or two person ids pinned to a slot.
///
/// Single-seat layouts only ever use the first id. Serialized as a bare
/// number or as a list of one or two numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "PinnedIdsRepr", into = "PinnedIdsRepr")]
pub struct PinnedIds {
    first: u32,
    second: Option<u32>,
}

impl PinnedIds {
    pub fn one(id: u32) -> Self {
        Self {
            first: id,
            second: None,
        }
    }

    pub fn two(first: u32, second: u32) -> Self {
        Self {
            first,
            second: Some(second),
        }
    }

    #[inline]
    pub fn first(&self) -> u32 {
        self.first
    }

    /// Number of pinned ids, one or two
    pub fn count(&self) -> usize {
        if self.second.is_some() { 2 } else { 1 }
    }

    /// Ids in left-to-right order
    pub fn iter(&self) -> impl Iterator<Item = u32> + '_ {
        std::iter::once(self.first).chain(self.second)
    }
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum PinnedIdsRepr {
    Number(u32),
    List(Vec<u32>),
}

impl TryFrom<PinnedIdsRepr> for PinnedIds {
    type Error = String;

    fn try_from(repr: PinnedIdsRepr) -> Result<Self, Self::Error> {
        match repr {
            PinnedIdsRepr::Number(id) => Ok(Self::one(id)),
            PinnedIdsRepr::List(ids) => match ids.as_slice() {
                [a] => Ok(Self::one(*a)),
                [a, b] => Ok(Self::two(*a, *b)),
                other => Err(format!("a pinned slot holds one or two ids, got {}", other.len())),
            },
        }
    }
}

impl From<PinnedIds> for PinnedIdsRepr {
    fn from(ids: PinnedIds) -> Self {
        match ids.second {
            None => Self::Number(ids.first),
            Some(second) => Self::List(vec![ids.first, second]),
        }
    }
}

/// Slot index → pinned ids, fixed at setup time
pub type PinnedSeats = BTreeMap<usize, PinnedIds>;

/// Person id → slot index, rebuilt before every regeneration
pub type PinnedPeople = BTreeMap<u32, usize>;
