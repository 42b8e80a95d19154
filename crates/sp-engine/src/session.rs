//! Seating session: one configuration's roster, pins, locks and grid
//!
//! The roster is built once when the session is created. Every shuffle or
//! lock change recomputes the person pins from the current grid and runs
//! the allocator again; there is no incremental update.

use std::collections::BTreeSet;

use rand::prelude::*;
use serde::{Deserialize, Serialize};

use sp_core::{
    BoardPosition, Person, PinnedPeople, PinnedSeats, SeatGrid, SeatingMode, SpError, SpResult,
};

use crate::config::{ConfigLimits, SeatingConfig};
use crate::pair::PairAllocator;
use crate::roster::build_roster;
use crate::single::SingleSeatAllocator;

/// Interactive seating state for one configuration
pub struct SeatingSession {
    /// Configuration, including setup-time seat pins
    config: SeatingConfig,
    /// Roster, immutable for the session
    roster: Vec<Person>,
    /// Person ids locked to their current slot
    locked: BTreeSet<u32>,
    /// Current grid
    grid: SeatGrid,
    /// Random number generator
    rng: StdRng,
}

impl SeatingSession {
    /// Create with default limits and an OS-seeded RNG
    pub fn new(config: SeatingConfig) -> SpResult<Self> {
        Self::build(config, &ConfigLimits::default(), StdRng::from_os_rng())
    }

    /// Create with specific limits
    pub fn with_limits(config: SeatingConfig, limits: &ConfigLimits) -> SpResult<Self> {
        Self::build(config, limits, StdRng::from_os_rng())
    }

    /// Create with a seeded RNG for reproducible results
    pub fn with_seed(config: SeatingConfig, seed: u64) -> SpResult<Self> {
        let limits = ConfigLimits::default();
        Self::build(config, &limits, StdRng::seed_from_u64(seed))
    }

    fn build(config: SeatingConfig, limits: &ConfigLimits, mut rng: StdRng) -> SpResult<Self> {
        config.validate(limits)?;
        let rule = config.labeling_rule()?;
        let randomize = config.randomize_numbers;
        let roster = build_roster(config.student_count, &rule, randomize, &mut rng);
        if roster.is_empty() {
            return Err(SpError::Validation("roster is empty".into()));
        }

        let grid = allocate(&config, &roster, &PinnedPeople::new(), &mut rng);
        log::info!(
            "seating session: {} people, {:?} mode, {} slots",
            roster.len(),
            config.mode,
            grid.capacity()
        );

        Ok(Self {
            config,
            roster,
            locked: BTreeSet::new(),
            grid,
            rng,
        })
    }

    /// Reseed the RNG; the current grid is kept
    pub fn seed(&mut self, seed: u64) {
        self.rng = StdRng::seed_from_u64(seed);
    }

    /// Regenerate, keeping seat pins and locked people where they are
    pub fn shuffle(&mut self) -> &SeatGrid {
        self.regenerate();
        log::info!("shuffled with {} locked", self.locked.len());
        &self.grid
    }

    /// Lock a seated person to their current slot, or unlock them.
    ///
    /// Returns whether the person is locked afterwards. Unknown or unseated
    /// ids are a no-op.
    pub fn toggle_lock(&mut self, id: u32) -> bool {
        let locked = if self.locked.remove(&id) {
            false
        } else if self.grid.position_of(id).is_some() {
            self.locked.insert(id);
            true
        } else {
            log::warn!("cannot lock {}: not seated", id);
            return false;
        };

        log::info!("{} {}", if locked { "locked" } else { "unlocked" }, id);
        self.regenerate();
        locked
    }

    /// Lock every listed person to the slot they hold in the current grid,
    /// then regenerate once.
    ///
    /// Returns the ids that are not seated. Repeated or already locked ids
    /// stay locked. In pair mode two locked people sharing a slot cannot both
    /// hold it, since person pins only enter empty slots.
    pub fn lock_all(&mut self, ids: &[u32]) -> Vec<u32> {
        let (seated, unseated): (Vec<u32>, Vec<u32>) = ids
            .iter()
            .copied()
            .partition(|&id| self.grid.position_of(id).is_some());
        if seated.is_empty() {
            return unseated;
        }

        self.locked.extend(seated);
        log::info!("{} locked", self.locked.len());
        self.regenerate();
        unseated
    }

    /// Drop every lock and regenerate; seat pins stay
    pub fn clear_locks(&mut self) {
        self.locked.clear();
        self.regenerate();
    }

    pub fn config(&self) -> &SeatingConfig {
        &self.config
    }

    pub fn roster(&self) -> &[Person] {
        &self.roster
    }

    pub fn grid(&self) -> &SeatGrid {
        &self.grid
    }

    pub fn pinned_seats(&self) -> &PinnedSeats {
        &self.config.fixed_seats
    }

    pub fn locked(&self) -> impl Iterator<Item = u32> + '_ {
        self.locked.iter().copied()
    }

    pub fn is_locked(&self, id: u32) -> bool {
        self.locked.contains(&id)
    }

    /// Locked people mapped to the slot they occupy right now
    pub fn pinned_people(&self) -> PinnedPeople {
        self.locked
            .iter()
            .filter_map(|&id| self.grid.position_of(id).map(|slot| (id, slot)))
            .collect()
    }

    /// Render-ready view of the current grid
    pub fn plan(&self) -> SeatingPlan {
        let width = self.config.units_per_row.max(1);
        let occupants: Vec<Vec<Vec<Person>>> = match &self.grid {
            SeatGrid::Single(grid) => grid
                .rows(width)
                .into_iter()
                .map(|row| row.iter().map(seat_occupants).collect())
                .collect(),
            SeatGrid::Pair(grid) => grid.rows(width).into_iter().map(<[_]>::to_vec).collect(),
        };

        let rows = occupants
            .into_iter()
            .enumerate()
            .map(|(row, slots)| self.plan_row(row * width, slots))
            .collect();

        SeatingPlan {
            mode: self.config.mode,
            board_position: self.config.board_position,
            units_per_row: width,
            rows,
            locked: self.locked.iter().copied().collect(),
        }
    }

    fn plan_row(&self, first: usize, slots: Vec<Vec<Person>>) -> Vec<PlanSlot> {
        slots
            .into_iter()
            .enumerate()
            .map(|(offset, people)| self.plan_slot(first + offset, people))
            .collect()
    }

    fn plan_slot(&self, index: usize, people: Vec<Person>) -> PlanSlot {
        PlanSlot {
            index,
            fixed: self.config.fixed_seats.contains_key(&index),
            locked: people.iter().any(|p| self.locked.contains(&p.id)),
            people,
        }
    }

    fn regenerate(&mut self) {
        let pins = self.pinned_people();
        self.grid = allocate(&self.config, &self.roster, &pins, &mut self.rng);
    }
}

fn seat_occupants(seat: &Option<Person>) -> Vec<Person> {
    seat.iter().copied().collect()
}

fn allocate<R: Rng + ?Sized>(
    config: &SeatingConfig,
    roster: &[Person],
    pinned_people: &PinnedPeople,
    rng: &mut R,
) -> SeatGrid {
    let sequential = config.sequential();
    let pins = &config.fixed_seats;
    match config.mode {
        SeatingMode::Single => {
            let capacity = config.layout().capacity_for(roster.len());
            let allocator = SingleSeatAllocator::new(capacity, sequential);
            SeatGrid::Single(allocator.allocate(roster, pins, pinned_people, rng))
        }
        SeatingMode::Pair => {
            let (rows, teams) = (config.rows, config.units_per_row);
            let allocator = PairAllocator::new(rows, teams, config.pair_order, sequential);
            SeatGrid::Pair(allocator.allocate(roster, pins, pinned_people, rng))
        }
    }
}

/// One slot as the renderer sees it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanSlot {
    pub index: usize,
    /// Occupants, left first; empty for an empty seat
    pub people: Vec<Person>,
    /// Pinned at setup time
    pub fixed: bool,
    /// Holds a locked person
    pub locked: bool,
}

/// Seating grid laid out in display rows
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeatingPlan {
    pub mode: SeatingMode,
    pub board_position: BoardPosition,
    pub units_per_row: usize,
    pub rows: Vec<Vec<PlanSlot>>,
    pub locked: Vec<u32>,
}

impl SeatingPlan {
    pub fn to_json(&self) -> SpResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| SpError::Serialization(e.to_string()))
    }

    pub fn slot_count(&self) -> usize {
        self.rows.iter().map(Vec::len).sum()
    }
}
