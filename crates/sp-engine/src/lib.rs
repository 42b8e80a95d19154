//! # sp-engine: Seat-assignment engine for SeatPlan
//!
//! Assigns a roster of people to a fixed grid of single seats or
//! two-person pair slots, honoring setup-time seat pins, interactive
//! person pins, and the chosen ordering policy.
//!
//! ## Architecture
//!
//! ```text
//! SeatingConfig ──> LabelingRule ──> build_roster ──> Vec<Person>
//!                                                        │
//!          PinnedSeats + PinnedPeople ───────────────────┤
//!                                                        v
//!                              SingleSeatAllocator | PairAllocator
//!                                                        │
//!                                                        v
//!                                               SeatGrid → SeatingPlan
//! ```
//!
//! Allocation is a pure function of its inputs and the RNG handed in.
//! `SeatingSession` owns the per-configuration state (roster, pins, locks,
//! current grid) and drives re-shuffles.

pub mod config;
pub mod pair;
mod pool;
pub mod range;
pub mod roster;
pub mod session;
pub mod shuffle;
pub mod single;

pub use config::*;
pub use pair::*;
pub use range::*;
pub use roster::*;
pub use session::*;
pub use shuffle::*;
pub use single::*;

pub use sp_core::*;
