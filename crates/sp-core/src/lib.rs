//! sp-core: Shared types for SeatPlan
//!
//! This crate provides the foundational types used by the seating engine
//! and its front ends: people, layout shapes, pins, and seat grids.

mod error;
mod grid;
mod layout;
mod person;
mod pin;

pub use error::*;
pub use grid::*;
pub use layout::*;
pub use person::*;
pub use pin::*;
