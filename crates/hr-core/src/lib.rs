//! hr-core: Floor generation and room runtime for Heretic
//!
//! Builds a floor as a connected graph of rooms on an integer grid, picks a
//! template for every cell, and runs the rooms once the player is inside:
//! door locking, encounter spawning and transitions between rooms.
//!
//! The crate has no I/O beyond catalog loading. Everything the game engine
//! provides (enemy spawning, player movement) comes in through
//! [`runtime::FloorHost`].

pub mod errors;
pub mod floor;
pub mod runtime;

mod consts;
mod rng;

pub use consts::*;
pub use rng::{FloorRng, fresh_seed};
