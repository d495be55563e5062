//! Lunchroll player.
//!
//! The restaurant randomizer client: the roll engine, its ports, the view
//! model derived from its snapshots, and adapters for the restaurant backend.

pub mod application;
pub mod infrastructure;
pub mod ports;
pub mod presentation;

pub use application::randomizer::{Randomizer, RandomizerConfig, RollPhase, RollSnapshot};
