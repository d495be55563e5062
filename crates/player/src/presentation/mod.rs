//! Presentation - view models derived from randomizer snapshots.

pub mod randomizer_view;

pub use randomizer_view::{ButtonView, RandomizerView};
