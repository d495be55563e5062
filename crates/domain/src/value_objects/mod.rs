//! Value objects - Immutable objects defined by their attributes

mod filter;
mod roll_pacing;

pub use filter::{Filter, FilterType};
pub use roll_pacing::{
    quartic_ease, RollPacing, DEFAULT_MAX_DELAY_MS, DEFAULT_MAX_ROLLS, DEFAULT_MIN_DELAY_MS,
    DEFAULT_RESULT_WAIT_MS,
};
