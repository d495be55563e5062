//! Lunchroll domain.
//!
//! Restaurants, categories, the roll filter, roll pacing and the statistics
//! leaderboards. Everything here is pure: no I/O, randomness is passed in.

extern crate self as lunchroll_domain;

pub mod common;
pub mod entities;
pub mod error;
pub mod ids;
pub mod statistics;
pub mod value_objects;

pub use entities::{Category, Coordinates, Restaurant};
pub use error::DomainError;
pub use ids::{CategoryId, RestaurantId, SessionId};
pub use value_objects::{quartic_ease, Filter, FilterType, RollPacing};
