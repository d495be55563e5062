//! Player port definitions.
//!
//! Everything the randomizer talks to outside its own process sits behind a
//! trait here so tests can swap in mocks.

pub mod error;
pub mod outbound;

pub use error::{CounterUpdateError, ServiceError};
