//! Outbound ports - Interfaces for external services
//!
//! These ports define the contracts that infrastructure adapters must implement,
//! allowing the randomizer to interact with external systems without
//! depending on concrete implementations.

pub mod restaurant_port;
pub mod sound_port;

pub use restaurant_port::{MatchQuery, RestaurantPort};
pub use sound_port::{play, SoundCue, SoundPort};

#[cfg(test)]
pub use restaurant_port::MockRestaurantPort;
#[cfg(test)]
pub use sound_port::MockSoundPort;
