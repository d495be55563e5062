//! Pure helpers shared by the domain and the player.

pub mod shuffle;

pub use shuffle::shuffle;
