//! Infrastructure adapters for the player ports.

pub mod config;
pub mod memory;
pub mod restaurant_client;
pub mod sound;

pub use config::{PlayerConfig, RestaurantSource};
pub use memory::InMemoryRestaurants;
pub use restaurant_client::HttpRestaurantClient;
pub use sound::TracingSound;
