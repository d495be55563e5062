//! Domain entities - Core business objects with identity

mod category;
mod restaurant;

pub use category::Category;
pub use restaurant::{Coordinates, Restaurant};
