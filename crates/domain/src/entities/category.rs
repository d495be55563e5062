//! Category entity - a tag restaurants are filed under

use serde::{Deserialize, Serialize};

use crate::{CategoryId, RestaurantId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    /// Restaurants filed under this category
    #[serde(default)]
    pub restaurants: Vec<RestaurantId>,
}

impl Category {
    pub fn new(id: impl Into<CategoryId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            restaurants: Vec::new(),
        }
    }

    pub fn with_restaurants(mut self, restaurants: impl IntoIterator<Item = RestaurantId>) -> Self {
        self.restaurants = restaurants.into_iter().collect();
        self
    }
}
