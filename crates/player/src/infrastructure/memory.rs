//! In-memory restaurant store.
//!
//! Evaluates filters locally and keeps counters in process. Backs the
//! fixture mode of the binary and the runtime tests.

use std::path::Path;

use anyhow::Context;
use async_trait::async_trait;
use lunchroll_domain::{Restaurant, RestaurantId};
use tokio::sync::RwLock;

use crate::ports::outbound::{MatchQuery, RestaurantPort};
use crate::ports::{CounterUpdateError, ServiceError};

#[derive(Debug, Default)]
pub struct InMemoryRestaurants {
    restaurants: RwLock<Vec<Restaurant>>,
}

impl InMemoryRestaurants {
    pub fn new(restaurants: impl IntoIterator<Item = Restaurant>) -> Self {
        Self {
            restaurants: RwLock::new(restaurants.into_iter().collect()),
        }
    }

    /// Load a JSON array of restaurants, as served by the backend.
    pub async fn from_json_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let raw = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read fixture {}", path.display()))?;
        let restaurants: Vec<Restaurant> = serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse fixture {}", path.display()))?;
        tracing::info!(
            path = %path.display(),
            count = restaurants.len(),
            "Loaded restaurant fixture"
        );
        Ok(Self::new(restaurants))
    }

    pub async fn get(&self, id: &RestaurantId) -> Option<Restaurant> {
        self.restaurants
            .read()
            .await
            .iter()
            .find(|r| &r.id == id)
            .cloned()
    }

    pub async fn all(&self) -> Vec<Restaurant> {
        self.restaurants.read().await.clone()
    }

    async fn increment(
        &self,
        id: &RestaurantId,
        counter: impl FnOnce(&mut Restaurant) -> &mut u32,
    ) -> Result<(), CounterUpdateError> {
        let mut restaurants = self.restaurants.write().await;
        let restaurant = restaurants
            .iter_mut()
            .find(|r| &r.id == id)
            .ok_or_else(|| CounterUpdateError(format!("Restaurant {} not found", id)))?;
        *counter(restaurant) += 1;
        Ok(())
    }
}

#[async_trait]
impl RestaurantPort for InMemoryRestaurants {
    async fn get_all_matches(&self, query: MatchQuery) -> Result<Vec<Restaurant>, ServiceError> {
        let filter = query.to_filter();
        Ok(self
            .restaurants
            .read()
            .await
            .iter()
            .filter(|r| filter.matches(r))
            .cloned()
            .collect())
    }

    async fn increase_result_amount(&self, id: RestaurantId) -> Result<(), CounterUpdateError> {
        self.increment(&id, |r| &mut r.result_amount).await
    }

    async fn increase_not_selected_amount(
        &self,
        id: RestaurantId,
    ) -> Result<(), CounterUpdateError> {
        self.increment(&id, |r| &mut r.not_selected_amount).await
    }

    async fn increase_selected_amount(&self, id: RestaurantId) -> Result<(), CounterUpdateError> {
        self.increment(&id, |r| &mut r.selected_amount).await
    }
}
