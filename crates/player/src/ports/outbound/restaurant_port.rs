//! Restaurant-data collaborator.
//!
//! The backend is the sole writer of the lottery counters. The client only
//! asks for candidates and fires increment calls.

use async_trait::async_trait;
use lunchroll_domain::{CategoryId, Filter, FilterType, Restaurant, RestaurantId};

use crate::ports::{CounterUpdateError, ServiceError};

/// Which restaurants a roll draws from.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MatchQuery {
    pub match_type: FilterType,
    pub categories: Vec<CategoryId>,
    /// Metres
    pub distance: Option<u32>,
}

impl From<&Filter> for MatchQuery {
    fn from(filter: &Filter) -> Self {
        Self {
            match_type: filter.match_type,
            categories: filter.categories.iter().cloned().collect(),
            distance: filter.distance,
        }
    }
}

impl MatchQuery {
    /// Back to a filter, for adapters that evaluate matches locally.
    pub fn to_filter(&self) -> Filter {
        Filter {
            match_type: self.match_type,
            categories: self.categories.iter().cloned().collect(),
            distance: self.distance,
            visible: false,
        }
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RestaurantPort: Send + Sync {
    async fn get_all_matches(&self, query: MatchQuery) -> Result<Vec<Restaurant>, ServiceError>;

    async fn increase_result_amount(&self, id: RestaurantId) -> Result<(), CounterUpdateError>;

    async fn increase_not_selected_amount(
        &self,
        id: RestaurantId,
    ) -> Result<(), CounterUpdateError>;

    async fn increase_selected_amount(&self, id: RestaurantId) -> Result<(), CounterUpdateError>;
}
