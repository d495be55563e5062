//! Best-effort lottery counter updates.
//!
//! Increments are fire-and-forget: failures are logged and swallowed, never
//! retried and never surfaced to the roll.

use std::sync::Arc;

use lunchroll_domain::RestaurantId;
use tokio::task::JoinHandle;
use tokio_util::task::TaskTracker;

use crate::ports::outbound::RestaurantPort;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CounterKind {
    /// The restaurant won a roll
    Result,
    /// A previous winner was rejected by rolling again
    NotSelected,
    /// The winner was approved
    Selected,
}

impl CounterKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Result => "resultAmount",
            Self::NotSelected => "notSelectedAmount",
            Self::Selected => "selectedAmount",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CounterUpdate {
    pub kind: CounterKind,
    pub restaurant_id: RestaurantId,
}

impl CounterUpdate {
    pub fn result(restaurant_id: RestaurantId) -> Self {
        Self {
            kind: CounterKind::Result,
            restaurant_id,
        }
    }

    pub fn not_selected(restaurant_id: RestaurantId) -> Self {
        Self {
            kind: CounterKind::NotSelected,
            restaurant_id,
        }
    }

    pub fn selected(restaurant_id: RestaurantId) -> Self {
        Self {
            kind: CounterKind::Selected,
            restaurant_id,
        }
    }
}

#[derive(Clone)]
pub struct ResultReconciler {
    restaurants: Arc<dyn RestaurantPort>,
    in_flight: TaskTracker,
}

impl ResultReconciler {
    pub fn new(restaurants: Arc<dyn RestaurantPort>) -> Self {
        Self {
            restaurants,
            in_flight: TaskTracker::new(),
        }
    }

    /// Send one increment and wait for it. Returns whether it succeeded.
    pub async fn apply(&self, update: CounterUpdate) -> bool {
        let CounterUpdate {
            kind,
            restaurant_id,
        } = update;

        let outcome = match kind {
            CounterKind::Result => {
                self.restaurants
                    .increase_result_amount(restaurant_id.clone())
                    .await
            }
            CounterKind::NotSelected => {
                self.restaurants
                    .increase_not_selected_amount(restaurant_id.clone())
                    .await
            }
            CounterKind::Selected => {
                self.restaurants
                    .increase_selected_amount(restaurant_id.clone())
                    .await
            }
        };

        match outcome {
            Ok(()) => {
                tracing::debug!(
                    restaurant_id = %restaurant_id,
                    counter = kind.as_str(),
                    "Counter incremented"
                );
                true
            }
            Err(e) => {
                tracing::warn!(
                    restaurant_id = %restaurant_id,
                    counter = kind.as_str(),
                    error = %e,
                    "Counter update failed"
                );
                false
            }
        }
    }

    /// Send one increment in the background.
    pub fn dispatch(&self, update: CounterUpdate) -> JoinHandle<bool> {
        let reconciler = self.clone();
        self.in_flight.spawn(async move { reconciler.apply(update).await })
    }

    /// Wait for dispatched updates. No new ones may be dispatched afterwards.
    pub async fn drain(&self) {
        self.in_flight.close();
        self.in_flight.wait().await;
    }
}
