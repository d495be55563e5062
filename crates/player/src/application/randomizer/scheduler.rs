//! Single-slot step timer.
//!
//! At most one step is ever pending. Scheduling a new one replaces the old,
//! cancelling drops it without firing.

use std::pin::Pin;
use std::time::Duration;

use tokio::time::{sleep, Sleep};

struct Pending<T> {
    sleep: Pin<Box<Sleep>>,
    payload: T,
}

pub struct StepTimer<T> {
    pending: Option<Pending<T>>,
}

impl<T> Default for StepTimer<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> StepTimer<T> {
    pub fn new() -> Self {
        Self { pending: None }
    }

    /// Arm the timer, returning the step it replaced, if any.
    pub fn schedule(&mut self, delay: Duration, payload: T) -> Option<T> {
        self.pending
            .replace(Pending {
                sleep: Box::pin(sleep(delay)),
                payload,
            })
            .map(|p| p.payload)
    }

    /// Drop the pending step. Returns whether one was pending.
    pub fn cancel(&mut self) -> bool {
        self.pending.take().is_some()
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Resolves with the pending step once its delay has elapsed.
    ///
    /// Never resolves while nothing is scheduled. Cancel safe: dropping the
    /// future keeps the step and its deadline.
    pub async fn fired(&mut self) -> T {
        let Some(pending) = self.pending.as_mut() else {
            return std::future::pending().await;
        };
        pending.sleep.as_mut().await;

        match self.pending.take() {
            Some(pending) => pending.payload,
            None => std::future::pending().await,
        }
    }
}
