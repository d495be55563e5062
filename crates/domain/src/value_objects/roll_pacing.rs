//! Roll pacing - how long each frame of the roll animation stays on screen
//!
//! Gaps follow a quartic curve over the roll: `(max - min) * t^4 + min` with
//! `t = roll / max_rolls`. The first frames flick past at close to `min`, the
//! last ones crawl toward `max`, and the frame before the result additionally
//! holds for `result_wait` so the final candidate can be read before settling.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::DomainError;

pub const DEFAULT_MAX_ROLLS: u32 = 35;
pub const DEFAULT_MIN_DELAY_MS: u64 = 25;
pub const DEFAULT_MAX_DELAY_MS: u64 = 1000;
pub const DEFAULT_RESULT_WAIT_MS: u64 = 1250;

/// Quartic easing between `min` and `max` at progress `t` in `[0, 1]`.
pub fn quartic_ease(max: f64, min: f64, t: f64) -> f64 {
    (max - min) * t.powi(4) + min
}

/// Animation pacing. Controls timing only, never which restaurant wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollPacing {
    max_rolls: u32,
    min_delay: Duration,
    max_delay: Duration,
    result_wait: Duration,
}

impl Default for RollPacing {
    fn default() -> Self {
        Self {
            max_rolls: DEFAULT_MAX_ROLLS,
            min_delay: Duration::from_millis(DEFAULT_MIN_DELAY_MS),
            max_delay: Duration::from_millis(DEFAULT_MAX_DELAY_MS),
            result_wait: Duration::from_millis(DEFAULT_RESULT_WAIT_MS),
        }
    }
}

impl RollPacing {
    pub fn new(
        max_rolls: u32,
        min_delay: Duration,
        max_delay: Duration,
        result_wait: Duration,
    ) -> Result<Self, DomainError> {
        if max_rolls == 0 {
            return Err(DomainError::validation(
                "max number of rolls must be at least 1",
            ));
        }
        if min_delay > max_delay {
            return Err(DomainError::validation(format!(
                "min time between rolls ({}ms) exceeds max time ({}ms)",
                min_delay.as_millis(),
                max_delay.as_millis()
            )));
        }
        Ok(Self {
            max_rolls,
            min_delay,
            max_delay,
            result_wait,
        })
    }

    pub fn max_rolls(&self) -> u32 {
        self.max_rolls
    }

    pub fn min_delay(&self) -> Duration {
        self.min_delay
    }

    pub fn max_delay(&self) -> Duration {
        self.max_delay
    }

    pub fn result_wait(&self) -> Duration {
        self.result_wait
    }

    /// Wait before the very first frame.
    pub fn initial_delay(&self) -> Duration {
        self.max_delay
    }

    /// Gap between frame `roll` and frame `roll + 1`.
    ///
    /// Gaps grow with `roll`: the reveal slows down towards `max_delay`.
    pub fn delay_after(&self, roll: u32) -> Duration {
        let t = roll as f64 / self.max_rolls as f64;
        let millis = quartic_ease(
            self.max_delay.as_secs_f64() * 1000.0,
            self.min_delay.as_secs_f64() * 1000.0,
            t,
        );
        let delay = Duration::from_secs_f64(millis.max(0.0) / 1000.0);

        if roll + 1 == self.max_rolls {
            delay + self.result_wait
        } else {
            delay
        }
    }

    /// Rolls left after frame `roll` has been shown.
    pub fn rolls_remaining(&self, roll: u32) -> u32 {
        self.max_rolls.saturating_sub(roll)
    }
}
