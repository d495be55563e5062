//! Randomizer configuration

use std::str::FromStr;
use std::time::Duration;

use lunchroll_domain::value_objects::{
    DEFAULT_MAX_DELAY_MS, DEFAULT_MAX_ROLLS, DEFAULT_MIN_DELAY_MS, DEFAULT_RESULT_WAIT_MS,
};
use lunchroll_domain::{DomainError, RollPacing};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};

/// Chance per eligible frame that the NOPE easter egg hijacks the roll.
pub const DEFAULT_EASTER_EGG_CHANCE: f64 = 0.025;

/// Construction-time settings. Pacing and the easter egg only affect the
/// animation, never which restaurant wins.
#[derive(Debug, Clone, PartialEq)]
pub struct RandomizerConfig {
    pub pacing: RollPacing,
    easter_egg_chance: f64,
    /// Fixed RNG seed, for replayable rolls
    pub seed: Option<u64>,
}

impl Default for RandomizerConfig {
    fn default() -> Self {
        Self {
            pacing: RollPacing::default(),
            easter_egg_chance: DEFAULT_EASTER_EGG_CHANCE,
            seed: None,
        }
    }
}

impl RandomizerConfig {
    pub fn new(pacing: RollPacing) -> Self {
        Self {
            pacing,
            ..Self::default()
        }
    }

    pub fn with_easter_egg_chance(mut self, chance: f64) -> Result<Self, DomainError> {
        if !(0.0..=1.0).contains(&chance) {
            return Err(DomainError::validation(format!(
                "easter egg chance must be within 0..=1, got {}",
                chance
            )));
        }
        self.easter_egg_chance = chance;
        Ok(self)
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn easter_egg_chance(&self) -> f64 {
        self.easter_egg_chance
    }

    /// Random source for shuffling and the easter egg.
    pub fn rng(&self) -> Box<dyn RngCore + Send> {
        match self.seed {
            Some(seed) => Box::new(StdRng::seed_from_u64(seed)),
            None => Box::new(StdRng::from_entropy()),
        }
    }

    /// Load configuration from environment variables
    ///
    /// - `LUNCHROLL_MAX_ROLLS` (default 35)
    /// - `LUNCHROLL_MIN_ROLL_DELAY_MS` (default 25)
    /// - `LUNCHROLL_MAX_ROLL_DELAY_MS` (default 1000)
    /// - `LUNCHROLL_RESULT_WAIT_MS` (default 1250)
    /// - `LUNCHROLL_EASTER_EGG_CHANCE` (default 0.025)
    /// - `LUNCHROLL_SEED` (unset = entropy)
    pub fn from_env() -> Result<Self, DomainError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub(crate) fn from_lookup(
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, DomainError> {
        let pacing = RollPacing::new(
            parse_or(&lookup, "LUNCHROLL_MAX_ROLLS", DEFAULT_MAX_ROLLS)?,
            Duration::from_millis(parse_or(
                &lookup,
                "LUNCHROLL_MIN_ROLL_DELAY_MS",
                DEFAULT_MIN_DELAY_MS,
            )?),
            Duration::from_millis(parse_or(
                &lookup,
                "LUNCHROLL_MAX_ROLL_DELAY_MS",
                DEFAULT_MAX_DELAY_MS,
            )?),
            Duration::from_millis(parse_or(
                &lookup,
                "LUNCHROLL_RESULT_WAIT_MS",
                DEFAULT_RESULT_WAIT_MS,
            )?),
        )?;

        let config = Self::new(pacing).with_easter_egg_chance(parse_or(
            &lookup,
            "LUNCHROLL_EASTER_EGG_CHANCE",
            DEFAULT_EASTER_EGG_CHANCE,
        )?)?;

        Ok(match lookup("LUNCHROLL_SEED") {
            Some(raw) => config.with_seed(parse_value("LUNCHROLL_SEED", &raw)?),
            None => config,
        })
    }
}

fn parse_or<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: T,
) -> Result<T, DomainError> {
    match lookup(key) {
        Some(raw) => parse_value(key, &raw),
        None => Ok(default),
    }
}

fn parse_value<T: FromStr>(key: &str, raw: &str) -> Result<T, DomainError> {
    raw.trim()
        .parse()
        .map_err(|_| DomainError::parse(format!("{} has an invalid value: '{}'", key, raw)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn defaults_without_environment() {
        let config = RandomizerConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, RandomizerConfig::default());
        assert_eq!(config.pacing.max_rolls(), 35);
        assert_eq!(config.easter_egg_chance(), 0.025);
    }

    #[test]
    fn reads_overrides() {
        let config = RandomizerConfig::from_lookup(lookup(&[
            ("LUNCHROLL_MAX_ROLLS", "10"),
            ("LUNCHROLL_MIN_ROLL_DELAY_MS", "0"),
            ("LUNCHROLL_MAX_ROLL_DELAY_MS", "1"),
            ("LUNCHROLL_RESULT_WAIT_MS", "0"),
            ("LUNCHROLL_EASTER_EGG_CHANCE", "0"),
            ("LUNCHROLL_SEED", "42"),
        ]))
        .unwrap();

        assert_eq!(config.pacing.max_rolls(), 10);
        assert_eq!(config.pacing.max_delay(), Duration::from_millis(1));
        assert_eq!(config.easter_egg_chance(), 0.0);
        assert_eq!(config.seed, Some(42));
    }

    #[test]
    fn rejects_garbage() {
        let err = RandomizerConfig::from_lookup(lookup(&[("LUNCHROLL_MAX_ROLLS", "lots")]))
            .unwrap_err();
        assert!(matches!(err, DomainError::Parse(_)));

        let err = RandomizerConfig::from_lookup(lookup(&[("LUNCHROLL_EASTER_EGG_CHANCE", "1.5")]))
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn seeded_rngs_repeat() {
        let config = RandomizerConfig::default().with_seed(7);
        assert_eq!(config.rng().next_u64(), config.rng().next_u64());
    }
}
