//! Player configuration

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use lunchroll_domain::{CategoryId, Filter, FilterType};
use url::Url;

use super::restaurant_client::DEFAULT_API_BASE_URL;
use crate::application::randomizer::RandomizerConfig;

/// Where candidates come from
#[derive(Debug, Clone, PartialEq)]
pub enum RestaurantSource {
    /// Restaurant backend
    Http(Url),
    /// JSON fixture file, counters kept in memory
    Fixture(PathBuf),
}

/// Player configuration loaded from environment
#[derive(Debug, Clone)]
pub struct PlayerConfig {
    pub source: RestaurantSource,
    pub randomizer: RandomizerConfig,
    /// Filter used for the roll
    pub filter: Filter,
    /// Approve the result as soon as it settles
    pub auto_approve: bool,
}

impl PlayerConfig {
    /// Load configuration from environment variables
    ///
    /// `LUNCHROLL_FIXTURE` takes precedence over `LUNCHROLL_API_URL`.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let source = match lookup("LUNCHROLL_FIXTURE") {
            Some(path) => RestaurantSource::Fixture(PathBuf::from(path)),
            None => {
                let raw = lookup("LUNCHROLL_API_URL")
                    .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string());
                let url = Url::parse(&raw)
                    .with_context(|| format!("LUNCHROLL_API_URL is not a valid URL: {}", raw))?;
                RestaurantSource::Http(url)
            }
        };

        let randomizer = RandomizerConfig::from_lookup(&lookup)
            .context("Invalid randomizer configuration")?;

        let mut filter = Filter::new();
        if let Some(raw) = lookup("LUNCHROLL_FILTER_TYPE") {
            filter.match_type = raw.parse::<FilterType>()?;
        }
        if let Some(raw) = lookup("LUNCHROLL_CATEGORIES") {
            filter.categories = raw
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(CategoryId::from)
                .collect();
        }
        if let Some(raw) = lookup("LUNCHROLL_DISTANCE") {
            filter.distance = Some(
                raw.trim()
                    .parse()
                    .with_context(|| format!("LUNCHROLL_DISTANCE must be metres: {}", raw))?,
            );
        }

        let auto_approve = lookup("LUNCHROLL_AUTO_APPROVE")
            .map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);

        Ok(Self {
            source,
            randomizer,
            filter,
            auto_approve,
        })
    }
}

/// Load `.env.local` then `.env` from the workspace root.
pub fn load_dotenv_from_repo_root() {
    let repo_root = Path::new(env!("CARGO_MANIFEST_DIR")).join("..").join("..");

    // Prefer local overrides.
    for filename in [".env.local", ".env"] {
        let path = repo_root.join(filename);
        if path.exists() {
            let _ = dotenvy::from_path(path);
        }
    }
}
