//! Lunchroll - rolls the lunch lottery once from the terminal.

use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use lunchroll_player::application::randomizer::{Randomizer, RollPhase};
use lunchroll_player::infrastructure::config::load_dotenv_from_repo_root;
use lunchroll_player::infrastructure::{
    HttpRestaurantClient, InMemoryRestaurants, PlayerConfig, RestaurantSource, TracingSound,
};
use lunchroll_player::ports::outbound::RestaurantPort;
use lunchroll_player::presentation::RandomizerView;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    load_dotenv_from_repo_root();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "lunchroll_player=debug,lunchroll_domain=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Lunchroll");

    let config = PlayerConfig::from_env()?;

    let restaurants: Arc<dyn RestaurantPort> = match &config.source {
        RestaurantSource::Http(url) => {
            tracing::info!(api = %url, "Using restaurant backend");
            Arc::new(HttpRestaurantClient::new(url.clone()))
        }
        RestaurantSource::Fixture(path) => {
            Arc::new(InMemoryRestaurants::from_json_file(path).await?)
        }
    };

    let randomizer = Randomizer::spawn(
        config.randomizer.clone(),
        restaurants,
        Arc::new(TracingSound),
    );
    randomizer.set_filter(config.filter.clone()).await?;

    let mut snapshots = randomizer.subscribe();
    randomizer.start().await?;

    loop {
        tokio::select! {
            changed = snapshots.changed() => {
                if changed.is_err() {
                    break;
                }
            }
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("Interrupted");
                break;
            }
        }

        let snapshot = snapshots.borrow_and_update().clone();
        let view = RandomizerView::derive(&snapshot);
        tracing::debug!(
            phase = %snapshot.phase,
            rolls_remaining = snapshot.rolls_remaining,
            headline = view.headline.unwrap_or_default(),
            "{}",
            view.result_label
        );
        if !snapshot.phase.is_busy() {
            break;
        }
    }

    if randomizer.snapshot().phase == RollPhase::Settled && config.auto_approve {
        randomizer.approve().await?;
    }

    let snapshot = randomizer.snapshot();
    println!(
        "{}",
        serde_json::to_string_pretty(&snapshot).context("Failed to render roll result")?
    );

    randomizer.dispose().await;
    tracing::info!("Lunchroll stopped");
    Ok(())
}
