//! # Reactive Oracle Relay
//!
//! Deploys the origin feed, the reactive relay and the feed proxy on
//! simulated chains, pushes a few price updates through the relay and
//! reports the mirrored round.
//!
//! ## Startup Sequence
//!
//! 1. Initialize logging (`RUST_LOG`, default `info`)
//! 2. Load configuration (defaults overridden from `RO_*` variables)
//! 3. Deploy contracts and start the relay handlers
//! 4. Submit the demonstration prices and wait for each to be mirrored
//! 5. Exit, or wait for Ctrl+C when `RO_KEEP_RUNNING` is set

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use relay_runtime::{OracleRuntime, RuntimeConfig};

/// Prices pushed through the relay, 8 decimals.
const DEMO_PRICES: [i128; 3] = [3_110_000_000_000, 3_095_000_000_000, 3_120_000_000_000];

/// How long to wait for each round to reach the destination.
const MIRROR_TIMEOUT: Duration = Duration::from_secs(5);

fn load_config() -> Result<RuntimeConfig> {
    let mut config = RuntimeConfig::from_env().context("Invalid RO_* environment override")?;

    if let Ok(elapsed) = SystemTime::now().duration_since(UNIX_EPOCH) {
        config.genesis_timestamp = elapsed.as_secs();
    }

    Ok(config)
}

fn keep_running() -> bool {
    std::env::var("RO_KEEP_RUNNING")
        .map(|v| !v.is_empty() && v != "0" && !v.eq_ignore_ascii_case("false"))
        .unwrap_or(false)
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config = load_config()?;

    info!("===========================================");
    info!("  Reactive Oracle Relay v{}", env!("CARGO_PKG_VERSION"));
    info!("  Origin {} -> Destination {}", config.origin.chain_id, config.destination.chain_id);
    info!("===========================================");

    let runtime = OracleRuntime::new(config).context("Failed to deploy contracts")?;
    runtime.start();

    let seed = runtime.origin_latest();
    if !seed.is_empty() {
        info!(round_id = seed.round_id, answer = seed.answer, "Origin seeded");
    }

    for answer in DEMO_PRICES {
        let event = runtime
            .submit_price(answer)
            .context("Origin rejected price update")?;

        match runtime.wait_for_mirror(event.round_id, MIRROR_TIMEOUT).await {
            Some(round) => info!(
                round_id = round.round_id,
                answer = round.answer,
                updated_at = round.updated_at,
                "Round mirrored"
            ),
            None => warn!(round_id = event.round_id, "Round not mirrored before timeout"),
        }
    }

    let status = runtime.status();
    let (round_id, answer, started_at, updated_at, answered_in_round) =
        status.mirror_latest.as_tuple();
    info!(
        round_id,
        answer,
        started_at,
        updated_at,
        answered_in_round,
        in_sync = status.in_sync(),
        callbacks = status.relay_stats.callbacks_emitted,
        rejected = status.delivery.reverted + status.delivery.refused,
        "Mirror state"
    );

    if keep_running() {
        info!("Relay is running. Press Ctrl+C to stop.");
        tokio::signal::ctrl_c().await?;
    }

    runtime.shutdown().await;

    Ok(())
}
