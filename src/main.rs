// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Zeromoto Tracker API Server
//!
//! Logs scooter trips for one session and reports the CO₂ emitted and
//! avoided relative to a baseline vehicle.

use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use zeromoto_tracker::{config::Config, AppState};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured JSON logging
    init_logging();

    // Load configuration from environment
    let config = Config::from_env()?;
    tracing::info!(
        port = config.port,
        policy = %config.unknown_vehicle_policy,
        "Starting Zeromoto Tracker API"
    );

    // Load emission factors (fixed for the lifetime of the process)
    if let Some(path) = &config.emission_factors_path {
        tracing::info!(path = %path.display(), "Loading emission factors");
    }
    let state = AppState::from_config(config.clone())?;
    tracing::info!(
        count = state.catalog.vehicles().len(),
        baseline = %state.catalog.baseline().name,
        "Emission catalog ready"
    );

    // Build router
    let app = zeromoto_tracker::routes::create_router(Arc::new(state));

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Initialize structured JSON logging.
fn init_logging() {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("zeromoto_tracker=debug,info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(format)
        .init();
}
