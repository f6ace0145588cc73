// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Zeromoto Tracker: CO₂ emissions logging for short scooter trips
//!
//! This crate provides the emission catalog, the per-session trip ledger,
//! CSV import/export, and a small HTTP API over them.

pub mod config;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod time_utils;

use config::Config;
use services::{CatalogError, EmissionCatalog, TripLedger};
use tokio::sync::Mutex;

/// Shared application state.
///
/// The server runs a single session, so it owns exactly one ledger.
pub struct AppState {
    pub config: Config,
    pub catalog: EmissionCatalog,
    pub ledger: Mutex<TripLedger>,
}

impl AppState {
    pub fn new(config: Config, catalog: EmissionCatalog) -> Self {
        let ledger = TripLedger::new(config.unknown_vehicle_policy);
        Self {
            config,
            catalog,
            ledger: Mutex::new(ledger),
        }
    }

    /// Build state with the catalog the config points at.
    pub fn from_config(config: Config) -> Result<Self, CatalogError> {
        let catalog = match &config.emission_factors_path {
            Some(path) => EmissionCatalog::load_from_file(path, &config.baseline_vehicle)?,
            None => EmissionCatalog::with_baseline(&config.baseline_vehicle)?,
        };
        Ok(Self::new(config, catalog))
    }
}
