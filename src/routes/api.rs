// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Catalog and statistics routes.

use crate::error::Result;
use crate::models::{Estimate, LedgerSummary, VehicleComparison, VehicleEmission};
use crate::services::ledger::{validate_distance, LedgerState};
use crate::AppState;
use axum::{
    extract::{rejection::QueryRejection, Query, State},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/vehicles", get(get_vehicles))
        .route("/api/estimate", get(get_estimate))
        .route("/api/stats", get(get_stats))
}

// ─── Vehicles ────────────────────────────────────────────────

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct VehiclesResponse {
    /// Vehicle types in selection order
    pub vehicles: Vec<VehicleEmission>,
    pub baseline_vehicle: String,
}

/// List vehicle types for selection controls.
async fn get_vehicles(State(state): State<Arc<AppState>>) -> Json<VehiclesResponse> {
    Json(VehiclesResponse {
        vehicles: state.catalog.vehicles().to_vec(),
        baseline_vehicle: state.catalog.baseline().name.clone(),
    })
}

// ─── Estimate ────────────────────────────────────────────────

#[derive(Deserialize)]
struct EstimateQuery {
    distance_km: f64,
    vehicle_type: String,
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct EstimateResponse {
    #[serde(flatten)]
    pub estimate: Estimate,
    /// Emitted kg for the same distance under every vehicle type
    pub comparison: Vec<VehicleComparison>,
}

/// Estimate one trip's emissions without logging it.
async fn get_estimate(
    State(state): State<Arc<AppState>>,
    query: std::result::Result<Query<EstimateQuery>, QueryRejection>,
) -> Result<Json<EstimateResponse>> {
    let Query(params) = query?;
    validate_distance(params.distance_km)?;

    let estimate = state
        .catalog
        .estimate(params.distance_km, &params.vehicle_type)?;

    tracing::debug!(
        vehicle_type = %estimate.vehicle_type,
        distance_km = estimate.distance_km,
        "Estimated trip emissions"
    );

    Ok(Json(EstimateResponse {
        comparison: state.catalog.compare(params.distance_km),
        estimate,
    }))
}

// ─── Stats ───────────────────────────────────────────────────

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct StatsResponse {
    #[cfg_attr(feature = "binding-generation", ts(type = "string"))]
    pub state: LedgerState,
    #[serde(flatten)]
    pub summary: LedgerSummary,
}

/// Aggregates over every trip logged this session.
async fn get_stats(State(state): State<Arc<AppState>>) -> Json<StatsResponse> {
    let ledger = state.ledger.lock().await;

    Json(StatsResponse {
        state: ledger.state(),
        summary: ledger.summary(),
    })
}
