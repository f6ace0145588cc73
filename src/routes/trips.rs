// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Trip logging routes: manual entry, CSV import, listing, and export.

use crate::error::{AppError, Result};
use crate::models::{BulkImport, ManualAppend, TripInput, TripRecord};
use crate::services::csv_io::{export_csv, parse_import, EXPORT_FILE_NAME};
use crate::services::ledger::LedgerState;
use crate::time_utils::{format_trip_date, parse_trip_date};
use crate::AppState;
use axum::{
    body::Bytes,
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::{header, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/trips", get(get_trips).post(add_trip))
        .route("/api/trips/import", post(import_trips))
        .route("/api/trips/export", get(export_trips))
        .route("/api/trips/{index}/export", get(export_trip))
}

// ─── Manual Entry ────────────────────────────────────────────

/// Manual trip form submission.
#[derive(Deserialize)]
pub struct AddTripRequest {
    /// Trip date (YYYY-MM-DD); today if omitted
    pub date: Option<String>,
    #[serde(default)]
    pub scooter_id: String,
    pub distance_km: f64,
    pub vehicle_type: String,
}

/// Log one trip.
async fn add_trip(
    State(state): State<Arc<AppState>>,
    payload: std::result::Result<Json<AddTripRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ManualAppend>)> {
    let Json(request) = payload?;
    let date = match request.date.as_deref() {
        Some(raw) => parse_trip_date(raw).ok_or_else(|| {
            AppError::BadRequest(format!("Invalid 'date': '{}' (expected YYYY-MM-DD)", raw))
        })?,
        None => chrono::Local::now().date_naive(),
    };

    let input = TripInput {
        date,
        scooter_id: request.scooter_id.trim().to_string(),
        distance_km: request.distance_km,
        vehicle_type: request.vehicle_type,
    };

    let appended = state
        .ledger
        .lock()
        .await
        .append_manual(&state.catalog, input)?;

    Ok((StatusCode::CREATED, Json(appended)))
}

// ─── Bulk Import ─────────────────────────────────────────────

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct ImportResponse {
    #[serde(flatten)]
    pub outcome: BulkImport,
    /// Human-readable result for the upload form
    pub message: String,
    pub ledger_size: usize,
}

/// Import a CSV trip log (request body is the file contents).
async fn import_trips(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<ImportResponse>> {
    // Parse fully before taking the lock; a bad file never touches the ledger
    let rows = parse_import(body.as_ref())?;
    let row_count = rows.len();

    let mut ledger = state.ledger.lock().await;
    let outcome = ledger.append_bulk(&state.catalog, rows)?;

    let mut message = format!("{} of {} trips added from CSV", outcome.accepted.len(), row_count);
    if outcome.rejected_count > 0 {
        message.push_str(&format!(
            "; {} skipped (unknown vehicle type)",
            outcome.rejected_count
        ));
    }
    if !outcome.warned_rows.is_empty() {
        message.push_str(&format!(
            "; {} recorded with zero CO₂ (unknown vehicle type)",
            outcome.warned_rows.len()
        ));
    }

    Ok(Json(ImportResponse {
        outcome,
        message,
        ledger_size: ledger.len(),
    }))
}

// ─── Listing ─────────────────────────────────────────────────

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct TripsResponse {
    /// Trips in the order they were logged
    pub trips: Vec<TripRecord>,
    pub total_emitted_kg: f64,
    pub total_avoided_kg: f64,
    #[cfg_attr(feature = "binding-generation", ts(type = "string"))]
    pub state: LedgerState,
}

/// All logged trips with running totals.
async fn get_trips(State(state): State<Arc<AppState>>) -> Json<TripsResponse> {
    let ledger = state.ledger.lock().await;

    tracing::debug!(count = ledger.len(), "Fetching trips");

    Json(TripsResponse {
        trips: ledger.snapshot().to_vec(),
        total_emitted_kg: ledger.total_emitted(),
        total_avoided_kg: ledger.total_avoided(),
        state: ledger.state(),
    })
}

// ─── Export ──────────────────────────────────────────────────

/// Download the full log as CSV.
async fn export_trips(State(state): State<Arc<AppState>>) -> Result<impl IntoResponse> {
    let csv = {
        let ledger = state.ledger.lock().await;
        export_csv(ledger.snapshot())?
    };

    Ok(csv_attachment(csv, EXPORT_FILE_NAME))
}

/// Download one trip (by position in the listing) as a single-row CSV.
async fn export_trip(
    State(state): State<Arc<AppState>>,
    path: std::result::Result<Path<usize>, PathRejection>,
) -> Result<impl IntoResponse> {
    let Path(index) = path?;

    let (csv, date) = {
        let ledger = state.ledger.lock().await;
        let record = ledger
            .get(index)
            .ok_or_else(|| AppError::NotFound(format!("No trip at index {}", index)))?;
        (export_csv(std::slice::from_ref(record))?, record.date)
    };

    let file_name = format!("zeromoto_trip_{}.csv", format_trip_date(date));
    Ok(csv_attachment(csv, &file_name))
}

fn csv_attachment(csv: String, file_name: &str) -> impl IntoResponse {
    (
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", file_name),
            ),
        ],
        csv,
    )
}
