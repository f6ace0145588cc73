// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Trip model for the session ledger and API.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Raw trip fields as supplied by a form submit or one import row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TripInput {
    /// Trip date (no time of day)
    pub date: NaiveDate,
    /// Free-form scooter identifier (e.g. "ZM-001")
    pub scooter_id: String,
    /// Distance travelled in km
    pub distance_km: f64,
    /// Vehicle type as typed by the caller; matched case/space-insensitively
    pub vehicle_type: String,
}

/// A logged trip with its emission figures, fixed at insertion time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct TripRecord {
    #[cfg_attr(feature = "binding-generation", ts(type = "string"))]
    pub date: NaiveDate,
    pub scooter_id: String,
    pub distance_km: f64,
    /// Canonical catalog name, or the trimmed input if it did not resolve
    pub vehicle_type: String,
    /// kg CO₂ emitted, rounded to 3 decimals
    pub co2_emitted_kg: f64,
    /// kg CO₂ avoided relative to the baseline vehicle (may be negative)
    pub co2_avoided_kg: f64,
}

/// Result of a single manual append.
#[derive(Debug, Clone, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct ManualAppend {
    pub record: TripRecord,
    /// Set when the vehicle type was unknown and the figures were zero-filled
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

/// Result of a bulk import.
#[derive(Debug, Clone, Default, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct BulkImport {
    /// Records appended, in row order
    pub accepted: Vec<TripRecord>,
    /// Rows skipped because their vehicle type was unknown
    pub rejected_count: usize,
    /// 1-based data row numbers kept with zero-filled figures
    pub warned_rows: Vec<usize>,
}

impl BulkImport {
    /// Number of rows that did not resolve cleanly.
    pub fn problem_count(&self) -> usize {
        self.rejected_count + self.warned_rows.len()
    }
}
