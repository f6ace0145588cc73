//! Ledger aggregates for the dashboard.
//!
//! Built by folding the ledger's records in insertion order, so every
//! figure here agrees with the exported log.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

use crate::models::TripRecord;

/// Summary statistics for one session's trips.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct LedgerSummary {
    // ─── Totals ──────────────────────────────────────────────────
    /// Number of trips logged
    pub total_trips: u32,
    /// Total distance across all trips (km)
    pub total_distance_km: f64,
    /// Sum of per-trip emitted kg (not re-rounded)
    pub total_emitted_kg: f64,
    /// Sum of per-trip avoided kg (not re-rounded)
    pub total_avoided_kg: f64,

    // ─── By Vehicle Type ─────────────────────────────────────────
    /// Trip count per vehicle type
    pub trips_by_vehicle: BTreeMap<String, u32>,
    /// Distance per vehicle type (km)
    pub distance_by_vehicle: BTreeMap<String, f64>,
    /// Emitted kg per vehicle type
    pub emitted_by_vehicle: BTreeMap<String, f64>,

    // ─── Date Range ──────────────────────────────────────────────
    #[cfg_attr(feature = "binding-generation", ts(type = "string | null"))]
    pub first_trip_date: Option<NaiveDate>,
    #[cfg_attr(feature = "binding-generation", ts(type = "string | null"))]
    pub last_trip_date: Option<NaiveDate>,
}

impl LedgerSummary {
    /// Build a summary from records in ledger order.
    pub fn from_records<'a>(records: impl IntoIterator<Item = &'a TripRecord>) -> Self {
        let mut summary = Self::default();
        for record in records {
            summary.update_from_trip(record);
        }
        summary
    }

    /// Fold one trip into the aggregates.
    pub fn update_from_trip(&mut self, trip: &TripRecord) {
        self.total_trips += 1;
        self.total_distance_km += trip.distance_km;
        self.total_emitted_kg += trip.co2_emitted_kg;
        self.total_avoided_kg += trip.co2_avoided_kg;

        *self
            .trips_by_vehicle
            .entry(trip.vehicle_type.clone())
            .or_insert(0) += 1;
        *self
            .distance_by_vehicle
            .entry(trip.vehicle_type.clone())
            .or_insert(0.0) += trip.distance_km;
        *self
            .emitted_by_vehicle
            .entry(trip.vehicle_type.clone())
            .or_insert(0.0) += trip.co2_emitted_kg;

        // Trips are not necessarily logged in date order
        self.first_trip_date = Some(match self.first_trip_date {
            Some(first) => first.min(trip.date),
            None => trip.date,
        });
        self.last_trip_date = Some(match self.last_trip_date {
            Some(last) => last.max(trip.date),
            None => trip.date,
        });
    }
}
