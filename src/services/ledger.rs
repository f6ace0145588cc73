// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Append-only trip ledger for one session.
//!
//! Records are enriched with emission figures when they are appended and
//! never recomputed afterwards, so a record always reflects the catalog it
//! was logged against.

use crate::models::{
    BulkImport, LedgerSummary, ManualAppend, TripInput, TripRecord, UnknownVehiclePolicy,
};
use crate::services::catalog::{EmissionCatalog, UnknownVehicleError};
use serde::Serialize;

/// Observable ledger state. There is no way back to `Empty`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LedgerState {
    Empty,
    NonEmpty,
}

/// Ordered, append-only collection of trip records.
#[derive(Debug, Clone, Default)]
pub struct TripLedger {
    records: Vec<TripRecord>,
    policy: UnknownVehiclePolicy,
}

/// How one input resolved against the catalog.
enum Enriched {
    Resolved(TripRecord),
    ZeroFilled(TripRecord),
    Unknown(LedgerError),
}

impl TripLedger {
    pub fn new(policy: UnknownVehiclePolicy) -> Self {
        Self {
            records: Vec::new(),
            policy,
        }
    }

    pub fn policy(&self) -> UnknownVehiclePolicy {
        self.policy
    }

    /// Log one manually entered trip.
    ///
    /// Under `ZeroFill` an unknown vehicle still appends a record and the
    /// result carries a warning; under `Reject` nothing is appended.
    pub fn append_manual(
        &mut self,
        catalog: &EmissionCatalog,
        input: TripInput,
    ) -> Result<ManualAppend, LedgerError> {
        validate_distance(input.distance_km)?;

        let (record, warning) = match self.enrich(catalog, input) {
            Enriched::Resolved(record) => (record, None),
            Enriched::ZeroFilled(record) => {
                let warning = format!(
                    "Unknown vehicle type '{}'; CO₂ figures recorded as 0",
                    record.vehicle_type
                );
                tracing::warn!(
                    vehicle_type = %record.vehicle_type,
                    scooter_id = %record.scooter_id,
                    "Unknown vehicle type, zero-filled trip"
                );
                (record, Some(warning))
            }
            Enriched::Unknown(err) => {
                tracing::warn!(error = %err, "Rejected manual trip");
                return Err(err);
            }
        };

        tracing::info!(
            scooter_id = %record.scooter_id,
            vehicle_type = %record.vehicle_type,
            distance_km = record.distance_km,
            co2_emitted_kg = record.co2_emitted_kg,
            "Trip logged"
        );

        self.records.push(record.clone());
        Ok(ManualAppend { record, warning })
    }

    /// Log a batch of trips in row order.
    ///
    /// Every distance is checked before anything is appended; one bad distance
    /// fails the whole batch and leaves the ledger untouched. Unknown vehicles
    /// never abort the batch.
    pub fn append_bulk(
        &mut self,
        catalog: &EmissionCatalog,
        rows: Vec<TripInput>,
    ) -> Result<BulkImport, LedgerError> {
        for (i, row) in rows.iter().enumerate() {
            validate_distance(row.distance_km).map_err(|e| {
                LedgerError::MalformedInput(format!("row {}: {}", i + 1, e))
            })?;
        }

        let total_rows = rows.len();
        let mut outcome = BulkImport::default();
        for (i, row) in rows.into_iter().enumerate() {
            match self.enrich(catalog, row) {
                Enriched::Resolved(record) => outcome.accepted.push(record),
                Enriched::ZeroFilled(record) => {
                    outcome.warned_rows.push(i + 1);
                    outcome.accepted.push(record);
                }
                Enriched::Unknown(err) => {
                    tracing::debug!(row = i + 1, error = %err, "Skipping import row");
                    outcome.rejected_count += 1;
                }
            }
        }

        self.records.extend(outcome.accepted.iter().cloned());

        if outcome.problem_count() > 0 {
            tracing::warn!(
                rows = total_rows,
                rejected = outcome.rejected_count,
                zero_filled = outcome.warned_rows.len(),
                "Import contained unknown vehicle types"
            );
        }
        tracing::info!(
            rows = total_rows,
            accepted = outcome.accepted.len(),
            ledger_size = self.records.len(),
            "Trips imported"
        );

        Ok(outcome)
    }

    /// Build a record from raw input, applying the unknown-vehicle policy.
    fn enrich(&self, catalog: &EmissionCatalog, input: TripInput) -> Enriched {
        let TripInput {
            date,
            scooter_id,
            distance_km,
            vehicle_type,
        } = input;

        let figures = catalog.estimate(distance_km, &vehicle_type);
        match (figures, self.policy) {
            (Ok(estimate), _) => Enriched::Resolved(TripRecord {
                date,
                scooter_id,
                distance_km,
                vehicle_type: estimate.vehicle_type,
                co2_emitted_kg: estimate.co2_emitted_kg,
                co2_avoided_kg: estimate.co2_avoided_kg,
            }),
            (Err(_), UnknownVehiclePolicy::ZeroFill) => Enriched::ZeroFilled(TripRecord {
                date,
                scooter_id,
                distance_km,
                vehicle_type: vehicle_type.trim().to_string(),
                co2_emitted_kg: 0.0,
                co2_avoided_kg: 0.0,
            }),
            (Err(err), UnknownVehiclePolicy::Reject) => Enriched::Unknown(err.into()),
        }
    }

    /// Sum of per-trip emitted kg, without re-rounding.
    pub fn total_emitted(&self) -> f64 {
        self.records
            .iter()
            .fold(0.0, |total, r| total + r.co2_emitted_kg)
    }

    /// Sum of per-trip avoided kg, without re-rounding.
    pub fn total_avoided(&self) -> f64 {
        self.records
            .iter()
            .fold(0.0, |total, r| total + r.co2_avoided_kg)
    }

    /// All records in insertion order.
    pub fn snapshot(&self) -> &[TripRecord] {
        &self.records
    }

    /// The record at `index` in insertion order.
    pub fn get(&self, index: usize) -> Option<&TripRecord> {
        self.records.get(index)
    }

    pub fn summary(&self) -> LedgerSummary {
        LedgerSummary::from_records(&self.records)
    }

    pub fn state(&self) -> LedgerState {
        if self.records.is_empty() {
            LedgerState::Empty
        } else {
            LedgerState::NonEmpty
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Reject negative, NaN, or infinite distances.
pub fn validate_distance(distance_km: f64) -> Result<(), LedgerError> {
    if distance_km.is_finite() && distance_km >= 0.0 {
        Ok(())
    } else {
        Err(LedgerError::InvalidDistance(distance_km))
    }
}

/// Errors from logging trips.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LedgerError {
    #[error("Unknown vehicle type: {0}")]
    UnknownVehicle(String),

    #[error("Malformed input: {0}")]
    MalformedInput(String),

    #[error("Distance must be a non-negative number of km, got {0}")]
    InvalidDistance(f64),
}

impl From<UnknownVehicleError> for LedgerError {
    fn from(err: UnknownVehicleError) -> Self {
        LedgerError::UnknownVehicle(err.0)
    }
}
