// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the application.

pub mod stats;
pub mod trip;
pub mod vehicle;

pub use stats::LedgerSummary;
pub use trip::{BulkImport, ManualAppend, TripInput, TripRecord};
pub use vehicle::{Estimate, UnknownVehiclePolicy, VehicleComparison, VehicleEmission};
