// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - emission and trip logging logic.

pub mod catalog;
pub mod csv_io;
pub mod ledger;

pub use catalog::{CatalogError, EmissionCatalog, UnknownVehicleError};
pub use ledger::{LedgerError, LedgerState, TripLedger};
