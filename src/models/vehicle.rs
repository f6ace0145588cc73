// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Vehicle emission factors and unknown-vehicle handling.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// One catalog entry: a vehicle type and its emission factor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct VehicleEmission {
    /// Canonical vehicle type name (e.g., "Petrol Scooter")
    #[serde(alias = "Vehicle Type")]
    pub name: String,
    /// kg CO₂ emitted per km
    #[serde(alias = "Emission Factor (kg/km)")]
    pub factor_kg_per_km: f64,
}

impl VehicleEmission {
    pub fn new(name: impl Into<String>, factor_kg_per_km: f64) -> Self {
        Self {
            name: name.into(),
            factor_kg_per_km,
        }
    }
}

/// Emitted kg for one vehicle type over a given distance.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct VehicleComparison {
    pub vehicle_type: String,
    pub co2_emitted_kg: f64,
}

/// Emission figures for a single trip that is not logged.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct Estimate {
    pub vehicle_type: String,
    pub distance_km: f64,
    pub co2_emitted_kg: f64,
    pub co2_avoided_kg: f64,
    pub baseline_vehicle: String,
}

/// What the ledger does with a trip whose vehicle type is not in the catalog.
///
/// The same policy applies to manual entries and bulk imports.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnknownVehiclePolicy {
    /// Keep the trip with zero emitted/avoided and report a warning.
    #[default]
    ZeroFill,
    /// Refuse the trip (manual) or skip and count the row (bulk).
    Reject,
}

impl fmt::Display for UnknownVehiclePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnknownVehiclePolicy::ZeroFill => f.write_str("zero_fill"),
            UnknownVehiclePolicy::Reject => f.write_str("reject"),
        }
    }
}

impl FromStr for UnknownVehiclePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "zero_fill" | "zero-fill" | "zerofill" => Ok(UnknownVehiclePolicy::ZeroFill),
            "reject" => Ok(UnknownVehiclePolicy::Reject),
            other => Err(format!("unknown policy '{}'", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_policy_parse() {
        assert_eq!(
            "zero_fill".parse::<UnknownVehiclePolicy>(),
            Ok(UnknownVehiclePolicy::ZeroFill)
        );
        assert_eq!(
            " Reject ".parse::<UnknownVehiclePolicy>(),
            Ok(UnknownVehiclePolicy::Reject)
        );
        assert!("drop".parse::<UnknownVehiclePolicy>().is_err());
    }

    #[test]
    fn test_policy_display_round_trips() {
        for policy in [UnknownVehiclePolicy::ZeroFill, UnknownVehiclePolicy::Reject] {
            assert_eq!(policy.to_string().parse::<UnknownVehiclePolicy>(), Ok(policy));
        }
    }
}
