// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Emission factor catalog and per-trip CO₂ calculations.

use crate::models::{Estimate, VehicleComparison, VehicleEmission};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Vehicle type used as the avoidance baseline when none is configured.
pub const DEFAULT_BASELINE: &str = "Petrol Scooter";

/// Built-in emission factors (kg CO₂/km), in display order.
const DEFAULT_FACTORS: [(&str, f64); 4] = [
    ("Petrol Scooter", 0.092),
    ("Diesel Car", 0.171),
    ("Electric Scooter (Grid Avg)", 0.020),
    ("Electric Scooter (Clean Energy)", 0.000),
];

/// Round half away from zero to 3 decimal places.
///
/// Results that round to zero are always `+0.0`.
pub fn round3(value: f64) -> f64 {
    let rounded = (value * 1000.0).round() / 1000.0;
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

/// Immutable vehicle type → emission factor table with a baseline vehicle.
#[derive(Debug, Clone)]
pub struct EmissionCatalog {
    vehicles: Vec<VehicleEmission>,
    /// Normalized name → index into `vehicles`
    index: HashMap<String, usize>,
    baseline: usize,
}

impl Default for EmissionCatalog {
    fn default() -> Self {
        let vehicles = DEFAULT_FACTORS
            .iter()
            .map(|(name, factor)| VehicleEmission::new(*name, *factor))
            .collect::<Vec<_>>();
        let index = vehicles
            .iter()
            .enumerate()
            .map(|(i, v)| (Self::normalize(&v.name), i))
            .collect();

        Self {
            vehicles,
            index,
            baseline: 0,
        }
    }
}

impl EmissionCatalog {
    /// Build a catalog from entries in display order.
    pub fn new(vehicles: Vec<VehicleEmission>, baseline: &str) -> Result<Self, CatalogError> {
        if vehicles.is_empty() {
            return Err(CatalogError::Empty);
        }

        let mut index = HashMap::with_capacity(vehicles.len());
        for (i, vehicle) in vehicles.iter().enumerate() {
            if !vehicle.factor_kg_per_km.is_finite() || vehicle.factor_kg_per_km < 0.0 {
                return Err(CatalogError::InvalidFactor {
                    vehicle: vehicle.name.clone(),
                    factor: vehicle.factor_kg_per_km,
                });
            }

            let key = Self::normalize(&vehicle.name);
            if key.is_empty() {
                return Err(CatalogError::BlankVehicle(i + 1));
            }
            if index.insert(key, i).is_some() {
                return Err(CatalogError::DuplicateVehicle(vehicle.name.clone()));
            }
        }

        let baseline = *index
            .get(&Self::normalize(baseline))
            .ok_or_else(|| CatalogError::UnknownBaseline(baseline.to_string()))?;

        Ok(Self {
            vehicles,
            index,
            baseline,
        })
    }

    /// The built-in emission factors measured against another baseline.
    pub fn with_baseline(baseline: &str) -> Result<Self, CatalogError> {
        Self::new(Self::default().vehicles, baseline)
    }

    /// Load a catalog from a CSV file with `Vehicle Type` and
    /// `Emission Factor (kg/km)` columns.
    pub fn load_from_file<P: AsRef<Path>>(path: P, baseline: &str) -> Result<Self, CatalogError> {
        let data = fs::read_to_string(path.as_ref())?;
        Self::load_from_csv(&data, baseline)
    }

    /// Load a catalog from CSV text.
    pub fn load_from_csv(data: &str, baseline: &str) -> Result<Self, CatalogError> {
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(data.as_bytes());

        let vehicles = reader
            .deserialize::<VehicleEmission>()
            .collect::<Result<Vec<_>, _>>()?;

        let catalog = Self::new(vehicles, baseline)?;
        tracing::info!(
            count = catalog.vehicles.len(),
            baseline = %catalog.baseline().name,
            "Loaded emission factors"
        );
        Ok(catalog)
    }

    /// Lookup key for a vehicle type: trimmed and lowercased.
    pub fn normalize(raw: &str) -> String {
        raw.trim().to_lowercase()
    }

    /// All vehicle types in declaration order.
    pub fn vehicles(&self) -> &[VehicleEmission] {
        &self.vehicles
    }

    /// Vehicle type names in declaration order.
    pub fn vehicle_types(&self) -> Vec<&str> {
        self.vehicles.iter().map(|v| v.name.as_str()).collect()
    }

    pub fn baseline(&self) -> &VehicleEmission {
        &self.vehicles[self.baseline]
    }

    /// Look up a vehicle type regardless of case or surrounding whitespace.
    pub fn resolve(&self, vehicle_type: &str) -> Result<&VehicleEmission, UnknownVehicleError> {
        self.index
            .get(&Self::normalize(vehicle_type))
            .map(|&i| &self.vehicles[i])
            .ok_or_else(|| UnknownVehicleError(vehicle_type.trim().to_string()))
    }

    /// kg CO₂ emitted over `distance_km`.
    pub fn emissions_for(
        &self,
        distance_km: f64,
        vehicle_type: &str,
    ) -> Result<f64, UnknownVehicleError> {
        let vehicle = self.resolve(vehicle_type)?;
        Ok(round3(distance_km * vehicle.factor_kg_per_km))
    }

    /// kg CO₂ avoided versus the baseline vehicle over `distance_km`.
    ///
    /// Negative when the vehicle emits more than the baseline.
    pub fn avoided_for(
        &self,
        distance_km: f64,
        vehicle_type: &str,
    ) -> Result<f64, UnknownVehicleError> {
        let vehicle = self.resolve(vehicle_type)?;
        Ok(round3(
            distance_km * (self.baseline().factor_kg_per_km - vehicle.factor_kg_per_km),
        ))
    }

    /// Emitted and avoided figures for one trip, without logging it.
    pub fn estimate(
        &self,
        distance_km: f64,
        vehicle_type: &str,
    ) -> Result<Estimate, UnknownVehicleError> {
        let vehicle = self.resolve(vehicle_type)?;
        let baseline = self.baseline();

        Ok(Estimate {
            vehicle_type: vehicle.name.clone(),
            distance_km,
            co2_emitted_kg: round3(distance_km * vehicle.factor_kg_per_km),
            co2_avoided_kg: round3(
                distance_km * (baseline.factor_kg_per_km - vehicle.factor_kg_per_km),
            ),
            baseline_vehicle: baseline.name.clone(),
        })
    }

    /// Emitted kg for the same distance under every vehicle type.
    pub fn compare(&self, distance_km: f64) -> Vec<VehicleComparison> {
        self.vehicles
            .iter()
            .map(|v| VehicleComparison {
                vehicle_type: v.name.clone(),
                co2_emitted_kg: round3(distance_km * v.factor_kg_per_km),
            })
            .collect()
    }
}

/// Lookup of a vehicle type the catalog does not know.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown vehicle type: {0}")]
pub struct UnknownVehicleError(pub String);

/// Errors from building or loading a catalog.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("Failed to read file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse emission factors: {0}")]
    Csv(#[from] csv::Error),

    #[error("Catalog has no vehicle types")]
    Empty,

    #[error("Blank vehicle type in entry {0}")]
    BlankVehicle(usize),

    #[error("Emission factor for '{vehicle}' must be a non-negative number, got {factor}")]
    InvalidFactor { vehicle: String, factor: f64 },

    #[error("Duplicate vehicle type: {0}")]
    DuplicateVehicle(String),

    #[error("Baseline vehicle '{0}' is not in the catalog")]
    UnknownBaseline(String),
}
