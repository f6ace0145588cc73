//! Application configuration loaded from environment variables.
//!
//! The emission catalog and unknown-vehicle policy are fixed at startup;
//! nothing here can be changed while the server is running.

use crate::models::UnknownVehiclePolicy;
use crate::services::catalog::DEFAULT_BASELINE;
use std::env;
use std::path::PathBuf;

/// Default upper bound on an uploaded trip log (1 MiB).
const DEFAULT_MAX_IMPORT_BYTES: usize = 1024 * 1024;

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server port
    pub port: u16,
    /// Frontend URL allowed by CORS
    pub frontend_url: String,
    /// Vehicle type that avoided emissions are measured against
    pub baseline_vehicle: String,
    /// Optional CSV overriding the built-in emission factors
    pub emission_factors_path: Option<PathBuf>,
    /// Handling of trips whose vehicle type is not in the catalog
    pub unknown_vehicle_policy: UnknownVehiclePolicy,
    /// Largest accepted import body
    pub max_import_bytes: usize,
}

impl Default for Config {
    /// Default config for testing only.
    fn default() -> Self {
        Self {
            port: 8080,
            frontend_url: "http://localhost:8501".to_string(),
            baseline_vehicle: DEFAULT_BASELINE.to_string(),
            emission_factors_path: None,
            unknown_vehicle_policy: UnknownVehiclePolicy::ZeroFill,
            max_import_bytes: DEFAULT_MAX_IMPORT_BYTES,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Every variable is optional; unset ones fall back to the defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let defaults = Self::default();

        Ok(Self {
            port: parse_var("PORT")?.unwrap_or(defaults.port),
            frontend_url: env::var("FRONTEND_URL").unwrap_or(defaults.frontend_url),
            baseline_vehicle: env::var("BASELINE_VEHICLE")
                .map(|v| v.trim().to_string())
                .unwrap_or(defaults.baseline_vehicle),
            emission_factors_path: env::var("EMISSION_FACTORS_PATH")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .map(PathBuf::from),
            unknown_vehicle_policy: parse_var("UNKNOWN_VEHICLE_POLICY")?
                .unwrap_or(defaults.unknown_vehicle_policy),
            max_import_bytes: parse_var("MAX_IMPORT_BYTES")?.unwrap_or(defaults.max_import_bytes),
        })
    }
}

/// Parse an optional environment variable, rejecting values that are set but invalid.
fn parse_var<T>(name: &'static str) -> Result<Option<T>, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|e: T::Err| ConfigError::Invalid {
                name,
                reason: e.to_string(),
            }),
        Err(_) => Ok(None),
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for environment variable {name}: {reason}")]
    Invalid { name: &'static str, reason: String },
}
