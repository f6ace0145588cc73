// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application error types with consistent API responses.

use crate::services::catalog::UnknownVehicleError;
use crate::services::ledger::LedgerError;
use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Application error type that converts to HTTP responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Unknown vehicle type: {0}")]
    UnknownVehicle(String),

    #[error("Invalid distance: {0}")]
    InvalidDistance(String),

    #[error("Malformed input: {0}")]
    MalformedInput(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Invalid request: {0}")]
    BadRequest(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<LedgerError> for AppError {
    fn from(err: LedgerError) -> Self {
        match err {
            LedgerError::UnknownVehicle(name) => AppError::UnknownVehicle(name),
            other @ LedgerError::InvalidDistance(_) => AppError::InvalidDistance(other.to_string()),
            LedgerError::MalformedInput(msg) => AppError::MalformedInput(msg),
        }
    }
}

impl From<UnknownVehicleError> for AppError {
    fn from(err: UnknownVehicleError) -> Self {
        AppError::UnknownVehicle(err.0)
    }
}

// Extractor rejections get the same JSON body as every other client error.

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

/// JSON error response body
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error, details) = match &self {
            AppError::UnknownVehicle(name) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "unknown_vehicle",
                Some(format!("Unknown vehicle type: {}", name)),
            ),
            AppError::InvalidDistance(msg) => {
                (StatusCode::BAD_REQUEST, "invalid_distance", Some(msg.clone()))
            }
            AppError::MalformedInput(msg) => {
                (StatusCode::BAD_REQUEST, "malformed_input", Some(msg.clone()))
            }
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", Some(msg.clone())),
            AppError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, "bad_request", Some(msg.clone()))
            }
            AppError::Internal(err) => {
                tracing::error!(error = %err, "Internal server error");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal_error", None)
            }
        };

        let body = ErrorResponse {
            error: error.to_string(),
            details,
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias for handlers
pub type Result<T> = std::result::Result<T, AppError>;
