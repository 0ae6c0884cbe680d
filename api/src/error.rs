//! Unified error types for the Sassy API
//!
//! This module defines error types for each layer:
//! - `RulesError` / `ScoringError`: Scoring core errors
//! - `DomainError`: Port errors (counter store, hub, snapshot store)
//! - `UpstreamError`: HTTP adapter errors
//! - `AppError`: Application layer errors (wraps the above for HTTP responses)

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Invalid rules configuration
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RulesError {
    #[error("topN must be at least 1")]
    ZeroWinners,

    #[error("total pool must be a finite non-negative amount, got {0}")]
    InvalidPool(f64),

    #[error("min payout must be a finite non-negative amount, got {0}")]
    InvalidMinPayout(f64),

    #[error(
        "min payout {min_payout} for {top_n} winners exceeds the total pool {total_pool}"
    )]
    PoolOversubscribed {
        top_n: usize,
        min_payout: f64,
        total_pool: f64,
    },

    #[error("scoring vector weights must be finite and non-negative")]
    InvalidVector,

    #[error("unsupported rules version {0}")]
    UnsupportedVersion(u32),
}

/// Scoring core errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScoringError {
    #[error("cannot score an empty population")]
    EmptyPopulation,
}

/// Domain layer errors - raised by port implementations
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Upstream error: {0}")]
    Upstream(#[from] UpstreamError),
}

/// HTTP upstream errors (counter store, snapshot store, hub)
#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("Rate limited")]
    RateLimited,

    #[error("Unauthorized - invalid token")]
    Unauthorized,

    #[error("Deserialization error: {0}")]
    Deserialization(String),
}

/// Configuration errors raised while reading the environment
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{name} is not valid: {value}")]
    InvalidVar { name: &'static str, value: String },

    #[error("Invalid rules: {0}")]
    Rules(#[from] RulesError),
}

/// Application layer errors - used by HTTP handlers
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Domain(#[from] DomainError),

    #[error("Scoring error: {0}")]
    Scoring(#[from] ScoringError),

    #[error("Invalid request: {0}")]
    BadRequest(String),

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

/// Error response body for JSON responses
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error, details) = match &self {
            AppError::Domain(DomainError::Upstream(e)) => {
                tracing::error!("Upstream error: {}", e);
                match e {
                    UpstreamError::RateLimited => {
                        (StatusCode::TOO_MANY_REQUESTS, "Rate limited", None)
                    }
                    UpstreamError::Api { message, .. } => (
                        StatusCode::BAD_GATEWAY,
                        "Upstream service error",
                        Some(message.clone()),
                    ),
                    _ => (StatusCode::BAD_GATEWAY, "Upstream service error", None),
                }
            }
            AppError::Scoring(ScoringError::EmptyPopulation) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "Scoring error",
                Some(ScoringError::EmptyPopulation.to_string()),
            ),
            AppError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, "Bad request", Some(msg.clone()))
            }
            AppError::Unauthorized => (StatusCode::UNAUTHORIZED, "Unauthorized", None),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "Not found", Some(msg.clone())),
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error",
                    None,
                )
            }
        };

        let body = Json(ErrorResponse {
            error: error.to_string(),
            details,
        });

        (status, body).into_response()
    }
}

/// Parse error for counter store keys
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("Malformed usage key: {0}")]
    MalformedKey(String),

    #[error("Invalid fid in usage key: {0}")]
    InvalidFid(#[from] std::num::ParseIntError),

    #[error("Invalid count for {key}: {value}")]
    InvalidCount { key: String, value: String },
}
