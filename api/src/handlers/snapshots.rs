//! Snapshot handlers
//!
//! Downloads of the stored weekly snapshots and operator writes.
//! A POST with an empty body snapshots the live leaderboard; otherwise the
//! body is validated and stored as given.

use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::entities::{snapshot_time, RulesConfig, ScoreDistribution, WinnerRecord};
use crate::error::{AppError, ScoringError};
use crate::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WinnersBody {
    pub winners: Vec<WinnerRecord>,
    pub rules_config: RulesConfig,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BestOfBody {
    pub best_of_sassy: ScoreDistribution,
    pub rules_config: RulesConfig,
}

#[derive(Debug, Serialize)]
pub struct SavedResponse {
    pub ok: bool,
    pub timestamp: i64,
}

/// Parse an optional JSON body; `None` when the body is blank
fn parse_body<T: for<'de> Deserialize<'de>>(body: &str) -> Result<Option<T>, AppError> {
    if body.trim().is_empty() {
        return Ok(None);
    }
    serde_json::from_str(body)
        .map(Some)
        .map_err(|e| AppError::BadRequest(e.to_string()))
}

/// `attachment; filename="{prefix}-{time}.{ext}"` for a snapshot timestamp
fn attachment(prefix: &str, timestamp_ms: i64, ext: &str) -> String {
    let time = snapshot_time(timestamp_ms).unwrap_or_else(Utc::now);
    format!(
        "attachment; filename=\"{}-{}.{}\"",
        prefix,
        time.to_rfc3339_opts(SecondsFormat::Millis, true),
        ext
    )
}

fn json_download<T: Serialize>(value: &T, disposition: String) -> Result<Response, AppError> {
    let body =
        serde_json::to_string_pretty(value).map_err(|e| AppError::Internal(e.to_string()))?;
    Ok((
        [
            (header::CONTENT_TYPE, "application/json".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        body,
    )
        .into_response())
}

/// GET /api/munnies
pub async fn get_munnies(State(state): State<AppState>) -> Result<Response, AppError> {
    let snapshot = state.snapshot_service.winners().await?;
    let disposition = attachment("winners-snapshot", snapshot.timestamp, "json");
    json_download(&snapshot, disposition)
}

/// GET /api/munnies/csv
pub async fn get_munnies_csv(State(state): State<AppState>) -> Result<Response, AppError> {
    let sheet = state.snapshot_service.winners_csv().await?;
    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                attachment("payouts", sheet.timestamp, "csv"),
            ),
        ],
        sheet.csv,
    )
        .into_response())
}

/// POST /api/munnies (operator)
pub async fn post_munnies(
    State(state): State<AppState>,
    body: String,
) -> Result<Json<SavedResponse>, AppError> {
    let (winners, rules_config) = match parse_body::<WinnersBody>(&body)? {
        Some(body) => (body.winners, body.rules_config),
        None => {
            let leaderboard = state.leaderboard_service.current(None).await?;
            (leaderboard.cycle.winners, leaderboard.rules_config)
        }
    };

    let snapshot = state
        .snapshot_service
        .save_winners(winners, rules_config)
        .await?;
    Ok(Json(SavedResponse {
        ok: true,
        timestamp: snapshot.timestamp,
    }))
}

/// GET /api/best-of-sassy
pub async fn get_best_of(State(state): State<AppState>) -> Result<Response, AppError> {
    let snapshot = state.snapshot_service.best_of().await?;
    let disposition = attachment("best-of-sassy-snapshot", snapshot.timestamp, "json");
    json_download(&snapshot, disposition)
}

/// POST /api/best-of-sassy (operator)
pub async fn post_best_of(
    State(state): State<AppState>,
    body: String,
) -> Result<Json<SavedResponse>, AppError> {
    let (distribution, rules_config) = match parse_body::<BestOfBody>(&body)? {
        Some(body) => (body.best_of_sassy, body.rules_config),
        None => {
            let leaderboard = state.leaderboard_service.current(None).await?;
            let distribution = leaderboard
                .cycle
                .distribution
                .ok_or(ScoringError::EmptyPopulation)?;
            (distribution, leaderboard.rules_config)
        }
    };

    let snapshot = state
        .snapshot_service
        .save_best_of(distribution, rules_config)
        .await?;
    Ok(Json(SavedResponse {
        ok: true,
        timestamp: snapshot.timestamp,
    }))
}
