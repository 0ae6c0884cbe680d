//! Leaderboard handlers
//!
//! Live views of the current week, computed on every request.

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;

use crate::app::{CastView, Leaderboard, SortBy};
use crate::domain::entities::{Fid, RulesConfig};
use crate::error::AppError;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct CastsQuery {
    pub sort: Option<String>,
    pub viewer_fid: Option<u64>,
}

#[derive(Debug, Deserialize)]
pub struct LeaderboardQuery {
    pub min_mods: Option<usize>,
}

/// GET /rules
pub async fn get_rules(State(state): State<AppState>) -> Json<RulesConfig> {
    Json(state.leaderboard_service.rules().clone())
}

/// GET /casts - most-seen casts with their likes
pub async fn list_casts(
    State(state): State<AppState>,
    Query(query): Query<CastsQuery>,
) -> Result<Json<Vec<CastView>>, AppError> {
    let sort = match query.sort.as_deref() {
        Some(sort) => sort.parse::<SortBy>().map_err(AppError::BadRequest)?,
        None => SortBy::default(),
    };

    let casts = state
        .leaderboard_service
        .list_casts(query.viewer_fid.map(Fid), sort)
        .await?;
    Ok(Json(casts))
}

/// GET /leaderboard - scoring cycle of the current week
pub async fn get_leaderboard(
    State(state): State<AppState>,
    Query(query): Query<LeaderboardQuery>,
) -> Result<Json<Leaderboard>, AppError> {
    let leaderboard = state.leaderboard_service.current(query.min_mods).await?;
    Ok(Json(leaderboard))
}
