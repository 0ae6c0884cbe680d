//! Sassy API Server
//!
//! Ranks the week's most-seen casts in the channel and splits the reward pool
//! among their authors. Uses hexagonal (ports & adapters) architecture for
//! clean separation of concerns.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use axum::{
    middleware,
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use tower_governor::governor::GovernorConfigBuilder;
use tower_governor::key_extractor::GlobalKeyExtractor;
use tower_governor::GovernorLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod adapters;
mod app;
mod auth;
mod config;
mod domain;
mod error;
mod handlers;

#[cfg(test)]
mod test_utils;

#[cfg(test)]
mod integration_tests;

use adapters::{HubClient, UpstashClient, UpstashEngagementSource, UpstashSnapshotRepository};
use app::{LeaderboardService, LeaderboardSettings, SnapshotService};
use config::Config;
use domain::ports::{EngagementSource, ReactionSource, SnapshotRepository};

pub type DynLeaderboardService = LeaderboardService<dyn EngagementSource, dyn ReactionSource>;
pub type DynSnapshotService = SnapshotService<dyn SnapshotRepository>;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub leaderboard_service: Arc<DynLeaderboardService>,
    pub snapshot_service: Arc<DynSnapshotService>,
    pub config: Config,
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Build the HTTP router
pub fn build_router(state: AppState) -> anyhow::Result<Router> {
    // Snapshot writes: burst of 5, then one more every 2 seconds. One shared
    // bucket, applied inside the auth layer so only authenticated writes
    // count against it.
    let governor_config = Arc::new(
        GovernorConfigBuilder::default()
            .key_extractor(GlobalKeyExtractor)
            .per_second(2)
            .burst_size(5)
            .finish()
            .context("Failed to build governor config")?,
    );

    // Operator routes (snapshot writes)
    let operator_routes = Router::new()
        .route("/api/munnies", post(handlers::post_munnies))
        .route("/api/best-of-sassy", post(handlers::post_best_of))
        .layer(GovernorLayer {
            config: governor_config,
        })
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth::operator_middleware,
        ));

    let app = Router::new()
        .route("/health", get(health))
        // Live leaderboard (public)
        .route("/rules", get(handlers::get_rules))
        .route("/casts", get(handlers::list_casts))
        .route("/leaderboard", get(handlers::get_leaderboard))
        // Snapshot downloads (public)
        .route("/api/munnies", get(handlers::get_munnies))
        .route("/api/munnies/csv", get(handlers::get_munnies_csv))
        .route("/api/best-of-sassy", get(handlers::get_best_of))
        .merge(operator_routes)
        // Middleware
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    Ok(app)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,sassy_api=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Sassy API...");

    // Load configuration
    let config = Config::from_env().context("Invalid configuration")?;
    if !config.snapshots_writable() {
        tracing::warn!("OPERATOR_TOKEN_SHA256 not set, snapshot writes are disabled");
    }
    if config.moderators.is_empty() && config.rules.min_mods() > 0 {
        tracing::warn!("No moderators configured, no cast can become eligible");
    }

    // Create adapters
    let counter_store = Arc::new(UpstashClient::new(
        config.counter_store_url.clone(),
        config.counter_store_token.clone(),
    ));
    let snapshot_store = Arc::new(UpstashClient::new(
        config.snapshot_store_url.clone(),
        config.snapshot_store_token.clone(),
    ));

    let engagement: Arc<dyn EngagementSource> =
        Arc::new(UpstashEngagementSource::new(counter_store));
    let reactions: Arc<dyn ReactionSource> = Arc::new(HubClient::new(config.hub_url.clone()));
    let snapshots: Arc<dyn SnapshotRepository> =
        Arc::new(UpstashSnapshotRepository::new(snapshot_store));

    // Create application services
    let leaderboard_service = Arc::new(
        LeaderboardService::new(engagement, reactions).with_settings(LeaderboardSettings {
            rules: config.rules.clone(),
            exclusions: config.exclusions.clone(),
            moderators: config.moderators.clone(),
            most_seen_per_fid: config.most_seen_per_fid,
        }),
    );
    let snapshot_service = Arc::new(SnapshotService::new(snapshots));

    tracing::info!(
        top_n = config.rules.top_n(),
        pool = config.rules.total_pool(),
        min_mods = config.rules.min_mods(),
        moderators = config.moderators.len(),
        "Rules loaded"
    );

    let port = config.port;
    let state = AppState {
        leaderboard_service,
        snapshot_service,
        config,
    };
    let app = build_router(state)?;

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
