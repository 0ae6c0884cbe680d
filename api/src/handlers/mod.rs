//! HTTP handlers
//!
//! Axum request handlers for the API endpoints.

pub mod leaderboard;
pub mod snapshots;

pub use leaderboard::{get_leaderboard, get_rules, list_casts};
pub use snapshots::{get_best_of, get_munnies, get_munnies_csv, post_best_of, post_munnies};
