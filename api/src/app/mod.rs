//! Application layer
//!
//! Contains use cases and service orchestration.
//! Services coordinate between the scoring core and the ports.

pub mod cast_sort;
pub mod leaderboard_service;
pub mod payout_split;
pub mod snapshot_service;

pub use cast_sort::{CastView, SortBy};
pub use leaderboard_service::{Leaderboard, LeaderboardService, LeaderboardSettings};
pub use snapshot_service::SnapshotService;
