//! Snapshot entities
//!
//! Stored copies of a scoring cycle taken by an operator at the end of the
//! week. Payouts are made from these, not from the live leaderboard.

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use super::{RulesConfig, ScoreDistribution, WinnerRecord};

/// Winners of a cycle with the rules that produced them
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WinnersSnapshot {
    pub winners: Vec<WinnerRecord>,
    pub rules_config: RulesConfig,
    /// Unix time in milliseconds
    pub timestamp: i64,
}

/// Score distribution of a cycle with the rules that produced it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BestOfSnapshot {
    pub best_of_sassy: ScoreDistribution,
    pub rules_config: RulesConfig,
    /// Unix time in milliseconds
    pub timestamp: i64,
}

/// Render a snapshot timestamp for download file names
pub fn snapshot_time(timestamp_ms: i64) -> Option<DateTime<Utc>> {
    Utc.timestamp_millis_opt(timestamp_ms).single()
}
