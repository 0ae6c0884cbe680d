//! Winner entity
//!
//! One paid owner of the weekly cycle.

use serde::{Deserialize, Serialize};

use super::Fid;

/// Aggregate score and payout of one owner
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WinnerRecord {
    pub fid: Fid,
    pub username: String,
    /// Sum of raw counts over the owner's scored casts
    pub raw_score: f64,
    /// Sum of smoothed scores over the owner's scored casts
    pub smooth_score: f64,
    pub num_casts: usize,
    /// Dollars
    pub payout: f64,
}
