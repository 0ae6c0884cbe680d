//! Smoothed score entities
//!
//! Output of the smoothing transform. Field names stay camelCase on the wire
//! so stored "best of" snapshots remain readable.

use serde::{Deserialize, Serialize};

use super::Fid;

/// Score of one cast within its population
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreRecord {
    pub fid: Fid,
    pub username: String,
    pub cast_hash: String,
    pub raw: f64,
    pub raw_zscore: f64,
    pub smooth: f64,
    pub smooth_zscore: f64,
}

/// Population statistics plus every scored cast
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreDistribution {
    pub n_raw: usize,
    pub sum_raw: f64,
    pub mean_raw: f64,
    pub stdev_raw: f64,
    pub sum_smooth: f64,
    pub items: Vec<ScoreRecord>,
}

impl ScoreDistribution {
    /// All numbers in the distribution are finite
    pub fn is_finite(&self) -> bool {
        [self.sum_raw, self.mean_raw, self.stdev_raw, self.sum_smooth]
            .iter()
            .all(|v| v.is_finite())
            && self.items.iter().all(|i| {
                i.raw.is_finite()
                    && i.raw_zscore.is_finite()
                    && i.smooth.is_finite()
                    && i.smooth_zscore.is_finite()
            })
    }
}
