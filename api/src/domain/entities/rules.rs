//! Weekly rules configuration
//!
//! One validated parameter object drives the whole scoring cycle. Invalid
//! combinations are rejected at construction so the allocator never sees an
//! over-subscribed pool.

use serde::{Deserialize, Serialize};

use crate::error::RulesError;

/// Current rules schema version
pub const RULES_VERSION: u32 = 1;

/// Number of owners paid each week
pub const DEFAULT_TOP_N: usize = 15;

/// Weekly pool in dollars
pub const DEFAULT_TOTAL_POOL: f64 = 100.0;

/// Guaranteed payout per winner in dollars
pub const DEFAULT_MIN_PAYOUT: f64 = 5.0;

/// Moderator likes required for a cast to qualify
pub const DEFAULT_MIN_MODS: usize = 2;

/// Weights of the engagement signals
///
/// Only `views` feeds the raw count today; likes and replies are published
/// with the rules so the weighting can change without a schema bump.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoringVector {
    pub views: f64,
    pub likes: f64,
    pub replies: f64,
}

impl Default for ScoringVector {
    fn default() -> Self {
        Self {
            views: 1.0,
            likes: 0.0,
            replies: 0.0,
        }
    }
}

/// Validated rules for one scoring cycle
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RulesConfig {
    top_n: usize,
    total_pool: f64,
    min_payout: f64,
    min_mods: usize,
    vector: ScoringVector,
    version: u32,
}

/// Wire shape, validated through `RulesConfig::new` on deserialize
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawRulesConfig {
    top_n: usize,
    total_pool: f64,
    min_payout: f64,
    min_mods: usize,
    #[serde(default)]
    vector: ScoringVector,
    #[serde(default = "default_version")]
    version: u32,
}

fn default_version() -> u32 {
    RULES_VERSION
}

impl<'de> Deserialize<'de> for RulesConfig {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = RawRulesConfig::deserialize(deserializer)?;
        if raw.version != RULES_VERSION {
            return Err(serde::de::Error::custom(RulesError::UnsupportedVersion(
                raw.version,
            )));
        }
        RulesConfig::new(raw.top_n, raw.total_pool, raw.min_payout, raw.min_mods)
            .and_then(|rules| rules.with_vector(raw.vector))
            .map_err(serde::de::Error::custom)
    }
}

impl RulesConfig {
    /// Build a rules config, rejecting combinations that cannot pay out.
    ///
    /// The floor is checked against `top_n` winners, the most the allocator
    /// can ever select, so every cycle has a non-negative discretionary pool.
    pub fn new(
        top_n: usize,
        total_pool: f64,
        min_payout: f64,
        min_mods: usize,
    ) -> Result<Self, RulesError> {
        if top_n == 0 {
            return Err(RulesError::ZeroWinners);
        }
        if !total_pool.is_finite() || total_pool < 0.0 {
            return Err(RulesError::InvalidPool(total_pool));
        }
        if !min_payout.is_finite() || min_payout < 0.0 {
            return Err(RulesError::InvalidMinPayout(min_payout));
        }
        let floor_total = min_payout * top_n as f64;
        if floor_total > total_pool {
            return Err(RulesError::PoolOversubscribed {
                top_n,
                min_payout,
                total_pool,
            });
        }

        Ok(Self {
            top_n,
            total_pool,
            min_payout,
            min_mods,
            vector: ScoringVector::default(),
            version: RULES_VERSION,
        })
    }

    pub fn with_vector(mut self, vector: ScoringVector) -> Result<Self, RulesError> {
        let weights = [vector.views, vector.likes, vector.replies];
        if weights.iter().any(|w| !w.is_finite() || *w < 0.0) {
            return Err(RulesError::InvalidVector);
        }
        self.vector = vector;
        Ok(self)
    }

    /// Same rules with a different moderator threshold
    pub fn with_min_mods(mut self, min_mods: usize) -> Self {
        self.min_mods = min_mods;
        self
    }

    pub fn top_n(&self) -> usize {
        self.top_n
    }

    pub fn total_pool(&self) -> f64 {
        self.total_pool
    }

    pub fn min_payout(&self) -> f64 {
        self.min_payout
    }

    pub fn min_mods(&self) -> usize {
        self.min_mods
    }
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            top_n: DEFAULT_TOP_N,
            total_pool: DEFAULT_TOTAL_POOL,
            min_payout: DEFAULT_MIN_PAYOUT,
            min_mods: DEFAULT_MIN_MODS,
            vector: ScoringVector::default(),
            version: RULES_VERSION,
        }
    }
}
