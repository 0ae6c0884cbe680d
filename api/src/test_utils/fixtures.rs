//! Test fixtures
//!
//! Factory functions for creating test data with sensible defaults.

use crate::domain::entities::{Cast, Fid, Like, RulesConfig, WinnerRecord};

/// Create a cast counted `count` times, owned by `user{fid}`
pub fn test_cast(fid: u64, cast_hash: &str, count: u64) -> Cast {
    Cast::new(fid, &format!("user{}", fid), cast_hash, count)
}

/// One like per fid, a minute apart
pub fn approved_likes(fids: &[u64]) -> Vec<Like> {
    fids.iter()
        .enumerate()
        .map(|(i, &fid)| Like {
            fid: Fid(fid),
            timestamp_ms: 1_742_900_000_000 + i as i64 * 60_000,
        })
        .collect()
}

pub fn test_winner(fid: u64, username: &str, payout: f64) -> WinnerRecord {
    WinnerRecord {
        fid: Fid(fid),
        username: username.to_string(),
        raw_score: 10.0,
        smooth_score: 10.0,
        num_casts: 1,
        payout,
    }
}

/// Default pool of 100 split among 15
pub fn test_rules() -> RulesConfig {
    RulesConfig::default()
}
