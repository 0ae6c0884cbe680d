//! Display ordering of leaderboard casts

use serde::Serialize;

use crate::domain::entities::{Cast, CastLikes};

/// Sort key offered to viewers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortBy {
    #[default]
    Views,
    Likes,
    /// Most recently liked first
    Timestamp,
}

impl std::str::FromStr for SortBy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "views" => Ok(SortBy::Views),
            "likes" => Ok(SortBy::Likes),
            "timestamp" => Ok(SortBy::Timestamp),
            _ => Err(format!(
                "Unknown sort: {}. Use: views, likes, timestamp",
                s
            )),
        }
    }
}

/// A cast as listed to viewers
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CastView {
    #[serde(flatten)]
    pub cast: Cast,
    pub likes: usize,
    /// Count only; the flattened cast carries the moderator fids
    #[serde(rename = "modLikeCount")]
    pub mod_likes: usize,
    pub last_liked_ms: i64,
}

impl CastView {
    pub fn new(cast: Cast, likes: CastLikes) -> Self {
        Self {
            likes: likes.all.len(),
            mod_likes: likes.moderators.len(),
            last_liked_ms: likes.last_liked_ms,
            cast: Cast {
                mod_likes: likes.moderators,
                ..cast
            },
        }
    }
}

/// Stable descending sort on the chosen key
pub fn sort_casts(casts: &mut [CastView], sort: SortBy) {
    match sort {
        SortBy::Views => casts.sort_by(|a, b| b.cast.count.cmp(&a.cast.count)),
        SortBy::Likes => casts.sort_by(|a, b| b.likes.cmp(&a.likes)),
        SortBy::Timestamp => casts.sort_by(|a, b| b.last_liked_ms.cmp(&a.last_liked_ms)),
    }
}
