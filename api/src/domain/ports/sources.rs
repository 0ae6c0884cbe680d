//! Upstream data source ports
//!
//! The counter store and the Farcaster hub feed each scoring cycle. Both are
//! read-only from this service's point of view.

use async_trait::async_trait;

use crate::domain::entities::{Cast, Fid, Like};
use crate::error::DomainError;

/// Source of raw view counts
#[async_trait]
pub trait EngagementSource: Send + Sync {
    /// Every counted cast with its attempted-view total.
    ///
    /// `mod_likes` is left empty; moderator approval comes from the
    /// reaction source.
    async fn view_counts(&self) -> Result<Vec<Cast>, DomainError>;
}

/// Source of likes on a cast
#[async_trait]
pub trait ReactionSource: Send + Sync {
    /// Likes on the cast identified by author fid and hash
    async fn likes(&self, fid: Fid, cast_hash: &str) -> Result<Vec<Like>, DomainError>;
}
