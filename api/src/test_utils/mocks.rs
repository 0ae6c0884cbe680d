//! Mock implementations of port traits
//!
//! These are in-memory implementations that can be configured for testing.

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, RwLock};

use crate::domain::entities::{BestOfSnapshot, Cast, Fid, Like, WinnersSnapshot};
use crate::domain::ports::{EngagementSource, ReactionSource, SnapshotRepository};
use crate::error::{DomainError, UpstreamError};

// ============================================================================
// Counter store
// ============================================================================

/// Serves a fixed list of counted casts
#[derive(Default)]
pub struct InMemoryEngagementSource {
    casts: Vec<Cast>,
}

impl InMemoryEngagementSource {
    pub fn new(casts: Vec<Cast>) -> Self {
        Self { casts }
    }
}

#[async_trait]
impl EngagementSource for InMemoryEngagementSource {
    async fn view_counts(&self) -> Result<Vec<Cast>, DomainError> {
        Ok(self.casts.clone())
    }
}

// ============================================================================
// Hub
// ============================================================================

/// Likes keyed by cast hash; unknown casts have none
#[derive(Default)]
pub struct InMemoryReactionSource {
    likes: HashMap<String, Vec<Like>>,
    failing: HashSet<String>,
}

impl InMemoryReactionSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_likes(mut self, cast_hash: &str, likes: Vec<Like>) -> Self {
        self.likes.insert(cast_hash.to_string(), likes);
        self
    }

    /// Make lookups for this cast fail like an unreachable hub
    pub fn failing_for(mut self, cast_hash: &str) -> Self {
        self.failing.insert(cast_hash.to_string());
        self
    }
}

#[async_trait]
impl ReactionSource for InMemoryReactionSource {
    async fn likes(&self, _fid: Fid, cast_hash: &str) -> Result<Vec<Like>, DomainError> {
        if self.failing.contains(cast_hash) {
            return Err(DomainError::Upstream(UpstreamError::Api {
                status: 503,
                message: "hub unavailable".to_string(),
            }));
        }
        Ok(self.likes.get(cast_hash).cloned().unwrap_or_default())
    }
}

// ============================================================================
// Snapshot store
// ============================================================================

#[derive(Default)]
pub struct InMemorySnapshotRepository {
    winners: Arc<RwLock<Option<WinnersSnapshot>>>,
    best_of: Arc<RwLock<Option<BestOfSnapshot>>>,
}

impl InMemorySnapshotRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SnapshotRepository for InMemorySnapshotRepository {
    async fn save_winners(&self, snapshot: &WinnersSnapshot) -> Result<(), DomainError> {
        *self.winners.write().unwrap() = Some(snapshot.clone());
        Ok(())
    }

    async fn get_winners(&self) -> Result<Option<WinnersSnapshot>, DomainError> {
        Ok(self.winners.read().unwrap().clone())
    }

    async fn save_best_of(&self, snapshot: &BestOfSnapshot) -> Result<(), DomainError> {
        *self.best_of.write().unwrap() = Some(snapshot.clone());
        Ok(())
    }

    async fn get_best_of(&self) -> Result<Option<BestOfSnapshot>, DomainError> {
        Ok(self.best_of.read().unwrap().clone())
    }
}
