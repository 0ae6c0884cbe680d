//! Repository port traits
//!
//! These traits define the interface for snapshot persistence.
//! Implementations are provided by adapters (e.g., the REST key-value store).

use async_trait::async_trait;

use crate::domain::entities::{BestOfSnapshot, WinnersSnapshot};
use crate::error::DomainError;

/// Repository for weekly snapshots
///
/// Only the latest snapshot of each kind is kept; saving replaces it.
#[async_trait]
pub trait SnapshotRepository: Send + Sync {
    /// Store the winners snapshot
    async fn save_winners(&self, snapshot: &WinnersSnapshot) -> Result<(), DomainError>;

    /// Latest winners snapshot, if one was taken
    async fn get_winners(&self) -> Result<Option<WinnersSnapshot>, DomainError>;

    /// Store the score distribution snapshot
    async fn save_best_of(&self, snapshot: &BestOfSnapshot) -> Result<(), DomainError>;

    /// Latest score distribution snapshot, if one was taken
    async fn get_best_of(&self) -> Result<Option<BestOfSnapshot>, DomainError>;
}
