//! Snapshot repository on the REST key-value store

use std::sync::Arc;

use async_trait::async_trait;

use super::UpstashClient;
use crate::domain::entities::{BestOfSnapshot, WinnersSnapshot};
use crate::domain::ports::SnapshotRepository;
use crate::error::DomainError;

pub const WINNERS_KEY: &str = "snapshot-winners";
pub const BEST_OF_KEY: &str = "snapshot-best-of-sassy";

pub struct UpstashSnapshotRepository {
    client: Arc<UpstashClient>,
}

impl UpstashSnapshotRepository {
    pub fn new(client: Arc<UpstashClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl SnapshotRepository for UpstashSnapshotRepository {
    async fn save_winners(&self, snapshot: &WinnersSnapshot) -> Result<(), DomainError> {
        Ok(self.client.set_json(WINNERS_KEY, snapshot).await?)
    }

    async fn get_winners(&self) -> Result<Option<WinnersSnapshot>, DomainError> {
        Ok(self.client.get_json(WINNERS_KEY).await?)
    }

    async fn save_best_of(&self, snapshot: &BestOfSnapshot) -> Result<(), DomainError> {
        Ok(self.client.set_json(BEST_OF_KEY, snapshot).await?)
    }

    async fn get_best_of(&self) -> Result<Option<BestOfSnapshot>, DomainError> {
        Ok(self.client.get_json(BEST_OF_KEY).await?)
    }
}
