//! Farcaster hub client for cast reactions

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::domain::entities::{Fid, Like};
use crate::domain::ports::ReactionSource;
use crate::error::{DomainError, UpstreamError};

/// Farcaster epoch (2021-01-01T00:00:00Z) in unix seconds
pub const FARCASTER_EPOCH: i64 = 1_609_459_200;

/// Hub reaction type for likes
const REACTION_TYPE_LIKE: &str = "1";

/// Largest page the hub serves
const MAX_REACTIONS_PAGE_SIZE: u32 = 100;

/// Convert a hub timestamp (seconds since the Farcaster epoch) to unix ms
pub fn hub_timestamp_to_unix_ms(timestamp: i64) -> i64 {
    (timestamp + FARCASTER_EPOCH) * 1000
}

#[derive(Debug, Deserialize)]
struct ReactionsResponse {
    #[serde(default)]
    messages: Vec<ReactionMessage>,
}

#[derive(Debug, Deserialize)]
struct ReactionMessage {
    data: Option<ReactionData>,
}

#[derive(Debug, Deserialize)]
struct ReactionData {
    fid: u64,
    #[serde(default)]
    timestamp: i64,
}

impl ReactionsResponse {
    fn into_likes(self) -> Vec<Like> {
        self.messages
            .into_iter()
            .filter_map(|m| m.data)
            .map(|d| Like {
                fid: Fid(d.fid),
                timestamp_ms: hub_timestamp_to_unix_ms(d.timestamp),
            })
            .collect()
    }
}

/// Reaction source backed by a hub's HTTP API
pub struct HubClient {
    http: Client,
    base_url: String,
}

impl HubClient {
    pub fn new(base_url: String) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn reactions_url(&self, fid: Fid, cast_hash: &str) -> String {
        format!(
            "{}/v1/reactionsByCast?target_fid={}&target_hash={}&reaction_type={}&page_size={}",
            self.base_url,
            fid,
            urlencoding::encode(cast_hash),
            REACTION_TYPE_LIKE,
            MAX_REACTIONS_PAGE_SIZE
        )
    }
}

#[async_trait]
impl ReactionSource for HubClient {
    async fn likes(&self, fid: Fid, cast_hash: &str) -> Result<Vec<Like>, DomainError> {
        let response = self
            .http
            .get(self.reactions_url(fid, cast_hash))
            .send()
            .await
            .map_err(UpstreamError::from)?;

        let status = response.status();
        if status.as_u16() == 429 {
            return Err(UpstreamError::RateLimited.into());
        }
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(UpstreamError::Api {
                status: status.as_u16(),
                message,
            }
            .into());
        }

        let body: ReactionsResponse = response
            .json()
            .await
            .map_err(|e| UpstreamError::Deserialization(e.to_string()))?;
        Ok(body.into_likes())
    }
}
