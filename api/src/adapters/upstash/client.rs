//! REST client for the Upstash-compatible Redis endpoint

use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::UpstreamError;

/// Minimal client for the Redis REST protocol (`/{command}/{args...}`)
pub struct UpstashClient {
    http: Client,
    base_url: String,
    token: String,
}

/// Every REST reply is `{ "result": ... }` or `{ "error": "..." }`
#[derive(Deserialize)]
struct RestReply<T> {
    result: Option<T>,
    error: Option<String>,
}

impl UpstashClient {
    pub fn new(base_url: String, token: String) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
        }
    }

    fn command_url(&self, command: &str, key: &str) -> String {
        format!("{}/{}/{}", self.base_url, command, urlencoding::encode(key))
    }

    async fn handle_response<T: DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<Option<T>, UpstreamError> {
        let status = response.status();

        if status.is_success() {
            let reply: RestReply<T> = response
                .json()
                .await
                .map_err(|e| UpstreamError::Deserialization(e.to_string()))?;
            match reply.error {
                Some(message) => Err(UpstreamError::Api {
                    status: status.as_u16(),
                    message,
                }),
                None => Ok(reply.result),
            }
        } else if status.as_u16() == 401 {
            Err(UpstreamError::Unauthorized)
        } else if status.as_u16() == 429 {
            Err(UpstreamError::RateLimited)
        } else {
            let message = response.text().await.unwrap_or_default();
            Err(UpstreamError::Api {
                status: status.as_u16(),
                message,
            })
        }
    }

    /// `HGETALL key` as a flat `[field, value, field, value, ...]` list
    pub async fn hgetall(&self, key: &str) -> Result<Vec<serde_json::Value>, UpstreamError> {
        let response = self
            .http
            .get(self.command_url("hgetall", key))
            .bearer_auth(&self.token)
            .send()
            .await?;

        Ok(self.handle_response(response).await?.unwrap_or_default())
    }

    /// `GET key`, decoding the stored string as JSON
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        key: &str,
    ) -> Result<Option<T>, UpstreamError> {
        let response = self
            .http
            .get(self.command_url("get", key))
            .bearer_auth(&self.token)
            .send()
            .await?;

        let stored: Option<String> = self.handle_response(response).await?;
        stored
            .map(|raw| {
                serde_json::from_str(&raw)
                    .map_err(|e| UpstreamError::Deserialization(e.to_string()))
            })
            .transpose()
    }

    /// `SET key value` with the value stored as a JSON string
    pub async fn set_json<T: Serialize + Sync>(
        &self,
        key: &str,
        value: &T,
    ) -> Result<(), UpstreamError> {
        let body = serde_json::to_string(value)
            .map_err(|e| UpstreamError::Deserialization(e.to_string()))?;

        let response = self
            .http
            .post(self.command_url("set", key))
            .bearer_auth(&self.token)
            .body(body)
            .send()
            .await?;

        let _: Option<String> = self.handle_response(response).await?;
        Ok(())
    }
}
