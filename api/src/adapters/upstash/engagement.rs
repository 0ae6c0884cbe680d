//! Counter store engagement source
//!
//! View attempts are counted in the `action-usage` hash, one field per cast:
//! `{fid}-{username}-{rootParentUrl}-{castHash}` → count. Usernames may
//! contain dashes, so the field is split on the root parent url, which is
//! either the literal `null` or a `scheme://` url.

use std::sync::{Arc, OnceLock};

use async_trait::async_trait;
use regex::Regex;

use super::UpstashClient;
use crate::domain::entities::{Cast, Fid};
use crate::domain::ports::EngagementSource;
use crate::error::{DomainError, ParseError};

/// Hash holding per-cast view counts
pub const ACTION_USAGE_KEY: &str = "action-usage";

fn usage_key_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(
            r"^(?P<fid>\d+)-(?P<username>.+?)-(?P<url>null|[a-z][a-z0-9+.]*://.*)-(?P<hash>0x[0-9a-fA-F]+)$",
        )
        .expect("usage key pattern compiles")
    })
}

/// Parse one `action-usage` field into a cast without a count
pub fn parse_usage_key(key: &str) -> Result<Cast, ParseError> {
    let caps = usage_key_pattern()
        .captures(key)
        .ok_or_else(|| ParseError::MalformedKey(key.to_string()))?;

    let fid: Fid = caps["fid"].parse()?;
    let root_parent_url = match &caps["url"] {
        "null" => None,
        url => Some(url.to_string()),
    };

    Ok(Cast {
        fid,
        username: caps["username"].to_string(),
        cast_hash: caps["hash"].to_string(),
        root_parent_url,
        count: 0,
        mod_likes: Vec::new(),
    })
}

fn parse_count(key: &str, value: &serde_json::Value) -> Result<u64, ParseError> {
    let parsed = match value {
        serde_json::Value::String(s) => s.trim().parse::<u64>().ok(),
        serde_json::Value::Number(n) => n.as_u64(),
        _ => None,
    };
    parsed.ok_or_else(|| ParseError::InvalidCount {
        key: key.to_string(),
        value: value.to_string(),
    })
}

/// Turn a flat HGETALL reply into casts, skipping malformed entries
pub fn parse_usage_entries(entries: &[serde_json::Value]) -> Vec<Cast> {
    entries
        .chunks_exact(2)
        .filter_map(|pair| {
            let key = pair[0].as_str()?;
            let parsed = parse_usage_key(key).and_then(|cast| {
                let count = parse_count(key, &pair[1])?;
                Ok(Cast { count, ..cast })
            });
            match parsed {
                Ok(cast) => Some(cast),
                Err(e) => {
                    tracing::warn!(error = %e, "Skipping malformed usage entry");
                    None
                }
            }
        })
        .collect()
}

/// Engagement source backed by the `action-usage` hash
pub struct UpstashEngagementSource {
    client: Arc<UpstashClient>,
}

impl UpstashEngagementSource {
    pub fn new(client: Arc<UpstashClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl EngagementSource for UpstashEngagementSource {
    async fn view_counts(&self) -> Result<Vec<Cast>, DomainError> {
        let entries = self.client.hgetall(ACTION_USAGE_KEY).await?;
        let casts = parse_usage_entries(&entries);
        tracing::debug!(entries = entries.len() / 2, casts = casts.len(), "Loaded view counts");
        Ok(casts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const HASH: &str = "0x5f3a9c1e2b7d4f6a8c0e1b3d5f7a9c2e4b6d8f0a";

    #[test]
    fn parses_key_without_channel() {
        let cast = parse_usage_key(&format!("644823-0xkesha-null-{}", HASH)).unwrap();
        assert_eq!(cast.fid, Fid(644823));
        assert_eq!(cast.username, "0xkesha");
        assert_eq!(cast.root_parent_url, None);
        assert_eq!(cast.cast_hash, HASH);
    }

    #[test]
    fn parses_dashed_username() {
        let cast = parse_usage_key(&format!("875987-i-d0-care-null-{}", HASH)).unwrap();
        assert_eq!(cast.username, "i-d0-care");
        assert_eq!(cast.root_parent_url, None);
    }

    #[test]
    fn parses_channel_url_with_dashes() {
        let key = format!(
            "476033-torii-stories-https://warpcast.com/~/channel/sassy-posts-{}",
            HASH
        );
        let cast = parse_usage_key(&key).unwrap();
        assert_eq!(cast.username, "torii-stories");
        assert_eq!(
            cast.root_parent_url.as_deref(),
            Some("https://warpcast.com/~/channel/sassy-posts")
        );
        assert_eq!(cast.cast_hash, HASH);
    }

    #[test]
    fn rejects_malformed_keys() {
        assert!(parse_usage_key("not-a-key").is_err());
        assert!(parse_usage_key(&format!("abc-user-null-{}", HASH)).is_err());
        assert!(parse_usage_key("12-user-null-nothex").is_err());
    }

    #[test]
    fn parses_flat_hgetall_reply() {
        let entries = vec![
            json!(format!("1-alice-null-{}", HASH)),
            json!("12"),
            json!("garbage"),
            json!("3"),
            json!("2-bob-null-0xabc"),
            json!(7),
            json!("3-carol-null-0xdef"),
            json!("many"),
        ];

        let casts = parse_usage_entries(&entries);

        assert_eq!(casts.len(), 2);
        assert_eq!(casts[0].username, "alice");
        assert_eq!(casts[0].count, 12);
        assert_eq!(casts[1].username, "bob");
        assert_eq!(casts[1].count, 7);
    }
}
