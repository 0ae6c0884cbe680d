use std::env;
use std::str::FromStr;

use crate::domain::entities::{Fid, ModeratorRoster, RulesConfig};
use crate::domain::scoring::ExclusionList;
use crate::error::ConfigError;

/// Fid of the channel operator, never paid
const DEFAULT_EXCLUDED_FIDS: &str = "6546";

/// Most-seen casts kept per author before the leaderboard limit is applied
const DEFAULT_MOST_SEEN_PER_FID: usize = 3;

#[derive(Clone)]
pub struct Config {
    pub port: u16,
    /// REST endpoint of the view counter store
    pub counter_store_url: String,
    pub counter_store_token: String,
    /// REST endpoint of the snapshot store
    pub snapshot_store_url: String,
    pub snapshot_store_token: String,
    pub hub_url: String,
    /// Hex SHA-256 of the operator bearer token; snapshot writes are refused
    /// when unset
    pub operator_token_sha256: Option<String>,
    pub rules: RulesConfig,
    pub exclusions: ExclusionList,
    pub moderators: ModeratorRoster,
    pub most_seen_per_fid: usize,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let counter_store_url = env::var("COUNTER_STORE_URL")
            .unwrap_or_else(|_| "http://localhost:8079".to_string());
        let counter_store_token = env::var("COUNTER_STORE_TOKEN").unwrap_or_default();

        let defaults = RulesConfig::default();
        let rules = RulesConfig::new(
            parse_var("RULES_TOP_N", defaults.top_n())?,
            parse_var("RULES_TOTAL_POOL", defaults.total_pool())?,
            parse_var("RULES_MIN_PAYOUT", defaults.min_payout())?,
            parse_var("RULES_MIN_MODS", defaults.min_mods())?,
        )?;

        let excluded_fids = env::var("EXCLUDED_FIDS")
            .unwrap_or_else(|_| DEFAULT_EXCLUDED_FIDS.to_string());
        let exclusions = ExclusionList::new()
            .with_fids(parse_fid_list("EXCLUDED_FIDS", &excluded_fids)?)
            .with_cast_hashes(split_list(&env::var("EXCLUDED_CASTS").unwrap_or_default()));

        let moderators = match env::var("MODERATOR_FIDS") {
            Ok(list) => ModeratorRoster::new(parse_fid_list("MODERATOR_FIDS", &list)?),
            Err(_) => ModeratorRoster::default(),
        };

        Ok(Self {
            port: parse_var("PORT", 8080)?,
            snapshot_store_url: env::var("SNAPSHOT_STORE_URL")
                .unwrap_or_else(|_| counter_store_url.clone()),
            snapshot_store_token: env::var("SNAPSHOT_STORE_TOKEN")
                .unwrap_or_else(|_| counter_store_token.clone()),
            counter_store_url,
            counter_store_token,
            hub_url: env::var("HUB_URL").unwrap_or_else(|_| "https://hub.pinata.cloud".to_string()),
            operator_token_sha256: env::var("OPERATOR_TOKEN_SHA256")
                .ok()
                .map(|h| h.trim().to_lowercase())
                .filter(|h| !h.is_empty()),
            rules,
            exclusions,
            moderators,
            most_seen_per_fid: parse_var("MOST_SEEN_PER_FID", DEFAULT_MOST_SEEN_PER_FID)?,
        })
    }

    /// Check if snapshot writes are enabled
    pub fn snapshots_writable(&self) -> bool {
        self.operator_token_sha256.is_some()
    }
}

/// Read an optional variable, falling back to `default` when unset
fn parse_var<T: FromStr>(name: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(name) {
        Ok(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidVar { name, value }),
        Err(_) => Ok(default),
    }
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_fid_list(name: &'static str, value: &str) -> Result<Vec<Fid>, ConfigError> {
    split_list(value)
        .into_iter()
        .map(|s| {
            s.parse::<Fid>().map_err(|_| ConfigError::InvalidVar {
                name,
                value: value.to_string(),
            })
        })
        .collect()
}
