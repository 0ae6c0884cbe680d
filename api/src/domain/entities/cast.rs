//! Cast domain entity
//!
//! A cast is one unit of rankable content: an owner, a hash and a raw
//! engagement count (attempted views), plus the moderator likes used by the
//! eligibility gate.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// Farcaster identity of a cast author or liker
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Fid(pub u64);

impl std::fmt::Display for Fid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for Fid {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse::<u64>().map(Fid)
    }
}

/// A cast with its raw view count
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cast {
    pub fid: Fid,
    pub username: String,
    pub cast_hash: String,
    #[serde(default)]
    pub root_parent_url: Option<String>,
    /// Attempted views counted upstream
    pub count: u64,
    /// Moderators who liked the cast
    #[serde(default)]
    pub mod_likes: Vec<Fid>,
}

impl Cast {
    pub fn new(fid: u64, username: &str, cast_hash: &str, count: u64) -> Self {
        Self {
            fid: Fid(fid),
            username: username.to_string(),
            cast_hash: cast_hash.to_string(),
            root_parent_url: None,
            count,
            mod_likes: Vec::new(),
        }
    }

    pub fn with_mod_likes(mut self, mod_likes: Vec<Fid>) -> Self {
        self.mod_likes = mod_likes;
        self
    }

    /// Number of distinct moderators that liked the cast
    pub fn mod_approvals(&self) -> usize {
        self.mod_likes.iter().collect::<HashSet<_>>().len()
    }
}

/// A single like on a cast as reported by the hub
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Like {
    pub fid: Fid,
    /// Unix time in milliseconds
    pub timestamp_ms: i64,
}

/// Likes on a cast split the way the leaderboard consumes them
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CastLikes {
    pub all: Vec<Fid>,
    pub moderators: Vec<Fid>,
    /// Most recent like, unix milliseconds; 0 when nobody liked the cast
    pub last_liked_ms: i64,
}

impl CastLikes {
    pub fn from_likes(likes: &[Like], roster: &ModeratorRoster) -> Self {
        let all: Vec<Fid> = likes.iter().map(|l| l.fid).collect();
        let mut moderators: Vec<Fid> = all
            .iter()
            .copied()
            .filter(|f| roster.contains(*f))
            .collect();
        moderators.sort();
        moderators.dedup();
        let last_liked_ms = likes.iter().map(|l| l.timestamp_ms).max().unwrap_or(0);

        Self {
            all,
            moderators,
            last_liked_ms,
        }
    }
}

/// The set of fids whose likes count as moderator approval
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModeratorRoster {
    fids: Vec<Fid>,
}

/// Channel moderators at launch
const DEFAULT_MODERATORS: [u64; 12] = [
    533, 3115, 4163, 6546, 8004, 10174, 10215, 15850, 16567, 191780, 475488, 535389,
];

impl ModeratorRoster {
    pub fn new(fids: impl IntoIterator<Item = Fid>) -> Self {
        let mut fids: Vec<Fid> = fids.into_iter().collect();
        fids.sort();
        fids.dedup();
        Self { fids }
    }

    pub fn contains(&self, fid: Fid) -> bool {
        self.fids.binary_search(&fid).is_ok()
    }

    pub fn len(&self) -> usize {
        self.fids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fids.is_empty()
    }
}

impl Default for ModeratorRoster {
    fn default() -> Self {
        Self::new(DEFAULT_MODERATORS.into_iter().map(Fid))
    }
}
