//! Eligibility gate
//!
//! A cast takes part in scoring only when enough moderators liked it and
//! neither its owner nor the cast itself is on the exclusion list.

use std::collections::HashSet;

use crate::domain::entities::{Cast, Fid};

/// Owners and casts that are never paid
///
/// Owned by the caller; the filter only reads it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExclusionList {
    fids: HashSet<Fid>,
    cast_hashes: HashSet<String>,
}

impl ExclusionList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_fids(mut self, fids: impl IntoIterator<Item = Fid>) -> Self {
        self.fids.extend(fids);
        self
    }

    pub fn with_cast_hashes<S: Into<String>>(
        mut self,
        hashes: impl IntoIterator<Item = S>,
    ) -> Self {
        self.cast_hashes.extend(hashes.into_iter().map(Into::into));
        self
    }

    pub fn excludes_fid(&self, fid: Fid) -> bool {
        self.fids.contains(&fid)
    }

    pub fn excludes(&self, cast: &Cast) -> bool {
        self.excludes_fid(cast.fid) || self.cast_hashes.contains(&cast.cast_hash)
    }
}

/// Keep the casts that pass the moderator threshold and are not excluded.
/// Input order is preserved.
pub fn filter_eligible(casts: &[Cast], min_mods: usize, exclusions: &ExclusionList) -> Vec<Cast> {
    casts
        .iter()
        .filter(|cast| cast.mod_approvals() >= min_mods)
        .filter(|cast| !exclusions.excludes(cast))
        .cloned()
        .collect()
}

/// Drop later casts that repeat an earlier cast hash
pub fn dedupe_by_hash(casts: Vec<Cast>) -> Vec<Cast> {
    let mut seen = HashSet::new();
    casts
        .into_iter()
        .filter(|cast| seen.insert(cast.cast_hash.clone()))
        .collect()
}
