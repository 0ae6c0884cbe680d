//! One full scoring cycle over a snapshot of casts

use serde::Serialize;

use super::{
    compute_smooth_scores, compute_winners, dedupe_by_hash, filter_eligible, ExclusionList,
};
use crate::domain::entities::{Cast, RulesConfig, ScoreDistribution, WinnerRecord};
use crate::error::ScoringError;

/// Result of scoring one snapshot of casts
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoringCycle {
    /// Casts that passed the eligibility gate, in input order
    pub eligible: Vec<Cast>,
    /// Distribution over the top-N eligible casts by views; `None` when
    /// nothing was eligible
    pub distribution: Option<ScoreDistribution>,
    pub winners: Vec<WinnerRecord>,
}

/// Gate, select, smooth and allocate.
///
/// Candidates are the `top_n` eligible casts with the most views; ties keep
/// input order. An empty eligible set is not an error, it simply pays nobody.
pub fn score_cycle(
    casts: Vec<Cast>,
    rules: &RulesConfig,
    exclusions: &ExclusionList,
) -> Result<ScoringCycle, ScoringError> {
    let casts = dedupe_by_hash(casts);
    let eligible = filter_eligible(&casts, rules.min_mods(), exclusions);

    let mut candidates = eligible.clone();
    candidates.sort_by(|a, b| b.count.cmp(&a.count));
    candidates.truncate(rules.top_n());

    if candidates.is_empty() {
        return Ok(ScoringCycle {
            eligible,
            distribution: None,
            winners: Vec::new(),
        });
    }

    let distribution = compute_smooth_scores(&candidates)?;
    let winners = compute_winners(&distribution, rules);

    Ok(ScoringCycle {
        eligible,
        distribution: Some(distribution),
        winners,
    })
}
