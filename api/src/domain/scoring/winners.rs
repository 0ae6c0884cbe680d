//! Weekly payout allocation
//!
//! Owners are ranked by the sum of their smoothed cast scores. The top N
//! each receive the payout floor, and whatever remains of the pool is split
//! in proportion to score.

use std::cmp::Ordering;
use std::collections::HashMap;

use crate::domain::entities::{Fid, RulesConfig, ScoreDistribution, WinnerRecord};

/// Per-owner totals before ranking
#[derive(Debug, Clone)]
struct OwnerTotals {
    fid: Fid,
    username: String,
    raw_score: f64,
    smooth_score: f64,
    num_casts: usize,
}

/// Ranking order: smooth score desc, raw score desc, fid asc
fn rank_order(a: &OwnerTotals, b: &OwnerTotals) -> Ordering {
    b.smooth_score
        .total_cmp(&a.smooth_score)
        .then_with(|| b.raw_score.total_cmp(&a.raw_score))
        .then_with(|| a.fid.cmp(&b.fid))
}

/// Group scored casts by owner fid, keeping first-seen order
fn aggregate_by_owner(distribution: &ScoreDistribution) -> Vec<OwnerTotals> {
    let mut index: HashMap<Fid, usize> = HashMap::new();
    let mut owners: Vec<OwnerTotals> = Vec::new();

    for item in &distribution.items {
        let slot = *index.entry(item.fid).or_insert_with(|| {
            owners.push(OwnerTotals {
                fid: item.fid,
                username: item.username.clone(),
                raw_score: 0.0,
                smooth_score: 0.0,
                num_casts: 0,
            });
            owners.len() - 1
        });

        let owner = &mut owners[slot];
        owner.raw_score += item.raw;
        owner.smooth_score += item.smooth;
        owner.num_casts += 1;
    }

    owners
}

/// Rank owners and split the pool among the top `rules.top_n()`.
///
/// Every winner gets at least the payout floor and the payouts sum to the
/// pool. When the winners' scores sum to zero the discretionary pool is split
/// evenly. An empty distribution has no winners.
pub fn compute_winners(distribution: &ScoreDistribution, rules: &RulesConfig) -> Vec<WinnerRecord> {
    let mut owners = aggregate_by_owner(distribution);
    owners.sort_by(rank_order);
    owners.truncate(rules.top_n());

    if owners.is_empty() {
        return Vec::new();
    }

    let num_winners = owners.len();
    let total_points: f64 = owners.iter().map(|o| o.smooth_score).sum();
    // RulesConfig guarantees min_payout * top_n <= total_pool
    let available_pool = (rules.total_pool() - rules.min_payout() * num_winners as f64).max(0.0);
    let proportional = total_points.is_finite() && total_points > 0.0;

    owners
        .into_iter()
        .map(|owner| {
            let share = if proportional {
                owner.smooth_score / total_points
            } else {
                1.0 / num_winners as f64
            };

            WinnerRecord {
                fid: owner.fid,
                username: owner.username,
                raw_score: owner.raw_score,
                smooth_score: owner.smooth_score,
                num_casts: owner.num_casts,
                payout: rules.min_payout() + share * available_pool,
            }
        })
        .collect()
}
