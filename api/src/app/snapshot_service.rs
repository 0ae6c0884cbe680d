//! Snapshot service
//!
//! Stores the end-of-week winners and score distribution so payouts can be
//! made from a fixed record. Writes are validated before they reach the store.

use std::collections::HashSet;
use std::sync::Arc;

use chrono::Utc;

use super::payout_split::payout_csv;
use crate::domain::entities::{
    BestOfSnapshot, RulesConfig, ScoreDistribution, WinnerRecord, WinnersSnapshot,
};
use crate::domain::ports::SnapshotRepository;
use crate::error::AppError;

/// Payout split of a winners snapshot
#[derive(Debug, Clone, PartialEq)]
pub struct PayoutSheet {
    pub csv: String,
    /// Time the winners were snapshotted, unix milliseconds
    pub timestamp: i64,
}

/// Slack allowed when comparing payouts against the rules, relative to the pool
const PAYOUT_TOLERANCE: f64 = 1e-6;

fn validate_winners(winners: &[WinnerRecord], rules: &RulesConfig) -> Result<(), AppError> {
    if winners.len() > rules.top_n() {
        return Err(AppError::BadRequest(format!(
            "{} winners but topN is {}",
            winners.len(),
            rules.top_n()
        )));
    }

    let tolerance = PAYOUT_TOLERANCE * rules.total_pool().max(1.0);
    let mut fids = HashSet::new();
    for winner in winners {
        let numbers = [winner.raw_score, winner.smooth_score, winner.payout];
        if numbers.iter().any(|v| !v.is_finite()) || winner.payout < 0.0 {
            return Err(AppError::BadRequest(format!(
                "invalid scores or payout for fid {}",
                winner.fid
            )));
        }
        if winner.payout + tolerance < rules.min_payout() {
            return Err(AppError::BadRequest(format!(
                "payout {} for fid {} is below the minimum {}",
                winner.payout,
                winner.fid,
                rules.min_payout()
            )));
        }
        if !fids.insert(winner.fid) {
            return Err(AppError::BadRequest(format!(
                "fid {} is listed more than once",
                winner.fid
            )));
        }
    }

    if !winners.is_empty() {
        let paid: f64 = winners.iter().map(|w| w.payout).sum();
        if (paid - rules.total_pool()).abs() > tolerance {
            return Err(AppError::BadRequest(format!(
                "payouts sum to {} but the pool is {}",
                paid,
                rules.total_pool()
            )));
        }
    }

    Ok(())
}

fn validate_distribution(distribution: &ScoreDistribution) -> Result<(), AppError> {
    if distribution.n_raw != distribution.items.len() {
        return Err(AppError::BadRequest(format!(
            "nRaw is {} but {} items were given",
            distribution.n_raw,
            distribution.items.len()
        )));
    }
    if !distribution.is_finite() {
        return Err(AppError::BadRequest(
            "distribution contains non-finite numbers".to_string(),
        ));
    }
    Ok(())
}

/// Service for taking and reading snapshots
pub struct SnapshotService<SR>
where
    SR: SnapshotRepository + ?Sized,
{
    snapshots: Arc<SR>,
}

impl<SR> SnapshotService<SR>
where
    SR: SnapshotRepository + ?Sized,
{
    pub fn new(snapshots: Arc<SR>) -> Self {
        Self { snapshots }
    }

    /// Store the winners, replacing any earlier snapshot
    pub async fn save_winners(
        &self,
        winners: Vec<WinnerRecord>,
        rules_config: RulesConfig,
    ) -> Result<WinnersSnapshot, AppError> {
        validate_winners(&winners, &rules_config)?;

        let snapshot = WinnersSnapshot {
            winners,
            rules_config,
            timestamp: Utc::now().timestamp_millis(),
        };
        self.snapshots.save_winners(&snapshot).await?;

        tracing::info!(
            winners = snapshot.winners.len(),
            pool = snapshot.rules_config.total_pool(),
            timestamp = snapshot.timestamp,
            "Saved winners snapshot"
        );
        Ok(snapshot)
    }

    /// Store the score distribution, replacing any earlier snapshot
    pub async fn save_best_of(
        &self,
        best_of_sassy: ScoreDistribution,
        rules_config: RulesConfig,
    ) -> Result<BestOfSnapshot, AppError> {
        validate_distribution(&best_of_sassy)?;

        let snapshot = BestOfSnapshot {
            best_of_sassy,
            rules_config,
            timestamp: Utc::now().timestamp_millis(),
        };
        self.snapshots.save_best_of(&snapshot).await?;

        tracing::info!(
            n = snapshot.best_of_sassy.n_raw,
            timestamp = snapshot.timestamp,
            "Saved best-of snapshot"
        );
        Ok(snapshot)
    }

    pub async fn winners(&self) -> Result<WinnersSnapshot, AppError> {
        self.snapshots
            .get_winners()
            .await?
            .ok_or_else(|| AppError::NotFound("no winners snapshot has been taken".to_string()))
    }

    pub async fn best_of(&self) -> Result<BestOfSnapshot, AppError> {
        self.snapshots
            .get_best_of()
            .await?
            .ok_or_else(|| AppError::NotFound("no best-of snapshot has been taken".to_string()))
    }

    /// Payout split of the stored winners
    pub async fn winners_csv(&self) -> Result<PayoutSheet, AppError> {
        let snapshot = self.winners().await?;
        Ok(PayoutSheet {
            csv: payout_csv(&snapshot.winners),
            timestamp: snapshot.timestamp,
        })
    }
}
