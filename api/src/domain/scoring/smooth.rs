//! Arctangent smoothing of raw view counts
//!
//! Views are heavy tailed: one viral cast can dwarf a week of steady posting.
//! Each raw count is turned into a population z-score, squashed with `atan`
//! into (-π/2, π/2) and projected back onto the raw scale with the population
//! mean and standard deviation. Values near the mean move little; outliers
//! are pulled in hard. Order is preserved because both steps are strictly
//! increasing.
//!
//! For non-negative counts every smoothed score is non-negative as well,
//! since `|atan x| <= |x|` bounds the downward pull by the mean itself.

use crate::domain::entities::{Cast, ScoreDistribution, ScoreRecord};
use crate::error::ScoringError;

/// Score a population of casts.
///
/// Fails on an empty population. When every raw count is identical the
/// standard deviation is zero and each cast scores exactly the mean with
/// zero z-scores.
pub fn compute_smooth_scores(casts: &[Cast]) -> Result<ScoreDistribution, ScoringError> {
    if casts.is_empty() {
        return Err(ScoringError::EmptyPopulation);
    }

    let n = casts.len();
    let raws: Vec<f64> = casts.iter().map(|c| c.count as f64).collect();
    let sum_raw: f64 = raws.iter().sum();
    let mean_raw = sum_raw / n as f64;
    let variance = raws.iter().map(|r| (r - mean_raw).powi(2)).sum::<f64>() / n as f64;
    let stdev_raw = variance.sqrt();

    let items: Vec<ScoreRecord> = casts
        .iter()
        .zip(&raws)
        .map(|(cast, &raw)| {
            let raw_zscore = if stdev_raw > 0.0 {
                (raw - mean_raw) / stdev_raw
            } else {
                0.0
            };
            let smooth_zscore = raw_zscore.atan();

            ScoreRecord {
                fid: cast.fid,
                username: cast.username.clone(),
                cast_hash: cast.cast_hash.clone(),
                raw,
                raw_zscore,
                smooth: smooth_zscore * stdev_raw + mean_raw,
                smooth_zscore,
            }
        })
        .collect();

    let sum_smooth = items.iter().map(|i| i.smooth).sum();

    Ok(ScoreDistribution {
        n_raw: n,
        sum_raw,
        mean_raw,
        stdev_raw,
        sum_smooth,
        items,
    })
}
