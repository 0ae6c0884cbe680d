//! Scoring core
//!
//! Pure, synchronous functions over in-memory casts:
//! eligibility gate → arctan smoothing → payout allocation.

pub mod cycle;
pub mod eligibility;
pub mod smooth;
pub mod winners;

pub use cycle::{score_cycle, ScoringCycle};
pub use eligibility::{dedupe_by_hash, filter_eligible, ExclusionList};
pub use smooth::compute_smooth_scores;
pub use winners::compute_winners;
