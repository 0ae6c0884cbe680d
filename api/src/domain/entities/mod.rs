//! Domain entities
//!
//! Pure domain models representing core business concepts.

pub mod cast;
pub mod rules;
pub mod score;
pub mod snapshot;
pub mod winner;

pub use cast::{Cast, CastLikes, Fid, Like, ModeratorRoster};
pub use rules::RulesConfig;
pub use score::{ScoreDistribution, ScoreRecord};
pub use snapshot::{snapshot_time, BestOfSnapshot, WinnersSnapshot};
pub use winner::WinnerRecord;
