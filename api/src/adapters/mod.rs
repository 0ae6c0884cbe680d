//! Adapters layer
//!
//! Implementations of port traits for external systems.

pub mod hub;
pub mod upstash;

pub use hub::HubClient;
pub use upstash::{UpstashClient, UpstashEngagementSource, UpstashSnapshotRepository};
