//! Upstash adapter
//!
//! Counter store and snapshot store over the Redis REST protocol.

pub mod client;
pub mod engagement;
pub mod snapshot_repo;

pub use client::UpstashClient;
pub use engagement::UpstashEngagementSource;
pub use snapshot_repo::UpstashSnapshotRepository;
