//! Domain layer
//!
//! Contains pure business logic with no external dependencies.
//! - `entities`: Domain models representing core business concepts
//! - `ports`: Trait definitions for external dependencies
//! - `scoring`: The eligibility, smoothing and payout pipeline

pub mod entities;
pub mod ports;
pub mod scoring;
