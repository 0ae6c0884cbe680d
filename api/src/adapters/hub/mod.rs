//! Farcaster hub adapter

pub mod client;

pub use client::HubClient;
