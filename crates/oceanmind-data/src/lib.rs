//! Structured data retrieval for the OceanMind dashboard.

pub mod fetcher;
pub mod prompt;

pub use fetcher::{SnapshotFetcher, EMPTY_INSIGHT, INSIGHT_UNAVAILABLE, NO_CREDENTIAL_INSIGHT};
