//! Generative backend boundary for OceanMind.
//!
//! Defines the response-shape contracts, the `GenerativeClient` trait, and
//! the Gemini HTTP implementation.

pub mod client;
pub mod error;
pub mod schema;

pub use client::{GeminiClient, GenerativeClient, HistoryTurn, SYSTEM_INSTRUCTION};
pub use error::GenAiError;
pub use schema::{dashboard_schema, time_series_schema, SchemaDescriptor};
