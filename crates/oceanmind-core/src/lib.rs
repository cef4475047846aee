pub mod config;
pub mod error;
pub mod types;

pub use config::OceanMindConfig;
pub use error::{OceanMindError, Result};
pub use types::*;
