use thiserror::Error;

/// Top-level error type for the OceanMind system.
///
/// Subsystem crates define their own error types and implement
/// `From<SubsystemError> for OceanMindError` so that the `?` operator works
/// seamlessly across crate boundaries.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum OceanMindError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Generation error: {0}")]
    GenAi(String),

    #[error("Chat error: {0}")]
    Chat(String),

    #[error("API error: {0}")]
    Api(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<toml::de::Error> for OceanMindError {
    fn from(err: toml::de::Error) -> Self {
        OceanMindError::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for OceanMindError {
    fn from(err: toml::ser::Error) -> Self {
        OceanMindError::Config(err.to_string())
    }
}

impl From<serde_json::Error> for OceanMindError {
    fn from(err: serde_json::Error) -> Self {
        OceanMindError::Serialization(err.to_string())
    }
}

/// A specialized `Result` type for OceanMind operations.
pub type Result<T> = std::result::Result<T, OceanMindError>;
