//! Error types for the generative backend boundary.

use oceanmind_core::error::OceanMindError;

/// Errors from the generative backend.
#[derive(Debug, thiserror::Error)]
pub enum GenAiError {
    /// No credential is configured. Permanent for the process lifetime.
    #[error("no API credential configured")]
    MissingCredential,
    /// Network, auth, quota, or non-success HTTP status. Transient but not
    /// retried: each call site collapses to its documented fallback.
    #[error("backend error: {0}")]
    Backend(String),
    /// The response arrived but did not carry usable text.
    #[error("invalid response: {0}")]
    Validation(String),
}

impl From<reqwest::Error> for GenAiError {
    fn from(err: reqwest::Error) -> Self {
        GenAiError::Backend(err.to_string())
    }
}

impl From<GenAiError> for OceanMindError {
    fn from(err: GenAiError) -> Self {
        OceanMindError::GenAi(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = GenAiError::MissingCredential;
        assert_eq!(err.to_string(), "no API credential configured");

        let err = GenAiError::Backend("HTTP 429".to_string());
        assert_eq!(err.to_string(), "backend error: HTTP 429");

        let err = GenAiError::Validation("empty candidates".to_string());
        assert_eq!(err.to_string(), "invalid response: empty candidates");
    }

    #[test]
    fn test_conversion_to_core_error() {
        let err: OceanMindError = GenAiError::Backend("timeout".to_string()).into();
        assert!(matches!(err, OceanMindError::GenAi(_)));
        assert!(err.to_string().contains("timeout"));
    }
}
