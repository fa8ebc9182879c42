use thiserror::Error;

/// Main error type for Prajna
#[derive(Error, Debug)]
pub enum PrajnaError {
    /// Empty or whitespace-only message submission
    #[error("Validation error: {0}")]
    Validation(String),

    /// Ingest or query call failed (status other than 200, network error, bad payload)
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Unknown recommended question: {0}")]
    UnknownQuestion(usize),

    #[error("Invalid document: {0}")]
    InvalidDocument(String),

    #[error("Identity error: {0}")]
    Identity(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl PrajnaError {
    /// Whether this error came from the remote service boundary
    pub fn is_transport(&self) -> bool {
        matches!(self, PrajnaError::Transport(_))
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, PrajnaError::Validation(_))
    }
}

impl From<reqwest::Error> for PrajnaError {
    fn from(err: reqwest::Error) -> Self {
        PrajnaError::Transport(err.to_string())
    }
}

impl From<serde_json::Error> for PrajnaError {
    fn from(err: serde_json::Error) -> Self {
        PrajnaError::Transport(format!("malformed payload: {}", err))
    }
}

/// Result alias used throughout the session core
pub type Result<T> = std::result::Result<T, PrajnaError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_classification() {
        assert!(PrajnaError::Transport("status 500".into()).is_transport());
        assert!(!PrajnaError::Transport("status 500".into()).is_validation());
        assert!(PrajnaError::Validation("empty".into()).is_validation());
        assert!(!PrajnaError::UnknownQuestion(3).is_transport());
    }

    #[test]
    fn test_malformed_json_is_transport() {
        let err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let err: PrajnaError = err.into();
        assert!(err.is_transport());
        assert!(err.to_string().contains("malformed payload"));
    }
}
