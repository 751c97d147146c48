//! Error types shared by docsense services.

use thiserror::Error;

/// Result type alias using the docsense error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Unified error type for docsense services.
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid input or request
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Timeout error
    #[error("Operation timed out")]
    Timeout,
}

impl Error {
    /// Check if this error is caused by the caller's input.
    pub fn is_client_error(&self) -> bool {
        (400..500).contains(&self.status_code())
    }

    /// Get HTTP status code for this error.
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::InvalidInput(_) | Self::Json(_) => 400,
            Self::Timeout => 408,
            Self::Internal(_) | Self::Io(_) => 500,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_status_codes() {
        assert_eq!(Error::InvalidInput("test".into()).status_code(), 400);
        assert_eq!(Error::Internal("test".into()).status_code(), 500);
        assert_eq!(Error::Timeout.status_code(), 408);
    }

    #[test]
    fn test_client_errors() {
        let json = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        assert!(Error::from(json).is_client_error());
        assert!(Error::InvalidInput("empty text".into()).is_client_error());

        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err = Error::from(io);
        assert!(!err.is_client_error());
        assert!(err.to_string().starts_with("IO error"));
    }
}
