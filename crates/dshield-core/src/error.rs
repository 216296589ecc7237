use thiserror::Error;

/// Result type alias for connector operations
pub type Result<T> = std::result::Result<T, DshieldError>;

/// Errors that can occur while fetching, transforming or delivering intel
#[derive(Error, Debug)]
pub enum DshieldError {
    /// Authentication failed - invalid or missing API token
    #[error("authentication failed: invalid API token")]
    Unauthorized,

    /// Rate limit exceeded
    #[error("rate limit exceeded")]
    RateLimited,

    /// Resource not found
    #[error("resource not found: {resource}")]
    NotFound {
        /// Description of the resource that wasn't found
        resource: String,
    },

    /// Remote API returned an error response
    #[error("API error ({code}): {message}")]
    Api {
        /// HTTP status code, or 200 for GraphQL-level errors
        code: u16,
        /// Error message from the API
        message: String,
    },

    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(String),

    /// Request timed out
    #[error("request timed out after {0} seconds")]
    Timeout(u64),

    /// Connection failed
    #[error("connection failed: {0}")]
    Connection(String),

    /// JSON parsing/serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid IPv4 address in a feed record
    #[error("invalid IPv4 address: {0:?}")]
    InvalidIp(String),

    /// Invalid URL
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// Filesystem error while writing an export
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic internal error
    #[error("internal error: {0}")]
    Internal(String),
}

impl DshieldError {
    /// Returns true if the error is due to authentication
    #[must_use]
    pub const fn is_auth_error(&self) -> bool {
        matches!(self, Self::Unauthorized)
    }

    /// Returns true if the error only affects a single record and the run can continue
    #[must_use]
    pub const fn is_skippable(&self) -> bool {
        matches!(self, Self::InvalidIp(_))
    }

    /// Returns the HTTP status code if this is an API error
    #[must_use]
    pub const fn status_code(&self) -> Option<u16> {
        match self {
            Self::Unauthorized => Some(401),
            Self::RateLimited => Some(429),
            Self::NotFound { .. } => Some(404),
            Self::Api { code, .. } => Some(*code),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes() {
        assert_eq!(DshieldError::Unauthorized.status_code(), Some(401));
        assert_eq!(
            DshieldError::Api {
                code: 502,
                message: "bad gateway".into()
            }
            .status_code(),
            Some(502)
        );
        assert_eq!(DshieldError::InvalidIp("x".into()).status_code(), None);
    }

    #[test]
    fn only_bad_records_are_skippable() {
        assert!(DshieldError::InvalidIp("300.1.1.1".into()).is_skippable());
        assert!(!DshieldError::Http("reset".into()).is_skippable());
        assert_eq!(DshieldError::RateLimited.status_code(), Some(429));
    }
}
