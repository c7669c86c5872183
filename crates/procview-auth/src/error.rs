//! Error types for token acquisition.

/// Result type alias for this crate.
pub type Result<T> = std::result::Result<T, AuthError>;

/// Errors that can occur while obtaining a bearer token.
///
/// Every variant means no usable token could be produced. None of them is
/// retried here; they propagate to whoever asked for the token.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// Token endpoint unreachable or the request timed out.
    #[error("Token endpoint unreachable: {0}")]
    Network(String),

    /// Token endpoint answered with a non-2xx status.
    #[error("Token endpoint returned {status}: {message}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// OAuth error description, or the raw body when none was given.
        message: String,
    },

    /// Token endpoint body could not be decoded.
    #[error("Malformed token response: {0}")]
    MalformedResponse(String),

    /// Token endpoint body had no usable `access_token`.
    #[error("Token response is missing access_token")]
    MissingAccessToken,

    /// Credentials or client setup are invalid.
    #[error("Config error: {0}")]
    Config(String),
}

impl AuthError {
    /// HTTP status returned by the token endpoint, if that is what failed.
    pub fn status(&self) -> Option<u16> {
        match self {
            AuthError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for AuthError {
    fn from(e: reqwest::Error) -> Self {
        AuthError::Network(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_accessor() {
        let err = AuthError::Status {
            status: 401,
            message: "invalid_client".to_string(),
        };
        assert_eq!(err.status(), Some(401));
        assert_eq!(AuthError::MissingAccessToken.status(), None);
    }

    #[test]
    fn test_display() {
        let err = AuthError::Status {
            status: 500,
            message: "boom".to_string(),
        };
        assert_eq!(err.to_string(), "Token endpoint returned 500: boom");
    }
}
