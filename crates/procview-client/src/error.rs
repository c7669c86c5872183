//! Client error types.

use procview_auth::AuthError;
use thiserror::Error;

/// Client error type.
///
/// Only structural failures live here. A non-2xx response from the engine
/// is not an error at this layer; it comes back as an
/// [`ApiResponse`](crate::ApiResponse) for the caller to interpret.
#[derive(Debug, Error)]
pub enum Error {
    /// No token could be obtained, so the call was never sent.
    #[error("Authentication failed: {0}")]
    Auth(#[from] AuthError),

    /// The authenticated call failed on the network or timed out.
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The request could not be built (bad URL, header or body).
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Invalid client configuration.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Check if this is an authentication error.
    pub fn is_auth_error(&self) -> bool {
        matches!(self, Error::Auth(_))
    }

    /// Check if this is a transport error.
    pub fn is_transport_error(&self) -> bool {
        matches!(self, Error::Transport(_))
    }

    /// Check if the authenticated call timed out.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Error::Transport(e) if e.is_timeout())
    }
}

/// Result type for client operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_error_conversion() {
        let err: Error = AuthError::MissingAccessToken.into();
        assert!(err.is_auth_error());
        assert!(!err.is_transport_error());
        assert!(!err.is_timeout());
        assert_eq!(
            err.to_string(),
            "Authentication failed: Token response is missing access_token"
        );
    }

    #[test]
    fn test_invalid_request_is_neither_category() {
        let err = Error::InvalidRequest("bad header".to_string());
        assert!(!err.is_auth_error());
        assert!(!err.is_transport_error());
    }
}
