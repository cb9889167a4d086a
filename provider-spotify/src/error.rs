//! Error types for the Spotify provider

use core_catalog::CatalogError;
use thiserror::Error;

/// Spotify provider errors
#[derive(Error, Debug)]
pub enum SpotifyError {
    /// No usable credentials were configured
    #[error("Spotify credentials missing: {0}")]
    MissingCredentials(String),

    /// The token endpoint refused the client credentials
    #[error("Authentication failed (status {status_code}): {message}")]
    AuthenticationFailed { status_code: u16, message: String },

    /// Failed to encode a request or parse a response
    #[error("Failed to parse Spotify response: {0}")]
    ParseError(String),

    /// Network error
    #[error("Network error: {0}")]
    NetworkError(String),

    /// Bridge error
    #[error(transparent)]
    BridgeError(#[from] bridge_traits::error::BridgeError),
}

/// Result type for Spotify operations
pub type Result<T> = std::result::Result<T, SpotifyError>;

impl From<SpotifyError> for CatalogError {
    fn from(error: SpotifyError) -> Self {
        match error {
            SpotifyError::MissingCredentials(msg) => CatalogError::Unauthorized(msg),
            SpotifyError::AuthenticationFailed {
                status_code,
                message,
            } => CatalogError::Unauthorized(format!(
                "token endpoint returned {}: {}",
                status_code, message
            )),
            SpotifyError::ParseError(msg) => CatalogError::Parse(msg),
            SpotifyError::NetworkError(msg) => CatalogError::Network(msg),
            SpotifyError::BridgeError(e) => CatalogError::Bridge(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let error = SpotifyError::AuthenticationFailed {
            status_code: 400,
            message: "invalid_client".to_string(),
        };

        assert_eq!(
            error.to_string(),
            "Authentication failed (status 400): invalid_client"
        );
    }

    #[test]
    fn test_error_conversion() {
        let error: CatalogError = SpotifyError::MissingCredentials("none".to_string()).into();
        assert!(matches!(error, CatalogError::Unauthorized(_)));

        let error: CatalogError = SpotifyError::NetworkError("reset".to_string()).into();
        assert!(matches!(error, CatalogError::Network(_)));
    }
}
