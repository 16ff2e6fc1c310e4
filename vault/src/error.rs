//! Vault error types using thiserror 2.0.
//!
//! Read and list degrade transport failures into empty results, so most of
//! these variants only reach callers through `write` or the store client
//! used directly.

use thiserror::Error;

/// Vault-specific errors.
#[derive(Error, Debug)]
pub enum VaultError {
    /// Vault server unreachable or returned a 5xx status
    #[error("Vault unavailable: {0}")]
    Unavailable(String),

    /// Token rejected for the requested path
    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    /// Rate limited
    #[error("Rate limited")]
    RateLimited,

    /// Any other non-success response, with the errors reported by Vault
    #[error("Vault returned status {status}: {}", errors.join("; "))]
    Api {
        /// HTTP status code
        status: u16,
        /// Messages from the `errors` array of the response body
        errors: Vec<String>,
    },

    /// HTTP error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A field value is not valid base64
    #[error("Field {field:?} is not valid base64: {source}")]
    Encoding {
        /// Field name
        field: String,
        /// Decoder error
        #[source]
        source: base64::DecodeError,
    },

    /// A field value decodes to bytes that are not UTF-8
    #[error("Field {field:?} does not decode to UTF-8 text")]
    InvalidUtf8 {
        /// Field name
        field: String,
    },

    /// Vault accepted a write but returned no response body
    #[error("No secret returned when writing to {0}")]
    EmptyConfirmation(String),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Empty or malformed secret path
    #[error("Invalid secret path: {0:?}")]
    InvalidPath(String),
}

/// Result type for Vault operations.
pub type VaultResult<T> = Result<T, VaultError>;

impl VaultError {
    /// Check if the error came from talking to the store rather than from
    /// local validation.
    #[must_use]
    pub const fn is_transport(&self) -> bool {
        matches!(
            self,
            Self::Unavailable(_)
                | Self::PermissionDenied(_)
                | Self::RateLimited
                | Self::Api { .. }
                | Self::Http(_)
                | Self::Serialization(_)
        )
    }

    /// Create an unavailable error.
    #[must_use]
    pub fn unavailable(msg: impl Into<String>) -> Self {
        Self::Unavailable(msg.into())
    }

    /// Create an invalid configuration error.
    #[must_use]
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }

    /// Create an empty confirmation error for the given path.
    #[must_use]
    pub fn empty_confirmation(path: impl Into<String>) -> Self {
        Self::EmptyConfirmation(path.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = VaultError::unavailable("connection refused");
        assert_eq!(err.to_string(), "Vault unavailable: connection refused");

        let err = VaultError::empty_confirmation("secret/app");
        assert_eq!(err.to_string(), "No secret returned when writing to secret/app");
    }

    #[test]
    fn test_api_error_joins_messages() {
        let err = VaultError::Api {
            status: 400,
            errors: vec!["missing client token".to_string(), "bad path".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "Vault returned status 400: missing client token; bad path"
        );
    }

    #[test]
    fn test_transport_classification() {
        assert!(VaultError::unavailable("timeout").is_transport());
        assert!(VaultError::RateLimited.is_transport());
        assert!(VaultError::PermissionDenied("secret/x".to_string()).is_transport());
        assert!(!VaultError::empty_confirmation("secret/x").is_transport());
        assert!(!VaultError::InvalidUtf8 { field: "k".to_string() }.is_transport());
        assert!(!VaultError::invalid_config("bad").is_transport());
    }
}
