//! Vault logical API response bodies.

use crate::record::SecretRecord;
use serde::Deserialize;

/// Generic Vault response envelope.
///
/// Returned by the store as the confirmation of a write.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SecretResponse {
    /// Request identifier assigned by Vault
    pub request_id: String,
    /// Lease ID, empty for non-leased secrets
    pub lease_id: String,
    /// Lease duration in seconds
    pub lease_duration: u64,
    /// Whether the lease is renewable
    pub renewable: bool,
    /// Response data
    pub data: Option<SecretRecord>,
    /// Warnings attached by Vault
    pub warnings: Option<Vec<String>>,
}

/// Data section of a LIST response.
#[derive(Debug, Deserialize)]
pub struct ListData {
    /// Entry names; sub-paths end in `/`
    pub keys: Vec<String>,
}

/// LIST response.
#[derive(Debug, Deserialize)]
pub struct ListResponse {
    /// Listed keys, absent when Vault sent no data
    pub data: Option<ListData>,
}

/// Error body returned with non-success statuses.
#[derive(Debug, Default, Deserialize)]
pub struct ErrorResponse {
    /// Error messages
    #[serde(default)]
    pub errors: Vec<String>,
}
