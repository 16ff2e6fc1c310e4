//! Secret store capability used by the base64 helpers.

use crate::error::VaultResult;
use crate::record::SecretRecord;
use crate::secrets::SecretResponse;
use async_trait::async_trait;

/// Minimal path-addressed secret store.
///
/// `Ok(None)` means the store answered but had nothing at `path` (or, for
/// `write`, accepted the call without returning a body). Errors are reserved
/// for failed calls.
#[async_trait]
pub trait SecretStore: Send + Sync {
    /// List entry names under a path.
    async fn list(&self, path: &str) -> VaultResult<Option<Vec<String>>>;

    /// Read the record stored at a path.
    async fn read(&self, path: &str) -> VaultResult<Option<SecretRecord>>;

    /// Write a record to a path.
    async fn write(&self, path: &str, data: &SecretRecord) -> VaultResult<Option<SecretResponse>>;
}

#[async_trait]
impl<S: SecretStore + ?Sized> SecretStore for std::sync::Arc<S> {
    async fn list(&self, path: &str) -> VaultResult<Option<Vec<String>>> {
        (**self).list(path).await
    }

    async fn read(&self, path: &str) -> VaultResult<Option<SecretRecord>> {
        (**self).read(path).await
    }

    async fn write(&self, path: &str, data: &SecretRecord) -> VaultResult<Option<SecretResponse>> {
        (**self).write(path, data).await
    }
}
