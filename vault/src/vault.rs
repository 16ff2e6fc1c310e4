//! Base64 list/read/write helpers over a secret store.
//!
//! Reads favour availability: a missing path and a failed call both come back
//! as an empty result, with the failure logged. Writes are strict and return
//! every failure to the caller.

use crate::{
    client::VaultClient,
    codec,
    config::{ENV_VAULT_ADDR, VaultConfig},
    error::{VaultError, VaultResult},
    provider::SecretStore,
    record::EncodedRecord,
};
use tracing::{info, instrument, warn};

/// Secret store wrapper exchanging base64 encoded records.
#[derive(Debug)]
pub struct Vault<S = VaultClient> {
    store: S,
}

impl Vault<VaultClient> {
    /// Build a Vault HTTP client from the process environment.
    ///
    /// Logs an advisory when `VAULT_ADDR` is not set, since the client then
    /// falls back to a local address.
    pub fn from_env() -> VaultResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a Vault HTTP client from an arbitrary variable lookup.
    ///
    /// Same advisory as [`Vault::from_env`].
    pub fn from_lookup<F>(lookup: F) -> VaultResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let config = VaultConfig::from_lookup(lookup)?;
        if !config.addr_from_env() {
            warn!(
                addr = %config.addr,
                "{ENV_VAULT_ADDR} is not set; did you mean to use a local vault? Try setting {ENV_VAULT_ADDR}"
            );
        }
        Self::from_config(config)
    }

    /// Build a Vault HTTP client from explicit configuration.
    pub fn from_config(config: VaultConfig) -> VaultResult<Self> {
        info!(addr = %config.addr, "Vault client configured");
        Ok(Self::with_store(VaultClient::new(config)?))
    }
}

impl<S: SecretStore> Vault<S> {
    /// Wrap an existing store.
    pub const fn with_store(store: S) -> Self {
        Self { store }
    }

    /// The underlying store handle.
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Names stored under `path`.
    ///
    /// Empty when the path does not exist or the call failed.
    #[instrument(skip(self))]
    pub async fn list(&self, path: &str) -> Vec<String> {
        match self.store.list(path).await {
            Ok(keys) => keys.unwrap_or_default(),
            Err(error) => {
                warn!(%error, "Unable to list path");
                Vec::new()
            }
        }
    }

    /// Record at `path` with every field base64 encoded.
    ///
    /// Empty when nothing is stored at the path or the call failed.
    #[instrument(skip(self))]
    pub async fn read(&self, path: &str) -> EncodedRecord {
        match self.store.read(path).await {
            Ok(Some(record)) => codec::decode(path, &record),
            Ok(None) => EncodedRecord::new(),
            Err(error) => {
                warn!(%error, "Error reading secret");
                EncodedRecord::new()
            }
        }
    }

    /// Decode `data` and write it to `path`.
    ///
    /// Nothing is sent when a value fails to decode. A store that accepts the
    /// write without returning a response is reported as
    /// [`VaultError::EmptyConfirmation`].
    #[instrument(skip(self, data), fields(field_count = data.len()))]
    pub async fn write(&self, path: &str, data: &EncodedRecord) -> VaultResult<()> {
        let record = codec::encode(data)?;
        match self.store.write(path, &record).await? {
            Some(_) => Ok(()),
            None => Err(VaultError::empty_confirmation(path)),
        }
    }
}
