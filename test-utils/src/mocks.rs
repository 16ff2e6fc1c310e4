//! In-memory secret store for tests.
//!
//! Paths are normalized the way Vault does it (leading and trailing slashes
//! ignored), so `secret/app` and `/secret/app/` address the same record.

use async_trait::async_trait;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::RwLock;
use vault_kv::{SecretRecord, SecretResponse, SecretStore, VaultError, VaultResult};

/// A call received by the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreCall {
    /// `list(path)`
    List(String),
    /// `read(path)`
    Read(String),
    /// `write(path, _)`
    Write(String),
}

/// Secret store backed by a map, recording every call.
#[derive(Debug)]
pub struct InMemoryStore {
    records: RwLock<BTreeMap<String, SecretRecord>>,
    calls: RwLock<Vec<StoreCall>>,
    failure: RwLock<Option<String>>,
    confirm_writes: bool,
    writes: AtomicU64,
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self {
            records: RwLock::default(),
            calls: RwLock::default(),
            failure: RwLock::default(),
            confirm_writes: true,
            writes: AtomicU64::new(0),
        }
    }
}

fn normalize(path: &str) -> String {
    path.trim_matches('/').to_string()
}

impl InMemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a record.
    #[must_use]
    pub fn with_record(mut self, path: &str, record: SecretRecord) -> Self {
        self.records.get_mut().insert(normalize(path), record);
        self
    }

    /// Accept writes without returning a response, like a 204 from Vault.
    #[must_use]
    pub const fn without_write_confirmation(mut self) -> Self {
        self.confirm_writes = false;
        self
    }

    /// Fail every call with [`VaultError::Unavailable`].
    #[must_use]
    pub fn failing(mut self, message: impl Into<String>) -> Self {
        *self.failure.get_mut() = Some(message.into());
        self
    }

    /// Start or stop failing calls.
    pub async fn set_failure(&self, message: Option<String>) {
        *self.failure.write().await = message;
    }

    /// Stored record at a path.
    pub async fn record(&self, path: &str) -> Option<SecretRecord> {
        self.records.read().await.get(&normalize(path)).cloned()
    }

    /// All calls received so far.
    pub async fn calls(&self) -> Vec<StoreCall> {
        self.calls.read().await.clone()
    }

    /// Number of calls received so far.
    pub async fn call_count(&self) -> usize {
        self.calls.read().await.len()
    }

    async fn enter(&self, call: StoreCall) -> VaultResult<()> {
        self.calls.write().await.push(call);
        match &*self.failure.read().await {
            Some(message) => Err(VaultError::unavailable(message.clone())),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl SecretStore for InMemoryStore {
    async fn list(&self, path: &str) -> VaultResult<Option<Vec<String>>> {
        self.enter(StoreCall::List(path.to_string())).await?;

        let prefix = format!("{}/", normalize(path));
        let keys: BTreeSet<String> = self
            .records
            .read()
            .await
            .keys()
            .filter_map(|stored| stored.strip_prefix(&prefix))
            .map(|rest| match rest.split_once('/') {
                Some((dir, _)) => format!("{dir}/"),
                None => rest.to_string(),
            })
            .collect();

        Ok((!keys.is_empty()).then(|| keys.into_iter().collect()))
    }

    async fn read(&self, path: &str) -> VaultResult<Option<SecretRecord>> {
        self.enter(StoreCall::Read(path.to_string())).await?;
        Ok(self.record(path).await)
    }

    async fn write(&self, path: &str, data: &SecretRecord) -> VaultResult<Option<SecretResponse>> {
        self.enter(StoreCall::Write(path.to_string())).await?;
        self.records
            .write()
            .await
            .insert(normalize(path), data.clone());

        let n = self.writes.fetch_add(1, Ordering::Relaxed) + 1;
        Ok(self.confirm_writes.then(|| SecretResponse {
            request_id: format!("mem-{n}"),
            ..SecretResponse::default()
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;

    #[test]
    fn test_list_direct_children() {
        let store = InMemoryStore::new()
            .with_record("secret/app/db", fixtures::mixed_record())
            .with_record("secret/app/api", fixtures::mixed_record())
            .with_record("secret/app/nested/deep", fixtures::mixed_record())
            .with_record("secret/other", fixtures::mixed_record());

        let keys = tokio_test::block_on(store.list("secret/app/")).unwrap();
        assert_eq!(
            keys,
            Some(vec!["api".to_string(), "db".to_string(), "nested/".to_string()])
        );
        assert_eq!(tokio_test::block_on(store.list("secret/none")).unwrap(), None);
    }

    #[test]
    fn test_write_then_read() {
        let store = InMemoryStore::new();
        let record = fixtures::mixed_record();

        let confirmation = tokio_test::block_on(store.write("/secret/app", &record)).unwrap();
        assert_eq!(confirmation.unwrap().request_id, "mem-1");
        assert_eq!(tokio_test::block_on(store.read("secret/app")).unwrap(), Some(record));
        assert_eq!(
            tokio_test::block_on(store.calls()),
            vec![
                StoreCall::Write("/secret/app".to_string()),
                StoreCall::Read("secret/app".to_string()),
            ]
        );
    }

    #[test]
    fn test_unconfirmed_write_still_stores() {
        let store = InMemoryStore::new().without_write_confirmation();
        let record = fixtures::mixed_record();

        assert!(tokio_test::block_on(store.write("secret/app", &record)).unwrap().is_none());
        assert!(tokio_test::block_on(store.record("secret/app")).is_some());
    }

    #[test]
    fn test_failing_store_records_call() {
        let store = InMemoryStore::new().failing("sealed");

        let err = tokio_test::block_on(store.read("secret/app")).unwrap_err();
        assert!(matches!(err, VaultError::Unavailable(ref m) if m == "sealed"));
        assert_eq!(tokio_test::block_on(store.call_count()), 1);
    }
}
