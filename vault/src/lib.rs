//! Base64 key/value helpers over HashiCorp Vault.
//!
//! [`Vault`] lists, reads and writes secrets at logical paths, exchanging each
//! record as a flat map of field name to base64 text ([`EncodedRecord`]).
//! Strings, booleans and numbers are carried as text; nested objects and
//! arrays are not representable and come back empty.
//!
//! The HTTP client ([`VaultClient`]) is configured from the usual Vault
//! environment variables. Any other store can be plugged in through
//! [`SecretStore`].

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod client;
pub mod codec;
pub mod config;
pub mod error;
pub mod provider;
pub mod record;
pub mod secrets;
pub mod tracing_config;
pub mod vault;

pub use client::VaultClient;
pub use config::VaultConfig;
pub use error::{VaultError, VaultResult};
pub use provider::SecretStore;
pub use record::{EncodedRecord, SecretRecord, ValueKind};
pub use secrets::SecretResponse;
pub use tracing_config::{TracingConfig, init_tracing};
pub use vault::Vault;
