//! Shared test utilities for vault-kv.
//!
//! This crate provides:
//! - An in-memory [`SecretStore`](vault_kv::SecretStore) with call recording
//! - Proptest generators for records and values
//! - Test fixtures with sample records

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod fixtures;
pub mod generators;
pub mod mocks;

pub use generators::*;
pub use mocks::{InMemoryStore, StoreCall};
