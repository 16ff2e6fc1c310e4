//! Global subscriber installation. Kept in its own test binary so the global
//! subscriber does not leak into the capturing tests.

use vault_kv::{TracingConfig, init_tracing};

#[test]
fn test_init_tracing_only_once() {
    let config = TracingConfig::default()
        .with_service_name("secrets-sync")
        .with_json_output();

    assert!(init_tracing(&config).is_ok());
    assert!(init_tracing(&config).is_err());
    assert!(init_tracing(&TracingConfig::default()).is_err());
}
