//! Vault client configuration.
//!
//! Read from the standard Vault client environment variables.

use crate::error::{VaultError, VaultResult};
use secrecy::SecretString;
use std::path::PathBuf;
use std::time::Duration;
use url::Url;

/// Vault server address variable.
pub const ENV_VAULT_ADDR: &str = "VAULT_ADDR";
/// Client token variable.
pub const ENV_VAULT_TOKEN: &str = "VAULT_TOKEN";
/// Enterprise namespace variable.
pub const ENV_VAULT_NAMESPACE: &str = "VAULT_NAMESPACE";
/// Request timeout variable.
pub const ENV_VAULT_CLIENT_TIMEOUT: &str = "VAULT_CLIENT_TIMEOUT";
/// TLS verification bypass variable.
pub const ENV_VAULT_SKIP_VERIFY: &str = "VAULT_SKIP_VERIFY";
/// CA bundle path variable.
pub const ENV_VAULT_CACERT: &str = "VAULT_CACERT";

/// Address used when `VAULT_ADDR` is not set.
pub const DEFAULT_ADDR: &str = "https://127.0.0.1:8200";

/// Vault client configuration.
#[derive(Debug)]
pub struct VaultConfig {
    /// Vault server address
    pub addr: Url,
    /// Client token sent as `X-Vault-Token`
    pub token: Option<SecretString>,
    /// Namespace sent as `X-Vault-Namespace`
    pub namespace: Option<String>,
    /// Request timeout
    pub timeout: Duration,
    /// Skip TLS certificate verification
    pub skip_verify: bool,
    /// PEM bundle added to the trusted roots
    pub ca_cert: Option<PathBuf>,
    addr_from_env: bool,
}

impl VaultConfig {
    /// Create a configuration for the given address.
    pub fn new(addr: &str) -> VaultResult<Self> {
        Ok(Self {
            addr: parse_addr(addr)?,
            token: None,
            namespace: None,
            timeout: Duration::from_secs(60),
            skip_verify: false,
            ca_cert: None,
            addr_from_env: false,
        })
    }

    /// Read configuration from the process environment.
    pub fn from_env() -> VaultResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through an arbitrary variable lookup.
    ///
    /// Empty values are treated as unset.
    pub fn from_lookup<F>(lookup: F) -> VaultResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let env_addr = var(ENV_VAULT_ADDR);
        let mut config = Self::new(env_addr.as_deref().unwrap_or(DEFAULT_ADDR))?;
        config.addr_from_env = env_addr.is_some();
        config.token = var(ENV_VAULT_TOKEN).map(SecretString::from);
        config.namespace = var(ENV_VAULT_NAMESPACE);
        config.ca_cert = var(ENV_VAULT_CACERT).map(PathBuf::from);

        if let Some(raw) = var(ENV_VAULT_CLIENT_TIMEOUT) {
            config.timeout = parse_timeout(&raw)?;
        }
        if let Some(raw) = var(ENV_VAULT_SKIP_VERIFY) {
            config.skip_verify = parse_bool(ENV_VAULT_SKIP_VERIFY, &raw)?;
        }

        Ok(config)
    }

    /// Whether the address came from `VAULT_ADDR`.
    #[must_use]
    pub const fn addr_from_env(&self) -> bool {
        self.addr_from_env
    }

    /// Set the client token.
    #[must_use]
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(SecretString::from(token.into()));
        self
    }

    /// Set the namespace.
    #[must_use]
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    /// Set request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// URL of a logical API path, e.g. `secret/app` -> `<addr>/v1/secret/app`.
    pub fn api_url(&self, path: &str) -> VaultResult<Url> {
        let base = self.addr.as_str().trim_end_matches('/');
        Url::parse(&format!("{base}/v1/{path}"))
            .map_err(|e| VaultError::invalid_config(format!("bad URL for path {path:?}: {e}")))
    }
}

fn parse_addr(raw: &str) -> VaultResult<Url> {
    let url = Url::parse(raw)
        .map_err(|e| VaultError::invalid_config(format!("{ENV_VAULT_ADDR}={raw:?}: {e}")))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(VaultError::invalid_config(format!(
            "{ENV_VAULT_ADDR}={raw:?}: unsupported scheme {other:?}"
        ))),
    }
}

/// Parse a timeout: bare integer seconds, or a Go-style duration such as
/// `1m30s`, `500ms` or `1.5s`.
fn parse_timeout(raw: &str) -> VaultResult<Duration> {
    let raw = raw.trim();
    let invalid = || {
        VaultError::invalid_config(format!("{ENV_VAULT_CLIENT_TIMEOUT}={raw:?} is not a duration"))
    };

    if let Ok(secs) = raw.parse::<u64>() {
        return Ok(Duration::from_secs(secs));
    }
    if raw.is_empty() {
        return Err(invalid());
    }

    let mut nanos = 0_f64;
    let mut rest = raw;
    while !rest.is_empty() {
        let number_end = rest
            .find(|c: char| !(c.is_ascii_digit() || c == '.'))
            .ok_or_else(invalid)?;
        let (number, tail) = rest.split_at(number_end);
        let value: f64 = number.parse().map_err(|_| invalid())?;

        let unit_end = tail
            .find(|c: char| c.is_ascii_digit() || c == '.')
            .unwrap_or(tail.len());
        let (unit, next) = tail.split_at(unit_end);
        let scale = match unit {
            "ns" => 1.0,
            "us" | "\u{b5}s" | "\u{3bc}s" => 1e3,
            "ms" => 1e6,
            "s" => 1e9,
            "m" => 60e9,
            "h" => 3600e9,
            _ => return Err(invalid()),
        };

        nanos += value * scale;
        rest = next;
    }

    if !nanos.is_finite() || nanos >= u64::MAX as f64 {
        return Err(invalid());
    }
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let nanos = nanos.round() as u64;
    Ok(Duration::from_nanos(nanos))
}

fn parse_bool(key: &str, raw: &str) -> VaultResult<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "t" | "true" | "yes" => Ok(true),
        "0" | "f" | "false" | "no" => Ok(false),
        _ => Err(VaultError::invalid_config(format!("{key}={raw:?} is not a boolean"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;
    use std::collections::HashMap;

    fn from_vars(vars: &[(&str, &str)]) -> VaultResult<VaultConfig> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        VaultConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults_without_env() {
        let config = from_vars(&[]).unwrap();

        assert_eq!(config.addr.as_str(), "https://127.0.0.1:8200/");
        assert!(!config.addr_from_env());
        assert!(config.token.is_none());
        assert_eq!(config.timeout, Duration::from_secs(60));
        assert!(!config.skip_verify);
    }

    #[test]
    fn test_reads_environment() {
        let config = from_vars(&[
            ("VAULT_ADDR", "http://vault.local:8200"),
            ("VAULT_TOKEN", "s.abc"),
            ("VAULT_NAMESPACE", "team-a"),
            ("VAULT_CLIENT_TIMEOUT", "5m"),
            ("VAULT_SKIP_VERIFY", "true"),
            ("VAULT_CACERT", "/etc/vault/ca.pem"),
        ])
        .unwrap();

        assert!(config.addr_from_env());
        assert_eq!(config.addr.host_str(), Some("vault.local"));
        assert_eq!(config.token.as_ref().unwrap().expose_secret(), "s.abc");
        assert_eq!(config.namespace.as_deref(), Some("team-a"));
        assert_eq!(config.timeout, Duration::from_secs(300));
        assert!(config.skip_verify);
        assert_eq!(config.ca_cert, Some(PathBuf::from("/etc/vault/ca.pem")));
    }

    #[test]
    fn test_empty_addr_counts_as_unset() {
        let config = from_vars(&[("VAULT_ADDR", "  ")]).unwrap();
        assert!(!config.addr_from_env());
    }

    #[test]
    fn test_invalid_values_rejected() {
        assert!(matches!(
            from_vars(&[("VAULT_ADDR", "not a url")]),
            Err(VaultError::InvalidConfig(_))
        ));
        assert!(matches!(
            from_vars(&[("VAULT_ADDR", "ftp://vault")]),
            Err(VaultError::InvalidConfig(_))
        ));
        assert!(matches!(
            from_vars(&[("VAULT_CLIENT_TIMEOUT", "soon")]),
            Err(VaultError::InvalidConfig(_))
        ));
        assert!(matches!(
            from_vars(&[("VAULT_SKIP_VERIFY", "maybe")]),
            Err(VaultError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_timeout_formats() {
        assert_eq!(parse_timeout("30").unwrap(), Duration::from_secs(30));
        assert_eq!(parse_timeout("30s").unwrap(), Duration::from_secs(30));
        assert_eq!(parse_timeout("2h").unwrap(), Duration::from_secs(7200));
        assert!(parse_timeout("").is_err());
    }

    #[test]
    fn test_timeout_go_duration_formats() {
        assert_eq!(parse_timeout("1m30s").unwrap(), Duration::from_secs(90));
        assert_eq!(parse_timeout("500ms").unwrap(), Duration::from_millis(500));
        assert_eq!(parse_timeout("1.5s").unwrap(), Duration::from_millis(1500));
        assert_eq!(parse_timeout("1h2m3s").unwrap(), Duration::from_secs(3723));
        assert_eq!(parse_timeout("250us").unwrap(), Duration::from_micros(250));
    }

    #[test]
    fn test_timeout_rejects_malformed_durations() {
        for raw in ["soon", "10x", "1.2.3s", "s", "5m-3s", "-1s"] {
            assert!(parse_timeout(raw).is_err(), "{raw} should be rejected");
        }
    }

    #[test]
    fn test_compound_timeout_from_env() {
        let config = from_vars(&[("VAULT_CLIENT_TIMEOUT", "1m30s")]).unwrap();
        assert_eq!(config.timeout, Duration::from_secs(90));
    }

    #[test]
    fn test_with_timeout_overrides_default() {
        let config = VaultConfig::new("http://vault.local:8200")
            .unwrap()
            .with_timeout(Duration::from_millis(750));
        assert_eq!(config.timeout, Duration::from_millis(750));
    }

    #[test]
    fn test_api_url() {
        let config = VaultConfig::new("http://vault.local:8200/").unwrap();
        assert_eq!(
            config.api_url("secret/app").unwrap().as_str(),
            "http://vault.local:8200/v1/secret/app"
        );
    }

    #[test]
    fn test_token_not_in_debug() {
        let config = VaultConfig::new("http://vault.local:8200")
            .unwrap()
            .with_token("s.very-secret");
        assert!(!format!("{config:?}").contains("s.very-secret"));
    }
}
