//! Vault HTTP client for the logical API.

use crate::{
    config::VaultConfig,
    error::{VaultError, VaultResult},
    provider::SecretStore,
    record::SecretRecord,
    secrets::{ErrorResponse, ListResponse, SecretResponse},
};
use async_trait::async_trait;
use reqwest::header::HeaderValue;
use reqwest::{Certificate, Client, Method, RequestBuilder, Response, StatusCode};
use secrecy::ExposeSecret;
use tracing::{debug, instrument};

/// Vault client speaking the `/v1/<path>` logical API with a static token.
#[derive(Debug)]
pub struct VaultClient {
    config: VaultConfig,
    http: Client,
}

impl VaultClient {
    /// Create a new Vault client.
    pub fn new(config: VaultConfig) -> VaultResult<Self> {
        let mut builder = Client::builder()
            .timeout(config.timeout)
            .danger_accept_invalid_certs(config.skip_verify);

        if let Some(path) = &config.ca_cert {
            let pem = std::fs::read(path).map_err(|e| {
                VaultError::invalid_config(format!("reading CA bundle {}: {e}", path.display()))
            })?;
            let cert = Certificate::from_pem(&pem).map_err(|e| {
                VaultError::invalid_config(format!("parsing CA bundle {}: {e}", path.display()))
            })?;
            builder = builder.add_root_certificate(cert);
        }

        let http = builder.build().map_err(VaultError::Http)?;
        Ok(Self { config, http })
    }

    /// Configuration this client was built with.
    #[must_use]
    pub const fn config(&self) -> &VaultConfig {
        &self.config
    }

    fn request(&self, method: Method, path: &str) -> VaultResult<RequestBuilder> {
        let url = self.config.api_url(normalize_path(path)?)?;
        let mut request = self
            .http
            .request(method, url)
            .header("X-Vault-Request", "true");

        if let Some(token) = &self.config.token {
            let mut value = HeaderValue::from_str(token.expose_secret())
                .map_err(|_| VaultError::invalid_config("token is not a valid header value"))?;
            value.set_sensitive(true);
            request = request.header("X-Vault-Token", value);
        }
        if let Some(namespace) = &self.config.namespace {
            request = request.header("X-Vault-Namespace", namespace.as_str());
        }

        Ok(request)
    }

    /// Send a request, mapping a 404 to `None` and failure statuses to errors.
    async fn send(&self, request: RequestBuilder, path: &str) -> VaultResult<Option<Response>> {
        let response = request
            .send()
            .await
            .map_err(|e| VaultError::unavailable(e.to_string()))?;

        let status = response.status();
        match status.as_u16() {
            404 => Ok(None),
            403 => Err(VaultError::PermissionDenied(path.to_string())),
            429 => Err(VaultError::RateLimited),
            s if s >= 500 => {
                let text = response.text().await.unwrap_or_default();
                Err(VaultError::unavailable(format!("Status {status}: {text}")))
            }
            _ if !status.is_success() => {
                let body: ErrorResponse = response.json().await.unwrap_or_default();
                Err(VaultError::Api {
                    status: status.as_u16(),
                    errors: body.errors,
                })
            }
            _ => Ok(Some(response)),
        }
    }
}

/// Strip leading slashes; Vault paths are relative to `/v1/`.
fn normalize_path(path: &str) -> VaultResult<&str> {
    let trimmed = path.trim_start_matches('/');
    if trimmed.trim_end_matches('/').is_empty() {
        return Err(VaultError::InvalidPath(path.to_string()));
    }
    Ok(trimmed)
}

#[async_trait]
impl SecretStore for VaultClient {
    #[instrument(skip(self))]
    async fn list(&self, path: &str) -> VaultResult<Option<Vec<String>>> {
        debug!("Listing secrets");

        let request = self.request(Method::GET, path)?.query(&[("list", "true")]);
        let Some(response) = self.send(request, path).await? else {
            return Ok(None);
        };

        let body: ListResponse = response.json().await?;
        Ok(body.data.map(|data| data.keys))
    }

    #[instrument(skip(self))]
    async fn read(&self, path: &str) -> VaultResult<Option<SecretRecord>> {
        debug!("Reading secret");

        let request = self.request(Method::GET, path)?;
        let Some(response) = self.send(request, path).await? else {
            return Ok(None);
        };

        let body: SecretResponse = response.json().await?;
        Ok(Some(body.data.unwrap_or_default()))
    }

    #[instrument(skip(self, data), fields(field_count = data.len()))]
    async fn write(&self, path: &str, data: &SecretRecord) -> VaultResult<Option<SecretResponse>> {
        debug!("Writing secret");

        let request = self.request(Method::PUT, path)?.json(data);
        let Some(response) = self.send(request, path).await? else {
            // Writes never treat 404 as "absent"
            return Err(VaultError::Api {
                status: StatusCode::NOT_FOUND.as_u16(),
                errors: Vec::new(),
            });
        };

        if response.status() == StatusCode::NO_CONTENT {
            return Ok(None);
        }
        let bytes = response.bytes().await?;
        if bytes.is_empty() {
            return Ok(None);
        }
        Ok(Some(serde_json::from_slice(&bytes)?))
    }
}
