//! Client for the storage registry.
//!
//! The registry maps a reference to the provider owning it. The
//! gateway asks on every request; resolved providers are not cached
//! beyond the client pool keyed by their address.

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue};
use serde::{Deserialize, Serialize};
use url::Url;

use common::storage::{Code, Reference, Status};

/// Handle for a storage provider as reported by the registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderInfo {
    /// Network address of the provider, stable within a process run.
    pub address: String,
    /// Path prefix the provider owns in the global namespace.
    #[serde(default)]
    pub provider_path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetStorageProviderRequest {
    pub reference: Reference,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetStorageProviderResponse {
    pub status: Status,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider: Option<ProviderInfo>,
}

#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("storage provider not found for reference: {0}")]
    NotFound(String),
    #[error("registry transport error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("registry URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),
    #[error("registry HTTP status {0}: {1}")]
    HttpStatus(reqwest::StatusCode, String),
    #[error("registry returned status {0:?}: {1}")]
    Unexpected(Code, String),
    #[error("registry response carries no provider")]
    MissingProvider,
}

/// Seam over the registry so the gateway core can be exercised against
/// in-process fakes.
#[async_trait]
pub trait StorageRegistry: Send + Sync + 'static {
    async fn get_storage_provider(&self, reference: &Reference)
        -> Result<ProviderInfo, RegistryError>;
}

/// HTTP client for a remote storage registry.
#[derive(Debug, Clone)]
pub struct HttpRegistryClient {
    endpoint: Url,
    client: reqwest::Client,
}

impl HttpRegistryClient {
    pub fn new(endpoint: Url) -> Result<Self, RegistryError> {
        let mut default_headers = HeaderMap::new();
        default_headers.insert("Content-Type", HeaderValue::from_static("application/json"));
        let client = reqwest::Client::builder()
            .default_headers(default_headers)
            .build()?;

        Ok(Self { endpoint, client })
    }
}

#[async_trait]
impl StorageRegistry for HttpRegistryClient {
    async fn get_storage_provider(
        &self,
        reference: &Reference,
    ) -> Result<ProviderInfo, RegistryError> {
        let url = self.endpoint.join("/api/v0/registry/get_storage_provider")?;
        let request = GetStorageProviderRequest {
            reference: reference.clone(),
        };

        let response = self.client.post(url).json(&request).send().await?;
        if !response.status().is_success() {
            return Err(RegistryError::HttpStatus(
                response.status(),
                response.text().await?,
            ));
        }

        let body: GetStorageProviderResponse = response.json().await?;
        match body.status.code {
            Code::Ok => body.provider.ok_or(RegistryError::MissingProvider),
            Code::NotFound => Err(RegistryError::NotFound(reference.to_string())),
            code => Err(RegistryError::Unexpected(code, body.status.message)),
        }
    }
}
