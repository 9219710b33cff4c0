//! Mesh provider descriptions and the authorizer seam.

mod json;

pub use json::JsonAuthorizer;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::registry::Registry;

/// A provider participating in the mesh.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderInfo {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub full_name: String,
    pub domain: String,
    #[serde(default)]
    pub services: Vec<Service>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Service {
    pub host: String,
    pub endpoint: ServiceEndpoint,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceEndpoint {
    /// Service kind, e.g. `OCM`.
    #[serde(rename = "type")]
    pub kind: String,
    pub path: String,
}

/// The host of the provider's OCM service, scheme prefix stripped.
pub fn ocm_host(provider: &ProviderInfo) -> Option<String> {
    provider
        .services
        .iter()
        .find(|s| s.endpoint.kind == "OCM")
        .map(|s| {
            s.host
                .trim_start_matches("https://")
                .trim_start_matches("http://")
                .to_string()
        })
}

/// The endpoint path of the provider's OCM service.
pub fn ocm_endpoint(provider: &ProviderInfo) -> Option<String> {
    provider
        .services
        .iter()
        .find(|s| s.endpoint.kind == "OCM")
        .map(|s| s.endpoint.path.clone())
}

#[derive(Debug, thiserror::Error)]
pub enum AuthorizerError {
    #[error("provider not found: {0}")]
    NotFound(String),
    #[error("not supported: {0}")]
    NotSupported(String),
    #[error("error looking up provider host {0}: {1}")]
    Lookup(String, #[source] std::io::Error),
}

/// Decides whether a mesh provider may talk to us.
#[async_trait]
pub trait Authorizer: Send + Sync {
    async fn get_info_by_domain(&self, domain: &str) -> Result<ProviderInfo, AuthorizerError>;
    async fn is_provider_allowed(&self, provider: &ProviderInfo) -> Result<(), AuthorizerError>;
    async fn list_all_providers(&self) -> Result<Vec<ProviderInfo>, AuthorizerError>;
}

/// Registers the built-in authorizer drivers. Called from the
/// composition root.
pub fn register_drivers(registry: &mut Registry<Box<dyn Authorizer>>) {
    registry.register("json", |options| {
        Ok(Box::new(JsonAuthorizer::from_options(options)?) as Box<dyn Authorizer>)
    });
}
