use std::sync::Arc;

use crate::config::{Config, ConfigError};
use crate::core::Gateway;
use crate::pool::HttpClientPool;
use crate::registry::{HttpRegistryClient, RegistryError};

/// Shared state handed to every request handler. Cheap to clone: the
/// gateway itself is stateless and all shared pieces are behind `Arc`s.
#[derive(Clone)]
pub struct ServiceState {
    gateway: Arc<Gateway>,
}

impl ServiceState {
    pub fn from_config(config: &Config) -> Result<Self, StateError> {
        config.validate()?;

        let registry = Arc::new(HttpRegistryClient::new(
            config.storage_registry_endpoint.clone(),
        )?);
        let pool = Arc::new(HttpClientPool::new());
        let gateway = Arc::new(Gateway::new(config, registry, pool));

        Ok(Self { gateway })
    }

    /// Builds state around an already-assembled gateway. Used by tests
    /// to inject fake registries and providers.
    pub fn with_gateway(gateway: Gateway) -> Self {
        Self {
            gateway: Arc::new(gateway),
        }
    }

    pub fn gateway(&self) -> &Gateway {
        &self.gateway
    }
}

#[derive(Debug, thiserror::Error)]
pub enum StateError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("error building registry client: {0}")]
    Registry(#[from] RegistryError),
}
