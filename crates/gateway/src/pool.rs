//! Pool of provider clients, keyed by provider address.
//!
//! At most one client exists per address; a missing client is
//! constructed on demand. The pool owns its clients for the process
//! lifetime.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use url::Url;

use crate::provider::{HttpProviderClient, ProviderError, StorageProviderClient};
use crate::registry::ProviderInfo;

#[derive(Debug, thiserror::Error)]
pub enum PoolError {
    #[error("invalid provider address {0}: {1}")]
    InvalidAddress(String, #[source] url::ParseError),
    #[error("error building provider client: {0}")]
    Client(#[from] ProviderError),
}

/// Hands out reusable clients for providers. Implementations must be
/// safe to call from concurrent request tasks.
#[async_trait]
pub trait ClientPool: Send + Sync + 'static {
    async fn client_for(
        &self,
        provider: &ProviderInfo,
    ) -> Result<Arc<dyn StorageProviderClient>, PoolError>;
}

/// Address-keyed pool of [`HttpProviderClient`]s.
#[derive(Debug, Default)]
pub struct HttpClientPool {
    clients: RwLock<HashMap<String, Arc<HttpProviderClient>>>,
}

impl HttpClientPool {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ClientPool for HttpClientPool {
    async fn client_for(
        &self,
        provider: &ProviderInfo,
    ) -> Result<Arc<dyn StorageProviderClient>, PoolError> {
        if let Some(client) = self.clients.read().await.get(&provider.address) {
            return Ok(client.clone());
        }

        let mut clients = self.clients.write().await;
        // a concurrent task may have inserted while we waited for the
        // write lock
        if let Some(client) = clients.get(&provider.address) {
            return Ok(client.clone());
        }

        let base = Url::parse(&provider.address)
            .map_err(|e| PoolError::InvalidAddress(provider.address.clone(), e))?;
        let client = Arc::new(HttpProviderClient::new(base)?);
        clients.insert(provider.address.clone(), client.clone());
        Ok(client)
    }
}
