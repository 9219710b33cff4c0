use std::net::SocketAddr;
use std::path::PathBuf;

use url::Url;

/// Gateway service configuration, read-only after startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Address the RPC HTTP server listens on.
    pub listen_addr: SocketAddr,

    /// Name of the share folder mounted under the hardcoded `/home`,
    /// e.g. `MyShares`.
    pub share_folder: String,

    /// Endpoint handed to clients for non-exposed transfers; the data
    /// gateway behind it verifies the transfer token.
    pub data_gateway_endpoint: String,
    /// Validity window of transfer tokens, in seconds.
    pub transfer_expires_seconds: u64,
    /// Shared secret between this gateway and the data gateway.
    pub transfer_shared_secret: String,

    /// Endpoint of the storage registry that maps references to
    /// providers.
    pub storage_registry_endpoint: Url,

    // logging
    pub log_level: tracing::Level,
    /// Directory for log files (stdout only if not set).
    pub log_dir: Option<PathBuf>,
}

impl Config {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.share_folder.trim_matches('/').is_empty() {
            return Err(ConfigError::EmptyShareFolder);
        }
        if self.transfer_shared_secret.is_empty() {
            return Err(ConfigError::EmptyTransferSecret);
        }
        if self.data_gateway_endpoint.is_empty() {
            return Err(ConfigError::EmptyDataGatewayEndpoint);
        }
        Ok(())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("share folder name must not be empty")]
    EmptyShareFolder,
    #[error("transfer shared secret must not be empty")]
    EmptyTransferSecret,
    #[error("data gateway endpoint must not be empty")]
    EmptyDataGatewayEndpoint,
}
