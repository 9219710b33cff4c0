//! The gateway core: request routing, share resolution, and the
//! per-operation policies of the public storage surface.
//!
//! Every operation follows the same canonical pattern: derive the
//! effective path of the request's reference, classify it against the
//! share layout, and either forward the request unchanged to the
//! owning provider or resolve the share reference and rewrite the
//! request into the provider's namespace first. The user never sees a
//! resolved target path; listings and stats are mapped back into the
//! caller's namespace before they are returned.

mod container;
mod home;
mod list;
mod mv;
mod passthrough;
mod resolve;
mod stat;
mod transfer_ops;

pub use resolve::ResolveError;

use std::sync::Arc;

use common::storage::{Reference, ResourceInfo, ResourceType, StatRequest, StatResponse, Status};

use crate::config::Config;
use crate::pool::{ClientPool, PoolError};
use crate::provider::StorageProviderClient;
use crate::registry::{ProviderInfo, RegistryError, StorageRegistry};
use crate::shares::ShareLayout;
use crate::transfer::TransferSigner;

/// The storage gateway. Stateless across requests: all mutable state
/// lives in the backing providers, the only shared resources are the
/// provider client pool and the read-only configuration.
pub struct Gateway {
    shares: ShareLayout,
    signer: TransferSigner,
    data_gateway_endpoint: String,
    registry: Arc<dyn StorageRegistry>,
    pool: Arc<dyn ClientPool>,
}

impl Gateway {
    pub fn new(
        config: &Config,
        registry: Arc<dyn StorageRegistry>,
        pool: Arc<dyn ClientPool>,
    ) -> Self {
        Self {
            shares: ShareLayout::new(&config.share_folder),
            signer: TransferSigner::new(
                config.transfer_shared_secret.clone(),
                config.transfer_expires_seconds,
            ),
            data_gateway_endpoint: config.data_gateway_endpoint.clone(),
            registry,
            pool,
        }
    }

    pub fn shares(&self) -> &ShareLayout {
        &self.shares
    }

    pub(crate) fn signer(&self) -> &TransferSigner {
        &self.signer
    }

    pub(crate) fn data_gateway_endpoint(&self) -> &str {
        &self.data_gateway_endpoint
    }

    /// Asks the registry which provider owns the reference.
    pub(crate) async fn find_provider(
        &self,
        reference: &Reference,
    ) -> Result<ProviderInfo, RouteError> {
        Ok(self.registry.get_storage_provider(reference).await?)
    }

    /// Resolves the reference to a reusable client for its provider.
    pub(crate) async fn find(
        &self,
        reference: &Reference,
    ) -> Result<Arc<dyn StorageProviderClient>, RouteError> {
        let provider = self.find_provider(reference).await?;
        Ok(self.pool.client_for(&provider).await?)
    }

    pub(crate) async fn find_by_path(
        &self,
        path: &str,
    ) -> Result<Arc<dyn StorageProviderClient>, RouteError> {
        self.find(&Reference::path(path)).await
    }

    /// Routes a stat to the owning provider without any share
    /// awareness. Used internally for effective-path derivation and
    /// reference resolution, and by the public `Stat` for plain paths.
    pub(crate) async fn stat_internal(&self, req: &StatRequest) -> StatResponse {
        let client = match self.find(&req.reference).await {
            Ok(client) => client,
            Err(e) => {
                return StatResponse {
                    status: e.into_status(),
                    info: None,
                }
            }
        };

        match client.stat(req).await {
            Ok(res) => res,
            Err(e) => StatResponse {
                status: Status::internal(format!("error calling Stat: {}", e)),
                info: None,
            },
        }
    }

    /// Derives the effective path of a reference: the path itself when
    /// present, otherwise the path reported by a stat on the id.
    pub(crate) async fn effective_path(
        &self,
        reference: &Reference,
        arbitrary_metadata_keys: &[String],
    ) -> Result<String, Status> {
        match reference {
            Reference::Path(p) if !p.is_empty() => Ok(p.clone()),
            Reference::Id(id) if !id.opaque_id.is_empty() => {
                let req = StatRequest {
                    reference: reference.clone(),
                    arbitrary_metadata_keys: arbitrary_metadata_keys.to_vec(),
                };
                let res = self.stat_internal(&req).await;
                if !res.status.is_ok() {
                    return Err(Status::internal(format!(
                        "error getting path for ref {}: {:?}: {}",
                        reference, res.status.code, res.status.message
                    )));
                }
                match res.info {
                    Some(info) => Ok(info.path),
                    None => Err(Status::internal(format!(
                        "error getting path for ref {}: stat carried no info",
                        reference
                    ))),
                }
            }
            _ => Err(Status::internal(format!("invalid reference: {}", reference))),
        }
    }

    /// Stats a share name and follows its reference one hop.
    ///
    /// Used by every operation that needs the target behind a mount
    /// point. Errors are already mapped to the status the operation
    /// should return.
    pub(crate) async fn resolve_share_name(
        &self,
        share_name: &str,
    ) -> Result<ResourceInfo, Status> {
        let res = self
            .stat_internal(&StatRequest::new(Reference::path(share_name)))
            .await;
        if !res.status.is_ok() {
            return Err(Status::internal(format!(
                "error stating share name {}: {:?}: {}",
                share_name, res.status.code, res.status.message
            )));
        }
        let info = res.info.ok_or_else(|| {
            Status::internal(format!("stat of share name {} carried no info", share_name))
        })?;

        if info.resource_type != ResourceType::Reference {
            tracing::error!(
                path = share_name,
                resource_type = ?info.resource_type,
                "share name is not backed by a reference"
            );
            return Err(Status::internal(format!(
                "expected reference at {}, got {:?}",
                share_name, info.resource_type
            )));
        }

        self.check_ref(&info).await.map_err(|e| {
            tracing::error!(path = share_name, error = %e, "error resolving reference");
            Status::internal(format!("error resolving reference {}: {}", share_name, e))
        })
    }
}

/// Routing failure: the registry does not know the reference, or
/// something on the way to a provider client broke.
#[derive(Debug, thiserror::Error)]
pub(crate) enum RouteError {
    #[error("storage provider not found")]
    NotFound,
    #[error("{0}")]
    Internal(String),
}

impl RouteError {
    pub(crate) fn into_status(self) -> Status {
        match self {
            RouteError::NotFound => Status::not_found("storage provider not found"),
            RouteError::Internal(msg) => {
                Status::internal(format!("error finding storage provider: {}", msg))
            }
        }
    }
}

impl From<RegistryError> for RouteError {
    fn from(e: RegistryError) -> Self {
        match e {
            RegistryError::NotFound(_) => RouteError::NotFound,
            other => RouteError::Internal(other.to_string()),
        }
    }
}

impl From<PoolError> for RouteError {
    fn from(e: PoolError) -> Self {
        RouteError::Internal(e.to_string())
    }
}
