//! Reference resolution: following the symbolic pointer behind a
//! share mount exactly one hop.
//!
//! The only supported target scheme is `cs3`, whose opaque portion has
//! the layout `<storage_id>/<opaque_id>`. Resolution stats the
//! extracted id through the gateway's internal routing; a resolved
//! resource that is itself a reference is rejected, which bounds the
//! follow at one hop and prevents loops.

use url::Url;

use common::storage::{Reference, ResourceInfo, ResourceType, StatRequest};

use super::Gateway;

#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    #[error("expected reference type, got {0:?}")]
    NotAReference(ResourceType),
    #[error("reference target is an empty uri")]
    EmptyTarget,
    #[error("error parsing reference target uri {0}: {1}")]
    MalformedTarget(String, #[source] url::ParseError),
    #[error("no reference handler for scheme: {0}")]
    UnknownScheme(String),
    #[error("reference does not follow the layout storage_id/opaque_id: {0}")]
    MalformedOpaque(String),
    #[error("error stating reference target: {0}")]
    StatTarget(String),
    #[error("the target of a reference cannot be another reference")]
    Chain,
}

impl Gateway {
    /// Follows the target of a reference resource and returns the real
    /// resource info behind it.
    pub(crate) async fn check_ref(
        &self,
        info: &ResourceInfo,
    ) -> Result<ResourceInfo, ResolveError> {
        if info.resource_type != ResourceType::Reference {
            return Err(ResolveError::NotAReference(info.resource_type));
        }

        // reference types must carry a target
        let target = match info.target.as_deref() {
            Some(t) if !t.is_empty() => t,
            _ => return Err(ResolveError::EmptyTarget),
        };

        let uri = Url::parse(target)
            .map_err(|e| ResolveError::MalformedTarget(target.to_string(), e))?;

        match uri.scheme() {
            "cs3" => self.follow_storage_ref(uri.path()).await,
            other => Err(ResolveError::UnknownScheme(other.to_string())),
        }
    }

    /// Resolves the `<storage_id>/<opaque_id>` form with one stat.
    async fn follow_storage_ref(&self, opaque: &str) -> Result<ResourceInfo, ResolveError> {
        let (storage_id, opaque_id) = opaque
            .split_once('/')
            .ok_or_else(|| ResolveError::MalformedOpaque(opaque.to_string()))?;

        let req = StatRequest::new(Reference::id(storage_id, opaque_id));
        let res = self.stat_internal(&req).await;
        if !res.status.is_ok() {
            return Err(ResolveError::StatTarget(format!(
                "{:?}: {}",
                res.status.code, res.status.message
            )));
        }
        let info = res
            .info
            .ok_or_else(|| ResolveError::StatTarget("stat carried no info".to_string()))?;

        if info.resource_type == ResourceType::Reference {
            return Err(ResolveError::Chain);
        }

        Ok(info)
    }
}
