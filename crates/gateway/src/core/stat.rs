use common::prelude::*;
use common::storage::{StatRequest, StatResponse};

use crate::shares::{path_join, SharePath};

use super::Gateway;

impl Gateway {
    pub async fn stat(&self, user: &User, req: StatRequest) -> StatResponse {
        let p = match self
            .effective_path(&req.reference, &req.arbitrary_metadata_keys)
            .await
        {
            Ok(p) => p,
            Err(status) => return StatResponse { status, info: None },
        };

        match self.shares().classify(&p) {
            SharePath::Plain | SharePath::ShareFolder => self.stat_internal(&req).await,
            SharePath::ShareName => self.stat_share_name(user, &req, &p).await,
            SharePath::ShareChild => self.stat_share_child(user, &req, &p).await,
        }
    }

    /// A stat on a mount point returns the info of the resolved target,
    /// but the user-facing path: the reference target must not leak
    /// into the caller's namespace.
    async fn stat_share_name(&self, user: &User, req: &StatRequest, p: &str) -> StatResponse {
        tracing::debug!(user = %user.id.opaque_id, path = p, "stat on share name");

        let res = self.stat_internal(req).await;
        if !res.status.is_ok() {
            return StatResponse {
                status: Status::internal(format!(
                    "error stating share name {}: {:?}: {}",
                    p, res.status.code, res.status.message
                )),
                info: None,
            };
        }
        let info = match res.info {
            Some(info) => info,
            None => {
                return StatResponse {
                    status: Status::internal(format!("stat of {} carried no info", p)),
                    info: None,
                }
            }
        };

        if info.resource_type != ResourceType::Reference {
            tracing::error!(path = p, resource_type = ?info.resource_type,
                "share name is not backed by a reference");
            return StatResponse {
                status: Status::internal(format!(
                    "expected reference at {}, got {:?}",
                    p, info.resource_type
                )),
                info: None,
            };
        }

        let mut resolved = match self.check_ref(&info).await {
            Ok(resolved) => resolved,
            Err(e) => {
                return StatResponse {
                    status: Status::internal(format!("error resolving reference {}: {}", p, e)),
                    info: None,
                }
            }
        };

        // keep the mount-point path the provider reported; all other
        // fields come from the resolved target
        resolved.path = info.path;
        StatResponse {
            status: res.status,
            info: Some(resolved),
        }
    }

    async fn stat_share_child(&self, user: &User, req: &StatRequest, p: &str) -> StatResponse {
        let (share_name, share_child) = match self.shares().split_share(p) {
            Ok(split) => split,
            Err(e) => {
                return StatResponse {
                    status: Status::internal(format!("error splitting share path: {}", e)),
                    info: None,
                }
            }
        };
        tracing::debug!(user = %user.id.opaque_id, path = p,
            share_name = %share_name, share_child = %share_child, "stat on share child");

        let resolved = match self.resolve_share_name(&share_name).await {
            Ok(resolved) => resolved,
            Err(status) => return StatResponse { status, info: None },
        };

        let target = path_join(&[&resolved.path, &share_child]);
        let rewritten = StatRequest {
            reference: Reference::path(target),
            arbitrary_metadata_keys: req.arbitrary_metadata_keys.clone(),
        };
        self.stat_internal(&rewritten).await
    }
}
