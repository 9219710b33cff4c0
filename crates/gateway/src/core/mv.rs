use common::prelude::*;
use common::storage::{MoveRequest, MoveResponse};

use crate::shares::{path_join, SharePath};

use super::Gateway;

impl Gateway {
    pub async fn mv(&self, user: &User, mut req: MoveRequest) -> MoveResponse {
        let p = match self.effective_path(&req.source, &[]).await {
            Ok(p) => p,
            Err(status) => return MoveResponse { status },
        };
        let dp = match self.effective_path(&req.destination, &[]).await {
            Ok(dp) => dp,
            Err(status) => return MoveResponse { status },
        };

        let src_shape = self.shares().classify(&p);
        let dst_shape = self.shares().classify(&dp);

        if src_shape == SharePath::Plain && dst_shape == SharePath::Plain {
            return self.mv_internal(&req).await;
        }

        // renaming a mount point moves the reference, never the target
        if src_shape == SharePath::ShareName && dst_shape == SharePath::ShareName {
            tracing::info!(user = %user.id.opaque_id, from = %p, to = %dp,
                "renaming share mount point");
            return self.mv_internal(&req).await;
        }

        if src_shape == SharePath::ShareChild && dst_shape == SharePath::ShareChild {
            let (share_name, share_child) = match self.shares().split_share(&p) {
                Ok(split) => split,
                Err(e) => {
                    return MoveResponse {
                        status: Status::internal(format!("error splitting share path: {}", e)),
                    }
                }
            };
            let (dshare_name, dshare_child) = match self.shares().split_share(&dp) {
                Ok(split) => split,
                Err(e) => {
                    return MoveResponse {
                        status: Status::internal(format!("error splitting share path: {}", e)),
                    }
                }
            };
            tracing::debug!(user = %user.id.opaque_id,
                src = %p, dst = %dp, share_name = %share_name, dshare_name = %dshare_name, "move inside share");

            if share_name != dshare_name {
                return MoveResponse {
                    status: Status::internal(
                        "move: source and destination point to different targets",
                    ),
                };
            }

            // resolve the shared mount once and rewrite both sides
            let resolved = match self.resolve_share_name(&share_name).await {
                Ok(resolved) => resolved,
                Err(status) => return MoveResponse { status },
            };

            req.source = Reference::path(path_join(&[&resolved.path, &share_child]));
            req.destination = Reference::path(path_join(&[&resolved.path, &dshare_child]));
            return self.mv_internal(&req).await;
        }

        // a combination that crosses the share boundary would route
        // data across namespaces; refuse rather than forward
        tracing::error!(user = %user.id.opaque_id, src = %p, dst = %dp,
            ?src_shape, ?dst_shape, "move called on unknown path combination");
        MoveResponse {
            status: Status::internal(format!(
                "move called on unknown path combination: src={} dst={}",
                p, dp
            )),
        }
    }

    async fn mv_internal(&self, req: &MoveRequest) -> MoveResponse {
        let src_provider = match self.find_provider(&req.source).await {
            Ok(provider) => provider,
            Err(e) => {
                return MoveResponse {
                    status: e.into_status(),
                }
            }
        };
        let dst_provider = match self.find_provider(&req.destination).await {
            Ok(provider) => provider,
            Err(e) => {
                return MoveResponse {
                    status: e.into_status(),
                }
            }
        };

        // moving bytes between providers is not supported
        if src_provider.address != dst_provider.address {
            return MoveResponse {
                status: Status::unimplemented("cross storage copy not yet implemented"),
            };
        }

        let client = match self.pool.client_for(&src_provider).await {
            Ok(client) => client,
            Err(e) => {
                return MoveResponse {
                    status: Status::internal(format!(
                        "error connecting to storage provider {}: {}",
                        src_provider.address, e
                    )),
                }
            }
        };

        match client.mv(req).await {
            Ok(res) => res,
            Err(e) => MoveResponse {
                status: Status::internal(format!("error calling Move: {}", e)),
            },
        }
    }
}
