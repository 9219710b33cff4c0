use common::prelude::*;
use common::storage::{
    CreateContainerRequest, CreateContainerResponse, DeleteRequest, DeleteResponse,
};

use crate::shares::{path_join, SharePath};

use super::Gateway;

impl Gateway {
    pub async fn create_container(
        &self,
        user: &User,
        mut req: CreateContainerRequest,
    ) -> CreateContainerResponse {
        let p = match self.effective_path(&req.reference, &[]).await {
            Ok(p) => p,
            Err(status) => return CreateContainerResponse { status },
        };

        match self.shares().classify(&p) {
            SharePath::Plain => self.create_container_internal(&req).await,
            SharePath::ShareFolder | SharePath::ShareName => {
                tracing::debug!(user = %user.id.opaque_id, path = %p,
                    "rejecting create container on share folder or share name");
                CreateContainerResponse {
                    status: Status::invalid_argument("path points to share folder or share name"),
                }
            }
            SharePath::ShareChild => {
                let target = match self.rewrite_share_child(&p).await {
                    Ok(target) => target,
                    Err(status) => return CreateContainerResponse { status },
                };
                req.reference = Reference::path(target);
                self.create_container_internal(&req).await
            }
        }
    }

    async fn create_container_internal(
        &self,
        req: &CreateContainerRequest,
    ) -> CreateContainerResponse {
        let client = match self.find(&req.reference).await {
            Ok(client) => client,
            Err(e) => {
                return CreateContainerResponse {
                    status: e.into_status(),
                }
            }
        };

        match client.create_container(req).await {
            Ok(res) => res,
            Err(e) => CreateContainerResponse {
                status: Status::internal(format!("error calling CreateContainer: {}", e)),
            },
        }
    }

    pub async fn delete(&self, user: &User, mut req: DeleteRequest) -> DeleteResponse {
        let p = match self.effective_path(&req.reference, &[]).await {
            Ok(p) => p,
            Err(status) => return DeleteResponse { status },
        };

        match self.shares().classify(&p) {
            SharePath::Plain => self.delete_internal(&req).await,
            SharePath::ShareFolder => {
                tracing::debug!(user = %user.id.opaque_id, path = %p,
                    "rejecting delete of the share folder");
                DeleteResponse {
                    status: Status::invalid_argument("path points to share folder or share name"),
                }
            }
            // deleting a share name unmounts it; the reference itself
            // is removed, never its target
            SharePath::ShareName => {
                tracing::debug!(user = %user.id.opaque_id, path = %p, "unmounting share");
                req.reference = Reference::path(p);
                self.delete_internal(&req).await
            }
            SharePath::ShareChild => {
                let target = match self.rewrite_share_child(&p).await {
                    Ok(target) => target,
                    Err(status) => return DeleteResponse { status },
                };
                req.reference = Reference::path(target);
                self.delete_internal(&req).await
            }
        }
    }

    async fn delete_internal(&self, req: &DeleteRequest) -> DeleteResponse {
        let client = match self.find(&req.reference).await {
            Ok(client) => client,
            Err(e) => {
                return DeleteResponse {
                    status: e.into_status(),
                }
            }
        };

        match client.delete(req).await {
            Ok(res) => res,
            Err(e) => DeleteResponse {
                status: Status::internal(format!("error calling Delete: {}", e)),
            },
        }
    }

    /// Resolves a share-child path into the provider-side target path.
    pub(crate) async fn rewrite_share_child(&self, p: &str) -> Result<String, Status> {
        let (share_name, share_child) = self
            .shares()
            .split_share(p)
            .map_err(|e| Status::internal(format!("error splitting share path: {}", e)))?;
        let resolved = self.resolve_share_name(&share_name).await?;
        Ok(path_join(&[&resolved.path, &share_child]))
    }
}
