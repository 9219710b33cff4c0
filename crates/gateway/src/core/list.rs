use common::prelude::*;
use common::storage::{ListContainerRequest, ListContainerResponse};

use crate::shares::{basename, path_join, SharePath};

use super::Gateway;

impl Gateway {
    pub async fn list_container(
        &self,
        user: &User,
        req: ListContainerRequest,
    ) -> ListContainerResponse {
        let p = match self
            .effective_path(&req.reference, &req.arbitrary_metadata_keys)
            .await
        {
            Ok(p) => p,
            Err(status) => return ListContainerResponse { status, infos: vec![] },
        };

        match self.shares().classify(&p) {
            SharePath::Plain => self.list_internal(&req).await,
            SharePath::ShareFolder => self.list_share_folder(user, &req, &p).await,
            SharePath::ShareName => self.list_share_name(user, &req, &p).await,
            SharePath::ShareChild => self.list_share_child(user, &req, &p).await,
        }
    }

    /// Streaming listings are not supported by the gateway.
    pub async fn list_container_stream(
        &self,
        _user: &User,
        _req: ListContainerRequest,
    ) -> ListContainerResponse {
        ListContainerResponse {
            status: Status::unimplemented("ListContainerStream not implemented"),
            infos: vec![],
        }
    }

    async fn list_internal(&self, req: &ListContainerRequest) -> ListContainerResponse {
        let client = match self.find(&req.reference).await {
            Ok(client) => client,
            Err(e) => {
                return ListContainerResponse {
                    status: e.into_status(),
                    infos: vec![],
                }
            }
        };

        match client.list_container(req).await {
            Ok(res) => res,
            Err(e) => ListContainerResponse {
                status: Status::internal(format!("error calling ListContainer: {}", e)),
                infos: vec![],
            },
        }
    }

    /// Listing the share folder yields one reference per mount; each is
    /// resolved and presented under the caller's path so that no
    /// response ever carries a resource of reference type.
    async fn list_share_folder(
        &self,
        user: &User,
        req: &ListContainerRequest,
        p: &str,
    ) -> ListContainerResponse {
        tracing::debug!(user = %user.id.opaque_id, path = p, "listing share folder");

        let res = self.list_internal(req).await;
        if !res.status.is_ok() {
            return res;
        }

        let mut infos = Vec::with_capacity(res.infos.len());
        for child in res.infos {
            let mut resolved = match self.check_ref(&child).await {
                Ok(resolved) => resolved,
                Err(e) => {
                    return ListContainerResponse {
                        status: Status::internal(format!(
                            "error resolving reference {}: {}",
                            child.path, e
                        )),
                        infos: vec![],
                    }
                }
            };
            resolved.path = path_join(&[p, basename(&child.path)]);
            infos.push(resolved);
        }

        ListContainerResponse {
            status: res.status,
            infos,
        }
    }

    async fn list_share_name(
        &self,
        user: &User,
        req: &ListContainerRequest,
        p: &str,
    ) -> ListContainerResponse {
        tracing::debug!(user = %user.id.opaque_id, path = p, "listing share name");

        let resolved = match self.resolve_share_name(p).await {
            Ok(resolved) => resolved,
            Err(status) => return ListContainerResponse { status, infos: vec![] },
        };

        if resolved.resource_type != ResourceType::Container {
            tracing::error!(path = p, resource_type = ?resolved.resource_type,
                "cannot list non-container share target");
            return ListContainerResponse {
                status: Status::invalid_argument("resource is not a container"),
                infos: vec![],
            };
        }

        let rewritten = ListContainerRequest {
            reference: Reference::path(resolved.path),
            arbitrary_metadata_keys: req.arbitrary_metadata_keys.clone(),
        };
        let res = self.list_internal(&rewritten).await;
        if !res.status.is_ok() {
            return ListContainerResponse {
                status: Status::internal(format!(
                    "error listing {}: {:?}: {}",
                    p, res.status.code, res.status.message
                )),
                infos: vec![],
            };
        }

        self.rewrite_children(res, |child| path_join(&[p, basename(&child.path)]))
    }

    async fn list_share_child(
        &self,
        user: &User,
        req: &ListContainerRequest,
        p: &str,
    ) -> ListContainerResponse {
        let (share_name, share_child) = match self.shares().split_share(p) {
            Ok(split) => split,
            Err(e) => {
                return ListContainerResponse {
                    status: Status::internal(format!("error splitting share path: {}", e)),
                    infos: vec![],
                }
            }
        };
        tracing::debug!(user = %user.id.opaque_id, path = p,
            share_name = %share_name, share_child = %share_child, "listing share child");

        let resolved = match self.resolve_share_name(&share_name).await {
            Ok(resolved) => resolved,
            Err(status) => return ListContainerResponse { status, infos: vec![] },
        };

        if resolved.resource_type != ResourceType::Container {
            tracing::error!(path = p, resource_type = ?resolved.resource_type,
                "cannot list non-container share target");
            return ListContainerResponse {
                status: Status::invalid_argument("resource is not a container"),
                infos: vec![],
            };
        }

        let target = path_join(&[&resolved.path, &share_child]);
        let rewritten = ListContainerRequest {
            reference: Reference::path(target),
            arbitrary_metadata_keys: req.arbitrary_metadata_keys.clone(),
        };
        let res = self.list_internal(&rewritten).await;
        if !res.status.is_ok() {
            return ListContainerResponse {
                status: Status::internal(format!(
                    "error listing {}: {:?}: {}",
                    p, res.status.code, res.status.message
                )),
                infos: vec![],
            };
        }

        self.rewrite_children(res, |child| {
            path_join(&[&share_name, &share_child, basename(&child.path)])
        })
    }

    /// Maps listed children back into the caller's namespace.
    fn rewrite_children<F>(
        &self,
        mut res: ListContainerResponse,
        rewrite: F,
    ) -> ListContainerResponse
    where
        F: Fn(&ResourceInfo) -> String,
    {
        for child in &mut res.infos {
            child.path = rewrite(child);
        }
        res
    }
}
