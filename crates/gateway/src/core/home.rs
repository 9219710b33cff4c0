use common::prelude::*;
use common::storage::{
    CreateHomeRequest, CreateHomeResponse, GetHomeRequest, GetHomeResponse, GetPathRequest,
    GetPathResponse, StatRequest,
};

use crate::shares::HOME;

use super::Gateway;

impl Gateway {
    /// The home path is hardcoded; only the share folder below it is
    /// configurable.
    pub async fn get_home(&self, _user: &User, _req: GetHomeRequest) -> GetHomeResponse {
        GetHomeResponse {
            status: Status::ok(),
            path: HOME.to_string(),
        }
    }

    pub async fn create_home(&self, user: &User, req: CreateHomeRequest) -> CreateHomeResponse {
        tracing::debug!(user = %user.id.opaque_id, "creating home");

        let client = match self.find_by_path(HOME).await {
            Ok(client) => client,
            Err(e) => {
                return CreateHomeResponse {
                    status: e.into_status(),
                }
            }
        };

        match client.create_home(&req).await {
            Ok(res) => res,
            Err(e) => CreateHomeResponse {
                status: Status::internal(format!("error calling CreateHome: {}", e)),
            },
        }
    }

    /// Resolves a resource id back into a path.
    pub async fn get_path(&self, _user: &User, req: GetPathRequest) -> GetPathResponse {
        let reference = Reference::Id(req.resource_id);
        let res = self.stat_internal(&StatRequest::new(reference.clone())).await;

        if !res.status.is_ok() {
            return GetPathResponse {
                status: res
                    .status
                    .downstream(&format!("error stating ref {}", reference)),
                path: String::new(),
            };
        }

        match res.info {
            Some(info) => GetPathResponse {
                status: res.status,
                path: info.path,
            },
            None => GetPathResponse {
                status: Status::internal(format!("stat of {} carried no info", reference)),
                path: String::new(),
            },
        }
    }
}
