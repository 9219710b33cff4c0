//! Operations with no share awareness: they route by reference and
//! forward the provider's response unchanged.

use common::prelude::*;
use common::storage::{
    GetQuotaRequest, GetQuotaResponse, ListFileVersionsRequest, ListFileVersionsResponse,
    ListRecycleRequest, ListRecycleResponse, PurgeRecycleRequest, PurgeRecycleResponse,
    RestoreFileVersionRequest, RestoreFileVersionResponse, RestoreRecycleItemRequest,
    RestoreRecycleItemResponse, SetArbitraryMetadataRequest, SetArbitraryMetadataResponse,
    UnsetArbitraryMetadataRequest, UnsetArbitraryMetadataResponse,
};

use super::Gateway;

macro_rules! forward_by_reference {
    ($self:ident, $req:ident, $method:ident, $response:ident, $op:literal) => {{
        let client = match $self.find(&$req.reference).await {
            Ok(client) => client,
            Err(e) => {
                return $response {
                    status: e.into_status(),
                    ..Default::default()
                }
            }
        };

        match client.$method(&$req).await {
            Ok(res) => res,
            Err(e) => $response {
                status: Status::internal(format!(concat!("error calling ", $op, ": {}"), e)),
                ..Default::default()
            },
        }
    }};
}

impl Gateway {
    pub async fn set_arbitrary_metadata(
        &self,
        _user: &User,
        req: SetArbitraryMetadataRequest,
    ) -> SetArbitraryMetadataResponse {
        forward_by_reference!(
            self,
            req,
            set_arbitrary_metadata,
            SetArbitraryMetadataResponse,
            "SetArbitraryMetadata"
        )
    }

    pub async fn unset_arbitrary_metadata(
        &self,
        _user: &User,
        req: UnsetArbitraryMetadataRequest,
    ) -> UnsetArbitraryMetadataResponse {
        forward_by_reference!(
            self,
            req,
            unset_arbitrary_metadata,
            UnsetArbitraryMetadataResponse,
            "UnsetArbitraryMetadata"
        )
    }

    pub async fn list_file_versions(
        &self,
        _user: &User,
        req: ListFileVersionsRequest,
    ) -> ListFileVersionsResponse {
        forward_by_reference!(
            self,
            req,
            list_file_versions,
            ListFileVersionsResponse,
            "ListFileVersions"
        )
    }

    pub async fn restore_file_version(
        &self,
        _user: &User,
        req: RestoreFileVersionRequest,
    ) -> RestoreFileVersionResponse {
        forward_by_reference!(
            self,
            req,
            restore_file_version,
            RestoreFileVersionResponse,
            "RestoreFileVersion"
        )
    }

    pub async fn list_recycle(&self, _user: &User, req: ListRecycleRequest) -> ListRecycleResponse {
        forward_by_reference!(self, req, list_recycle, ListRecycleResponse, "ListRecycle")
    }

    /// Streaming recycle listings are not supported by the gateway.
    pub async fn list_recycle_stream(
        &self,
        _user: &User,
        _req: ListRecycleRequest,
    ) -> ListRecycleResponse {
        ListRecycleResponse {
            status: Status::unimplemented("ListRecycleStream not implemented"),
            items: vec![],
        }
    }

    pub async fn restore_recycle_item(
        &self,
        _user: &User,
        req: RestoreRecycleItemRequest,
    ) -> RestoreRecycleItemResponse {
        forward_by_reference!(
            self,
            req,
            restore_recycle_item,
            RestoreRecycleItemResponse,
            "RestoreRecycleItem"
        )
    }

    pub async fn purge_recycle(
        &self,
        _user: &User,
        req: PurgeRecycleRequest,
    ) -> PurgeRecycleResponse {
        forward_by_reference!(self, req, purge_recycle, PurgeRecycleResponse, "PurgeRecycle")
    }

    pub async fn get_quota(&self, _user: &User, _req: GetQuotaRequest) -> GetQuotaResponse {
        GetQuotaResponse {
            status: Status::unimplemented("GetQuota not yet implemented"),
            total_bytes: 0,
            used_bytes: 0,
        }
    }
}
