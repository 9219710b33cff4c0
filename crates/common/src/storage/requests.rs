//! Request/response messages for every operation of the storage RPC
//! surface.
//!
//! Providers and the gateway share the same message set; the gateway
//! additionally returns a transfer token on upload/download initiation
//! while providers report the raw endpoint plus an `expose` flag.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{Reference, ResourceId, ResourceInfo, Status};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateHomeRequest {}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateHomeResponse {
    pub status: Status,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GetHomeRequest {}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GetHomeResponse {
    pub status: Status,
    pub path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatRequest {
    pub reference: Reference,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub arbitrary_metadata_keys: Vec<String>,
}

impl StatRequest {
    pub fn new(reference: Reference) -> Self {
        Self {
            reference,
            arbitrary_metadata_keys: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StatResponse {
    pub status: Status,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub info: Option<ResourceInfo>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListContainerRequest {
    pub reference: Reference,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub arbitrary_metadata_keys: Vec<String>,
}

impl ListContainerRequest {
    pub fn new(reference: Reference) -> Self {
        Self {
            reference,
            arbitrary_metadata_keys: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListContainerResponse {
    pub status: Status,
    #[serde(default)]
    pub infos: Vec<ResourceInfo>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateContainerRequest {
    pub reference: Reference,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateContainerResponse {
    pub status: Status,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteRequest {
    pub reference: Reference,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DeleteResponse {
    pub status: Status,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoveRequest {
    pub source: Reference,
    pub destination: Reference,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MoveResponse {
    pub status: Status,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InitiateFileDownloadRequest {
    pub reference: Reference,
}

/// What a storage provider reports for a download initiation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProviderDownloadResponse {
    pub status: Status,
    #[serde(default)]
    pub download_endpoint: String,
    /// When set, the client may talk to the data server directly and
    /// the gateway performs no signing.
    #[serde(default)]
    pub expose: bool,
}

/// What the gateway returns for a download initiation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InitiateFileDownloadResponse {
    pub status: Status,
    #[serde(default)]
    pub download_endpoint: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InitiateFileUploadRequest {
    pub reference: Reference,
}

/// What a storage provider reports for an upload initiation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProviderUploadResponse {
    pub status: Status,
    #[serde(default)]
    pub upload_endpoint: String,
    #[serde(default)]
    pub expose: bool,
    #[serde(default)]
    pub available_checksums: Vec<String>,
}

/// What the gateway returns for an upload initiation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InitiateFileUploadResponse {
    pub status: Status,
    #[serde(default)]
    pub upload_endpoint: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(default)]
    pub available_checksums: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GetPathRequest {
    pub resource_id: ResourceId,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GetPathResponse {
    pub status: Status,
    #[serde(default)]
    pub path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetArbitraryMetadataRequest {
    pub reference: Reference,
    pub metadata: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SetArbitraryMetadataResponse {
    pub status: Status,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnsetArbitraryMetadataRequest {
    pub reference: Reference,
    pub keys: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UnsetArbitraryMetadataResponse {
    pub status: Status,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileVersion {
    pub key: String,
    #[serde(default)]
    pub size: u64,
    /// Unix seconds.
    #[serde(default)]
    pub mtime: u64,
    #[serde(default)]
    pub etag: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListFileVersionsRequest {
    pub reference: Reference,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListFileVersionsResponse {
    pub status: Status,
    #[serde(default)]
    pub versions: Vec<FileVersion>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RestoreFileVersionRequest {
    pub reference: Reference,
    pub key: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RestoreFileVersionResponse {
    pub status: Status,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecycleItem {
    pub key: String,
    pub path: String,
    #[serde(default)]
    pub size: u64,
    /// Deletion time, unix seconds.
    #[serde(default)]
    pub deletion_ts: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListRecycleRequest {
    pub reference: Reference,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from_ts: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to_ts: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListRecycleResponse {
    pub status: Status,
    #[serde(default)]
    pub items: Vec<RecycleItem>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RestoreRecycleItemRequest {
    pub reference: Reference,
    pub key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub restore_path: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RestoreRecycleItemResponse {
    pub status: Status,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PurgeRecycleRequest {
    pub reference: Reference,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PurgeRecycleResponse {
    pub status: Status,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GetQuotaRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<Reference>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GetQuotaResponse {
    pub status: Status,
    #[serde(default)]
    pub total_bytes: u64,
    #[serde(default)]
    pub used_bytes: u64,
}
