//! Client for a single storage provider.
//!
//! Providers expose the same filesystem RPC surface as the gateway,
//! minus the share semantics. The gateway talks JSON-over-POST to
//! `/api/v0/storage/<op>` on the provider's address.

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue};
use serde::de::DeserializeOwned;
use serde::Serialize;
use url::Url;

use common::storage::{
    CreateContainerRequest, CreateContainerResponse, CreateHomeRequest, CreateHomeResponse,
    DeleteRequest, DeleteResponse, InitiateFileDownloadRequest, InitiateFileUploadRequest,
    ListContainerRequest, ListContainerResponse, ListFileVersionsRequest,
    ListFileVersionsResponse, ListRecycleRequest, ListRecycleResponse, MoveRequest, MoveResponse,
    ProviderDownloadResponse, ProviderUploadResponse, PurgeRecycleRequest, PurgeRecycleResponse,
    RestoreFileVersionRequest, RestoreFileVersionResponse, RestoreRecycleItemRequest,
    RestoreRecycleItemResponse, SetArbitraryMetadataRequest, SetArbitraryMetadataResponse,
    StatRequest, StatResponse, UnsetArbitraryMetadataRequest, UnsetArbitraryMetadataResponse,
};

#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("provider transport error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("provider URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),
    #[error("provider HTTP status {0}: {1}")]
    HttpStatus(reqwest::StatusCode, String),
}

/// The storage operations a provider answers. One implementation talks
/// HTTP to a real provider; tests substitute in-process fakes.
#[async_trait]
pub trait StorageProviderClient: Send + Sync + 'static {
    async fn create_home(&self, req: &CreateHomeRequest) -> Result<CreateHomeResponse, ProviderError>;
    async fn stat(&self, req: &StatRequest) -> Result<StatResponse, ProviderError>;
    async fn list_container(
        &self,
        req: &ListContainerRequest,
    ) -> Result<ListContainerResponse, ProviderError>;
    async fn create_container(
        &self,
        req: &CreateContainerRequest,
    ) -> Result<CreateContainerResponse, ProviderError>;
    async fn delete(&self, req: &DeleteRequest) -> Result<DeleteResponse, ProviderError>;
    async fn mv(&self, req: &MoveRequest) -> Result<MoveResponse, ProviderError>;
    async fn initiate_file_download(
        &self,
        req: &InitiateFileDownloadRequest,
    ) -> Result<ProviderDownloadResponse, ProviderError>;
    async fn initiate_file_upload(
        &self,
        req: &InitiateFileUploadRequest,
    ) -> Result<ProviderUploadResponse, ProviderError>;
    async fn set_arbitrary_metadata(
        &self,
        req: &SetArbitraryMetadataRequest,
    ) -> Result<SetArbitraryMetadataResponse, ProviderError>;
    async fn unset_arbitrary_metadata(
        &self,
        req: &UnsetArbitraryMetadataRequest,
    ) -> Result<UnsetArbitraryMetadataResponse, ProviderError>;
    async fn list_file_versions(
        &self,
        req: &ListFileVersionsRequest,
    ) -> Result<ListFileVersionsResponse, ProviderError>;
    async fn restore_file_version(
        &self,
        req: &RestoreFileVersionRequest,
    ) -> Result<RestoreFileVersionResponse, ProviderError>;
    async fn list_recycle(
        &self,
        req: &ListRecycleRequest,
    ) -> Result<ListRecycleResponse, ProviderError>;
    async fn restore_recycle_item(
        &self,
        req: &RestoreRecycleItemRequest,
    ) -> Result<RestoreRecycleItemResponse, ProviderError>;
    async fn purge_recycle(
        &self,
        req: &PurgeRecycleRequest,
    ) -> Result<PurgeRecycleResponse, ProviderError>;
}

/// HTTP client for one provider address. Cheap to share: reqwest
/// clients are concurrency-safe.
#[derive(Debug, Clone)]
pub struct HttpProviderClient {
    base: Url,
    client: reqwest::Client,
}

impl HttpProviderClient {
    pub fn new(base: Url) -> Result<Self, ProviderError> {
        let mut default_headers = HeaderMap::new();
        default_headers.insert("Content-Type", HeaderValue::from_static("application/json"));
        let client = reqwest::Client::builder()
            .default_headers(default_headers)
            .build()?;

        Ok(Self { base, client })
    }

    async fn call<Req, Res>(&self, op: &str, req: &Req) -> Result<Res, ProviderError>
    where
        Req: Serialize + Sync,
        Res: DeserializeOwned,
    {
        let url = self.base.join(&format!("/api/v0/storage/{}", op))?;
        let response = self.client.post(url).json(req).send().await?;

        if response.status().is_success() {
            Ok(response.json::<Res>().await?)
        } else {
            Err(ProviderError::HttpStatus(
                response.status(),
                response.text().await?,
            ))
        }
    }
}

#[async_trait]
impl StorageProviderClient for HttpProviderClient {
    async fn create_home(&self, req: &CreateHomeRequest) -> Result<CreateHomeResponse, ProviderError> {
        self.call("create_home", req).await
    }

    async fn stat(&self, req: &StatRequest) -> Result<StatResponse, ProviderError> {
        self.call("stat", req).await
    }

    async fn list_container(
        &self,
        req: &ListContainerRequest,
    ) -> Result<ListContainerResponse, ProviderError> {
        self.call("list_container", req).await
    }

    async fn create_container(
        &self,
        req: &CreateContainerRequest,
    ) -> Result<CreateContainerResponse, ProviderError> {
        self.call("create_container", req).await
    }

    async fn delete(&self, req: &DeleteRequest) -> Result<DeleteResponse, ProviderError> {
        self.call("delete", req).await
    }

    async fn mv(&self, req: &MoveRequest) -> Result<MoveResponse, ProviderError> {
        self.call("move", req).await
    }

    async fn initiate_file_download(
        &self,
        req: &InitiateFileDownloadRequest,
    ) -> Result<ProviderDownloadResponse, ProviderError> {
        self.call("initiate_file_download", req).await
    }

    async fn initiate_file_upload(
        &self,
        req: &InitiateFileUploadRequest,
    ) -> Result<ProviderUploadResponse, ProviderError> {
        self.call("initiate_file_upload", req).await
    }

    async fn set_arbitrary_metadata(
        &self,
        req: &SetArbitraryMetadataRequest,
    ) -> Result<SetArbitraryMetadataResponse, ProviderError> {
        self.call("set_arbitrary_metadata", req).await
    }

    async fn unset_arbitrary_metadata(
        &self,
        req: &UnsetArbitraryMetadataRequest,
    ) -> Result<UnsetArbitraryMetadataResponse, ProviderError> {
        self.call("unset_arbitrary_metadata", req).await
    }

    async fn list_file_versions(
        &self,
        req: &ListFileVersionsRequest,
    ) -> Result<ListFileVersionsResponse, ProviderError> {
        self.call("list_file_versions", req).await
    }

    async fn restore_file_version(
        &self,
        req: &RestoreFileVersionRequest,
    ) -> Result<RestoreFileVersionResponse, ProviderError> {
        self.call("restore_file_version", req).await
    }

    async fn list_recycle(
        &self,
        req: &ListRecycleRequest,
    ) -> Result<ListRecycleResponse, ProviderError> {
        self.call("list_recycle", req).await
    }

    async fn restore_recycle_item(
        &self,
        req: &RestoreRecycleItemRequest,
    ) -> Result<RestoreRecycleItemResponse, ProviderError> {
        self.call("restore_recycle_item", req).await
    }

    async fn purge_recycle(
        &self,
        req: &PurgeRecycleRequest,
    ) -> Result<PurgeRecycleResponse, ProviderError> {
        self.call("purge_recycle", req).await
    }
}
