//! Shared test harness: an in-process gateway wired to fake registry
//! and provider implementations.
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use common::prelude::*;
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
use gateway::config::Config;
use gateway::core::Gateway;
use gateway::pool::{ClientPool, PoolError};
use gateway::provider::{ProviderError, StorageProviderClient};
use gateway::registry::{ProviderInfo, RegistryError, StorageRegistry};

pub const TEST_SECRET: &str = "test-secret";
pub const DATA_GATEWAY: &str = "https://gw.example.org/datagateway";

pub fn test_config() -> Config {
    Config {
        listen_addr: "127.0.0.1:0".parse().unwrap(),
        share_folder: "MyShares".to_string(),
        data_gateway_endpoint: DATA_GATEWAY.to_string(),
        transfer_expires_seconds: 300,
        transfer_shared_secret: TEST_SECRET.to_string(),
        storage_registry_endpoint: "http://registry.internal:19000".parse().unwrap(),
        log_level: tracing::Level::INFO,
        log_dir: None,
    }
}

pub fn test_user() -> User {
    User {
        id: UserId::new("https://idp.example.org", "einstein"),
        username: "einstein".to_string(),
        mail: "einstein@example.org".to_string(),
        display_name: "Albert Einstein".to_string(),
    }
}

pub fn provider_info(address: &str, provider_path: &str) -> ProviderInfo {
    ProviderInfo {
        address: address.to_string(),
        provider_path: provider_path.to_string(),
    }
}

pub fn file_info(path: &str) -> ResourceInfo {
    ResourceInfo {
        id: ResourceId::new("storage", path),
        resource_type: ResourceType::File,
        path: path.to_string(),
        etag: "\"etag\"".to_string(),
        mime_type: "application/octet-stream".to_string(),
        ..Default::default()
    }
}

pub fn container_info(path: &str) -> ResourceInfo {
    ResourceInfo {
        id: ResourceId::new("storage", path),
        resource_type: ResourceType::Container,
        path: path.to_string(),
        mime_type: "httpd/unix-directory".to_string(),
        ..Default::default()
    }
}

pub fn reference_info(path: &str, target: &str) -> ResourceInfo {
    ResourceInfo {
        id: ResourceId::new("storage", path),
        resource_type: ResourceType::Reference,
        path: path.to_string(),
        target: Some(target.to_string()),
        ..Default::default()
    }
}

pub fn ok_stat(info: ResourceInfo) -> StatResponse {
    StatResponse {
        status: Status::ok(),
        info: Some(info),
    }
}

pub fn ok_list(infos: Vec<ResourceInfo>) -> ListContainerResponse {
    ListContainerResponse {
        status: Status::ok(),
        infos,
    }
}

/// A programmable storage provider. Responses are keyed by the display
/// form of the request's reference; every call is recorded for
/// assertions.
#[derive(Default)]
pub struct FakeProvider {
    stats: HashMap<String, StatResponse>,
    lists: HashMap<String, ListContainerResponse>,
    download: Option<ProviderDownloadResponse>,
    upload: Option<ProviderUploadResponse>,
    calls: Mutex<Vec<(String, String)>>,
}

impl FakeProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_stat(mut self, reference: Reference, res: StatResponse) -> Self {
        self.stats.insert(reference.to_string(), res);
        self
    }

    pub fn with_list(mut self, reference: Reference, res: ListContainerResponse) -> Self {
        self.lists.insert(reference.to_string(), res);
        self
    }

    pub fn with_download(mut self, res: ProviderDownloadResponse) -> Self {
        self.download = Some(res);
        self
    }

    pub fn with_upload(mut self, res: ProviderUploadResponse) -> Self {
        self.upload = Some(res);
        self
    }

    /// All `(operation, reference)` pairs this provider served, in
    /// order.
    pub fn calls(&self) -> Vec<(String, String)> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, op: &str, detail: String) {
        self.calls.lock().unwrap().push((op.to_string(), detail));
    }
}

#[async_trait]
impl StorageProviderClient for FakeProvider {
    async fn create_home(
        &self,
        _req: &CreateHomeRequest,
    ) -> Result<CreateHomeResponse, ProviderError> {
        self.record("create_home", String::new());
        Ok(CreateHomeResponse { status: Status::ok() })
    }

    async fn stat(&self, req: &StatRequest) -> Result<StatResponse, ProviderError> {
        let key = req.reference.to_string();
        self.record("stat", key.clone());
        Ok(self.stats.get(&key).cloned().unwrap_or(StatResponse {
            status: Status::not_found(format!("no such resource: {}", key)),
            info: None,
        }))
    }

    async fn list_container(
        &self,
        req: &ListContainerRequest,
    ) -> Result<ListContainerResponse, ProviderError> {
        let key = req.reference.to_string();
        self.record("list_container", key.clone());
        Ok(self
            .lists
            .get(&key)
            .cloned()
            .unwrap_or(ListContainerResponse {
                status: Status::not_found(format!("no such container: {}", key)),
                infos: vec![],
            }))
    }

    async fn create_container(
        &self,
        req: &CreateContainerRequest,
    ) -> Result<CreateContainerResponse, ProviderError> {
        self.record("create_container", req.reference.to_string());
        Ok(CreateContainerResponse { status: Status::ok() })
    }

    async fn delete(&self, req: &DeleteRequest) -> Result<DeleteResponse, ProviderError> {
        self.record("delete", req.reference.to_string());
        Ok(DeleteResponse { status: Status::ok() })
    }

    async fn mv(&self, req: &MoveRequest) -> Result<MoveResponse, ProviderError> {
        self.record(
            "move",
            format!("{} -> {}", req.source, req.destination),
        );
        Ok(MoveResponse { status: Status::ok() })
    }

    async fn initiate_file_download(
        &self,
        req: &InitiateFileDownloadRequest,
    ) -> Result<ProviderDownloadResponse, ProviderError> {
        self.record("initiate_file_download", req.reference.to_string());
        Ok(self.download.clone().unwrap_or(ProviderDownloadResponse {
            status: Status::not_found("no download configured"),
            download_endpoint: String::new(),
            expose: false,
        }))
    }

    async fn initiate_file_upload(
        &self,
        req: &InitiateFileUploadRequest,
    ) -> Result<ProviderUploadResponse, ProviderError> {
        self.record("initiate_file_upload", req.reference.to_string());
        Ok(self.upload.clone().unwrap_or(ProviderUploadResponse {
            status: Status::not_found("no upload configured"),
            upload_endpoint: String::new(),
            expose: false,
            available_checksums: vec![],
        }))
    }

    async fn set_arbitrary_metadata(
        &self,
        req: &SetArbitraryMetadataRequest,
    ) -> Result<SetArbitraryMetadataResponse, ProviderError> {
        self.record("set_arbitrary_metadata", req.reference.to_string());
        Ok(SetArbitraryMetadataResponse { status: Status::ok() })
    }

    async fn unset_arbitrary_metadata(
        &self,
        req: &UnsetArbitraryMetadataRequest,
    ) -> Result<UnsetArbitraryMetadataResponse, ProviderError> {
        self.record("unset_arbitrary_metadata", req.reference.to_string());
        Ok(UnsetArbitraryMetadataResponse { status: Status::ok() })
    }

    async fn list_file_versions(
        &self,
        req: &ListFileVersionsRequest,
    ) -> Result<ListFileVersionsResponse, ProviderError> {
        self.record("list_file_versions", req.reference.to_string());
        Ok(ListFileVersionsResponse {
            status: Status::ok(),
            versions: vec![],
        })
    }

    async fn restore_file_version(
        &self,
        req: &RestoreFileVersionRequest,
    ) -> Result<RestoreFileVersionResponse, ProviderError> {
        self.record("restore_file_version", req.reference.to_string());
        Ok(RestoreFileVersionResponse { status: Status::ok() })
    }

    async fn list_recycle(
        &self,
        req: &ListRecycleRequest,
    ) -> Result<ListRecycleResponse, ProviderError> {
        self.record("list_recycle", req.reference.to_string());
        Ok(ListRecycleResponse {
            status: Status::ok(),
            items: vec![],
        })
    }

    async fn restore_recycle_item(
        &self,
        req: &RestoreRecycleItemRequest,
    ) -> Result<RestoreRecycleItemResponse, ProviderError> {
        self.record("restore_recycle_item", req.reference.to_string());
        Ok(RestoreRecycleItemResponse { status: Status::ok() })
    }

    async fn purge_recycle(
        &self,
        req: &PurgeRecycleRequest,
    ) -> Result<PurgeRecycleResponse, ProviderError> {
        self.record("purge_recycle", req.reference.to_string());
        Ok(PurgeRecycleResponse { status: Status::ok() })
    }
}

/// Routes references the way a storage registry would: path references
/// by longest matching prefix, id references by storage id.
#[derive(Default)]
pub struct FakeRegistry {
    by_prefix: Vec<(String, ProviderInfo)>,
    by_storage: HashMap<String, ProviderInfo>,
}

impl FakeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn route_prefix(mut self, prefix: &str, provider: ProviderInfo) -> Self {
        self.by_prefix.push((prefix.to_string(), provider));
        self
    }

    pub fn route_storage(mut self, storage_id: &str, provider: ProviderInfo) -> Self {
        self.by_storage.insert(storage_id.to_string(), provider);
        self
    }
}

#[async_trait]
impl StorageRegistry for FakeRegistry {
    async fn get_storage_provider(
        &self,
        reference: &Reference,
    ) -> Result<ProviderInfo, RegistryError> {
        match reference {
            Reference::Path(p) => self
                .by_prefix
                .iter()
                .filter(|(prefix, _)| p.starts_with(prefix.as_str()))
                .max_by_key(|(prefix, _)| prefix.len())
                .map(|(_, provider)| provider.clone())
                .ok_or_else(|| RegistryError::NotFound(reference.to_string())),
            Reference::Id(id) => self
                .by_storage
                .get(&id.storage_id)
                .cloned()
                .ok_or_else(|| RegistryError::NotFound(reference.to_string())),
        }
    }
}

/// Hands out the fake provider registered for an address.
#[derive(Default)]
pub struct FakePool {
    clients: HashMap<String, Arc<FakeProvider>>,
}

impl FakePool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_client(mut self, address: &str, client: Arc<FakeProvider>) -> Self {
        self.clients.insert(address.to_string(), client);
        self
    }
}

#[async_trait]
impl ClientPool for FakePool {
    async fn client_for(
        &self,
        provider: &ProviderInfo,
    ) -> Result<Arc<dyn StorageProviderClient>, PoolError> {
        match self.clients.get(&provider.address) {
            Some(client) => Ok(client.clone() as Arc<dyn StorageProviderClient>),
            None => panic!("test pool has no client for address {}", provider.address),
        }
    }
}

pub fn build_gateway(registry: FakeRegistry, pool: FakePool) -> Gateway {
    Gateway::new(&test_config(), Arc::new(registry), Arc::new(pool))
}

pub const HOME_ADDR: &str = "http://home.internal:19000";
pub const EOS_ADDR: &str = "http://eos.internal:19000";

/// Wires a gateway over two providers: one owning `/home` (where the
/// share folder lives), one owning `/eos` plus storage id `abc`.
pub fn share_gateway(
    home: FakeProvider,
    eos: FakeProvider,
) -> (Gateway, Arc<FakeProvider>, Arc<FakeProvider>) {
    let home = Arc::new(home);
    let eos = Arc::new(eos);
    let registry = FakeRegistry::new()
        .route_prefix("/home", provider_info(HOME_ADDR, "/home"))
        .route_prefix("/eos", provider_info(EOS_ADDR, "/eos"))
        .route_storage("abc", provider_info(EOS_ADDR, "/eos"));
    let pool = FakePool::new()
        .with_client(HOME_ADDR, home.clone())
        .with_client(EOS_ADDR, eos.clone());
    (build_gateway(registry, pool), home, eos)
}
