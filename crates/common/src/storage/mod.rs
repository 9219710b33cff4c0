//! Wire types shared by the gateway, the storage registry and the
//! storage providers.
//!
//! Everything here is pure data: `serde`-serializable, no I/O. The
//! gateway and the providers exchange these messages over the RPC
//! surface; the gateway additionally rewrites `ResourceInfo` paths
//! before returning them to clients so that share targets are never
//! exposed.

mod reference;
mod requests;
mod resource;
mod status;

pub use reference::{Reference, ResourceId};
pub use requests::{
    CreateContainerRequest, CreateContainerResponse, CreateHomeRequest, CreateHomeResponse,
    DeleteRequest, DeleteResponse, FileVersion, GetHomeRequest, GetHomeResponse, GetPathRequest,
    GetPathResponse, GetQuotaRequest, GetQuotaResponse, InitiateFileDownloadRequest,
    InitiateFileDownloadResponse, InitiateFileUploadRequest, InitiateFileUploadResponse,
    ListContainerRequest, ListContainerResponse, ListFileVersionsRequest,
    ListFileVersionsResponse, ListRecycleRequest, ListRecycleResponse, MoveRequest, MoveResponse,
    ProviderDownloadResponse, ProviderUploadResponse, PurgeRecycleRequest, PurgeRecycleResponse,
    RecycleItem, RestoreFileVersionRequest, RestoreFileVersionResponse, RestoreRecycleItemRequest,
    RestoreRecycleItemResponse, SetArbitraryMetadataRequest, SetArbitraryMetadataResponse,
    StatRequest, StatResponse, UnsetArbitraryMetadataRequest, UnsetArbitraryMetadataResponse,
};
pub use resource::{ResourceInfo, ResourceType};
pub use status::{Code, Status};
