/**
 * Wire types for the storage RPC surface.
 *  - References and resource ids
 *  - Resource infos returned by providers
 *  - Structured statuses carried on every response
 *  - Request/response messages for every operation
 */
pub mod storage;
/**
 * User identity, carried explicitly on every gateway
 *  operation instead of being smuggled through an
 *  ambient request context.
 */
pub mod user;

pub mod prelude {
    pub use crate::storage::{Code, Reference, ResourceId, ResourceInfo, ResourceType, Status};
    pub use crate::user::{User, UserId};
}
