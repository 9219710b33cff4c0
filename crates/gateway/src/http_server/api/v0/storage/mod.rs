//! The public storage RPC surface, exposed as JSON-over-POST.
//!
//! Handlers are thin: they extract the user, hand the request to the
//! gateway core and return its response. Every response is HTTP 200
//! with the structured status inside the body; transport-level errors
//! only occur for malformed requests or a missing user header.

use axum::routing::post;
use axum::Router;

pub mod create_container;
pub mod delete;
pub mod download;
pub mod get_path;
pub mod home;
pub mod list_container;
pub mod metadata;
pub mod mv;
pub mod quota;
pub mod recycle;
pub mod stat;
pub mod upload;
pub mod versions;

use crate::state::ServiceState;

pub fn router(state: ServiceState) -> Router<ServiceState> {
    Router::new()
        .route("/create_home", post(home::create_home_handler))
        .route("/get_home", post(home::get_home_handler))
        .route("/stat", post(stat::handler))
        .route("/list_container", post(list_container::handler))
        .route("/list_container_stream", post(list_container::stream_handler))
        .route("/create_container", post(create_container::handler))
        .route("/delete", post(delete::handler))
        .route("/move", post(mv::handler))
        .route("/initiate_file_download", post(download::handler))
        .route("/initiate_file_upload", post(upload::handler))
        .route("/get_path", post(get_path::handler))
        .route("/set_arbitrary_metadata", post(metadata::set_handler))
        .route("/unset_arbitrary_metadata", post(metadata::unset_handler))
        .route("/list_file_versions", post(versions::list_handler))
        .route("/restore_file_version", post(versions::restore_handler))
        .route("/list_recycle", post(recycle::list_handler))
        .route("/list_recycle_stream", post(recycle::stream_handler))
        .route("/restore_recycle_item", post(recycle::restore_handler))
        .route("/purge_recycle", post(recycle::purge_handler))
        .route("/get_quota", post(quota::handler))
        .with_state(state)
}
