use axum::extract::{Json, State};

use common::storage::{
    ListFileVersionsRequest, ListFileVersionsResponse, RestoreFileVersionRequest,
    RestoreFileVersionResponse,
};

use crate::http_server::CurrentUser;
use crate::state::ServiceState;

pub async fn list_handler(
    State(state): State<ServiceState>,
    CurrentUser(user): CurrentUser,
    Json(req): Json<ListFileVersionsRequest>,
) -> Json<ListFileVersionsResponse> {
    Json(state.gateway().list_file_versions(&user, req).await)
}

pub async fn restore_handler(
    State(state): State<ServiceState>,
    CurrentUser(user): CurrentUser,
    Json(req): Json<RestoreFileVersionRequest>,
) -> Json<RestoreFileVersionResponse> {
    Json(state.gateway().restore_file_version(&user, req).await)
}
