use axum::extract::{Json, State};

use common::storage::{ListContainerRequest, ListContainerResponse};

use crate::http_server::CurrentUser;
use crate::state::ServiceState;

pub async fn handler(
    State(state): State<ServiceState>,
    CurrentUser(user): CurrentUser,
    Json(req): Json<ListContainerRequest>,
) -> Json<ListContainerResponse> {
    Json(state.gateway().list_container(&user, req).await)
}

pub async fn stream_handler(
    State(state): State<ServiceState>,
    CurrentUser(user): CurrentUser,
    Json(req): Json<ListContainerRequest>,
) -> Json<ListContainerResponse> {
    Json(state.gateway().list_container_stream(&user, req).await)
}
