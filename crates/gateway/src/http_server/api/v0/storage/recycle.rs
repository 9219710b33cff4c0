use axum::extract::{Json, State};

use common::storage::{
    ListRecycleRequest, ListRecycleResponse, PurgeRecycleRequest, PurgeRecycleResponse,
    RestoreRecycleItemRequest, RestoreRecycleItemResponse,
};

use crate::http_server::CurrentUser;
use crate::state::ServiceState;

pub async fn list_handler(
    State(state): State<ServiceState>,
    CurrentUser(user): CurrentUser,
    Json(req): Json<ListRecycleRequest>,
) -> Json<ListRecycleResponse> {
    Json(state.gateway().list_recycle(&user, req).await)
}

pub async fn stream_handler(
    State(state): State<ServiceState>,
    CurrentUser(user): CurrentUser,
    Json(req): Json<ListRecycleRequest>,
) -> Json<ListRecycleResponse> {
    Json(state.gateway().list_recycle_stream(&user, req).await)
}

pub async fn restore_handler(
    State(state): State<ServiceState>,
    CurrentUser(user): CurrentUser,
    Json(req): Json<RestoreRecycleItemRequest>,
) -> Json<RestoreRecycleItemResponse> {
    Json(state.gateway().restore_recycle_item(&user, req).await)
}

pub async fn purge_handler(
    State(state): State<ServiceState>,
    CurrentUser(user): CurrentUser,
    Json(req): Json<PurgeRecycleRequest>,
) -> Json<PurgeRecycleResponse> {
    Json(state.gateway().purge_recycle(&user, req).await)
}
