use axum::extract::{Json, State};

use common::storage::{CreateContainerRequest, CreateContainerResponse};

use crate::http_server::CurrentUser;
use crate::state::ServiceState;

pub async fn handler(
    State(state): State<ServiceState>,
    CurrentUser(user): CurrentUser,
    Json(req): Json<CreateContainerRequest>,
) -> Json<CreateContainerResponse> {
    Json(state.gateway().create_container(&user, req).await)
}
