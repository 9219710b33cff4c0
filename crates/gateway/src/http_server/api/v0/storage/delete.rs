use axum::extract::{Json, State};

use common::storage::{DeleteRequest, DeleteResponse};

use crate::http_server::CurrentUser;
use crate::state::ServiceState;

pub async fn handler(
    State(state): State<ServiceState>,
    CurrentUser(user): CurrentUser,
    Json(req): Json<DeleteRequest>,
) -> Json<DeleteResponse> {
    Json(state.gateway().delete(&user, req).await)
}
