use axum::extract::{Json, State};

use common::storage::{MoveRequest, MoveResponse};

use crate::http_server::CurrentUser;
use crate::state::ServiceState;

pub async fn handler(
    State(state): State<ServiceState>,
    CurrentUser(user): CurrentUser,
    Json(req): Json<MoveRequest>,
) -> Json<MoveResponse> {
    Json(state.gateway().mv(&user, req).await)
}
