use axum::extract::{Json, State};

use common::storage::{GetPathRequest, GetPathResponse};

use crate::http_server::CurrentUser;
use crate::state::ServiceState;

pub async fn handler(
    State(state): State<ServiceState>,
    CurrentUser(user): CurrentUser,
    Json(req): Json<GetPathRequest>,
) -> Json<GetPathResponse> {
    Json(state.gateway().get_path(&user, req).await)
}
