use axum::extract::{Json, State};

use common::storage::{StatRequest, StatResponse};

use crate::http_server::CurrentUser;
use crate::state::ServiceState;

pub async fn handler(
    State(state): State<ServiceState>,
    CurrentUser(user): CurrentUser,
    Json(req): Json<StatRequest>,
) -> Json<StatResponse> {
    Json(state.gateway().stat(&user, req).await)
}
