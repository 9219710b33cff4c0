use axum::extract::{Json, State};

use common::storage::{GetQuotaRequest, GetQuotaResponse};

use crate::http_server::CurrentUser;
use crate::state::ServiceState;

pub async fn handler(
    State(state): State<ServiceState>,
    CurrentUser(user): CurrentUser,
    Json(req): Json<GetQuotaRequest>,
) -> Json<GetQuotaResponse> {
    Json(state.gateway().get_quota(&user, req).await)
}
