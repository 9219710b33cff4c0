use axum::extract::{Json, State};

use common::storage::{InitiateFileUploadRequest, InitiateFileUploadResponse};

use crate::http_server::CurrentUser;
use crate::state::ServiceState;

pub async fn handler(
    State(state): State<ServiceState>,
    CurrentUser(user): CurrentUser,
    Json(req): Json<InitiateFileUploadRequest>,
) -> Json<InitiateFileUploadResponse> {
    Json(state.gateway().initiate_file_upload(&user, req).await)
}
