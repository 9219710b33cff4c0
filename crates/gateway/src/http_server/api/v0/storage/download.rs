use axum::extract::{Json, State};

use common::storage::{InitiateFileDownloadRequest, InitiateFileDownloadResponse};

use crate::http_server::CurrentUser;
use crate::state::ServiceState;

pub async fn handler(
    State(state): State<ServiceState>,
    CurrentUser(user): CurrentUser,
    Json(req): Json<InitiateFileDownloadRequest>,
) -> Json<InitiateFileDownloadResponse> {
    Json(state.gateway().initiate_file_download(&user, req).await)
}
