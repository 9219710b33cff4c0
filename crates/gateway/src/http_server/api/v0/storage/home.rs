use axum::extract::{Json, State};

use common::storage::{CreateHomeRequest, CreateHomeResponse, GetHomeRequest, GetHomeResponse};

use crate::http_server::CurrentUser;
use crate::state::ServiceState;

pub async fn create_home_handler(
    State(state): State<ServiceState>,
    CurrentUser(user): CurrentUser,
    Json(req): Json<CreateHomeRequest>,
) -> Json<CreateHomeResponse> {
    Json(state.gateway().create_home(&user, req).await)
}

pub async fn get_home_handler(
    State(state): State<ServiceState>,
    CurrentUser(user): CurrentUser,
    Json(req): Json<GetHomeRequest>,
) -> Json<GetHomeResponse> {
    Json(state.gateway().get_home(&user, req).await)
}
