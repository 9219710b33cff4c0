use axum::extract::{Json, State};

use common::storage::{
    SetArbitraryMetadataRequest, SetArbitraryMetadataResponse, UnsetArbitraryMetadataRequest,
    UnsetArbitraryMetadataResponse,
};

use crate::http_server::CurrentUser;
use crate::state::ServiceState;

pub async fn set_handler(
    State(state): State<ServiceState>,
    CurrentUser(user): CurrentUser,
    Json(req): Json<SetArbitraryMetadataRequest>,
) -> Json<SetArbitraryMetadataResponse> {
    Json(state.gateway().set_arbitrary_metadata(&user, req).await)
}

pub async fn unset_handler(
    State(state): State<ServiceState>,
    CurrentUser(user): CurrentUser,
    Json(req): Json<UnsetArbitraryMetadataRequest>,
) -> Json<UnsetArbitraryMetadataResponse> {
    Json(state.gateway().unset_arbitrary_metadata(&user, req).await)
}
