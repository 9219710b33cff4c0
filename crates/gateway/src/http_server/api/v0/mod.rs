use axum::Router;

pub mod storage;

use crate::state::ServiceState;

pub fn router(state: ServiceState) -> Router<ServiceState> {
    Router::new()
        .nest("/storage", storage::router(state.clone()))
        .with_state(state)
}
