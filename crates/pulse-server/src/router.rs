//! Axum router wiring.

use axum::{routing::get, Router};

use crate::{api, app_state::AppState, ops};

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(api::home))
        .route("/api/data", get(api::data))
        .route("/api/users", get(api::users))
        .route("/api/health", get(api::health))
        .route("/metrics", get(ops::metrics))
        .with_state(state)
}
