//! Operational HTTP endpoints.
//!
//! - `/metrics` : Prometheus text format

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};

use crate::app_state::AppState;

pub async fn metrics(State(state): State<AppState>) -> Response {
    let out = state.registry().render();

    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, out.content_type)],
        out.body,
    )
        .into_response()
}
