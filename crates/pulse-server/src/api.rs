//! Simulated business endpoints.
//!
//! Each handler records `http_requests_total` for its outcome; `/api/data`
//! and `/api/users` also observe their duration. Instrumentation errors are
//! programming errors and surface as `500` with the error code.

use std::time::{Instant, SystemTime, UNIX_EPOCH};

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use pulse_core::error::PulseError;

use crate::app_state::AppState;
use crate::simulate;

/// Handler error: logged, then rendered as a JSON `500`.
pub struct ApiError(PulseError);

impl From<PulseError> for ApiError {
    fn from(e: PulseError) -> Self {
        Self(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        tracing::warn!(error = %self.0, "instrumentation failed");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({
                "error": self.0.code().as_str(),
                "msg": self.0.to_string(),
            })),
        )
            .into_response()
    }
}

type ApiResult = Result<Response, ApiError>;

fn unix_seconds() -> f64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs_f64())
        .unwrap_or_default()
}

pub async fn home(State(state): State<AppState>) -> ApiResult {
    state.metrics().record_request("GET", "/", 200)?;
    Ok(Json(json!({
        "message": "Welcome to the monitored application!",
        "endpoints": ["/metrics", "/api/data", "/api/users", "/api/health"],
    }))
    .into_response())
}

pub async fn data(State(state): State<AppState>) -> ApiResult {
    const ENDPOINT: &str = "/api/data";
    let started = Instant::now();

    let (delay, fail) = {
        let sim = &state.cfg().simulation;
        let mut rng = rand::rng();
        (
            simulate::latency(sim, &mut rng),
            simulate::should_fail(sim, &mut rng),
        )
    };
    tokio::time::sleep(delay).await;

    let m = state.metrics();
    if fail {
        tracing::debug!(endpoint = ENDPOINT, "simulated timeout");
        m.record_error("timeout")?;
        m.record_request("GET", ENDPOINT, 500)?;
        return Ok((
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": "Timeout" })),
        )
            .into_response());
    }

    m.record_request("GET", ENDPOINT, 200)?;
    m.observe_duration("GET", ENDPOINT, started.elapsed())?;
    Ok(Json(json!({
        "data": [1, 2, 3, 4, 5],
        "timestamp": unix_seconds(),
    }))
    .into_response())
}

pub async fn users(State(state): State<AppState>) -> ApiResult {
    const ENDPOINT: &str = "/api/users";
    let started = Instant::now();

    let users = simulate::active_users(&state.cfg().simulation, &mut rand::rng());

    let m = state.metrics();
    m.active_users.set(&[], users as f64)?;
    m.record_request("GET", ENDPOINT, 200)?;
    m.observe_duration("GET", ENDPOINT, started.elapsed())?;

    let current = m.active_users.get(&[])?.unwrap_or_default();
    Ok(Json(json!({ "active_users": current })).into_response())
}

pub async fn health(State(state): State<AppState>) -> ApiResult {
    let (cpu, memory) = {
        let mut rng = rand::rng();
        (simulate::cpu_percent(&mut rng), simulate::memory_bytes(&mut rng))
    };

    let m = state.metrics();
    m.cpu_usage.set(&[], cpu)?;
    m.memory_usage.set(&[], memory as f64)?;
    m.record_request("GET", "/api/health", 200)?;

    Ok(Json(json!({
        "status": "healthy",
        "cpu_usage": m.cpu_usage.get(&[])?.unwrap_or_default(),
        "memory_usage": m.memory_usage.get(&[])?.unwrap_or_default(),
    }))
    .into_response())
}
