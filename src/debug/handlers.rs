//! Debug endpoints: `/healthz`, `/readyz`, `/config`.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::State,
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};

#[derive(Clone)]
struct DebugState {
    name: Arc<str>,
    config: Option<Arc<serde_json::Value>>,
}

pub(crate) fn router(name: &str, config: Option<serde_json::Value>) -> Router {
    let state = DebugState {
        name: name.into(),
        config: config.map(Arc::new),
    };
    Router::new()
        .route("/healthz", get(health))
        .route("/readyz", get(ready))
        .route("/config", get(config_dump))
        .with_state(state)
}

async fn health(State(state): State<DebugState>) -> Response {
    plain_ok(&state.name)
}

async fn ready(State(state): State<DebugState>) -> Response {
    plain_ok(&state.name)
}

async fn config_dump(State(state): State<DebugState>) -> Response {
    match state.config {
        Some(config) => Json(config.as_ref()).into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

fn plain_ok(name: &str) -> Response {
    let mut res = (StatusCode::OK, "OK").into_response();
    if let Ok(value) = HeaderValue::from_str(name) {
        res.headers_mut().insert(header::SERVER, value);
    }
    res
}
