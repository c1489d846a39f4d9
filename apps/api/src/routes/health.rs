use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::state::AppState;

/// GET /health
/// Returns service status, whether a database backend is configured, and whether
/// the content mirrors are currently kept live by the change feed.
pub async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    let backend = if state.backend.is_available() {
        "configured"
    } else {
        "fallback"
    };
    let realtime = if state.hub.is_connected() {
        "connected"
    } else {
        "disconnected"
    };
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "service": "folio",
        "backend": backend,
        "realtime": realtime,
    }))
}
