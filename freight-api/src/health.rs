use axum::{extract::State, routing::get, Json, Router};
use serde_json::{json, Value};

use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/healthy", get(healthy))
        .route("/healthy/status", get(status))
}

async fn healthy() -> &'static str {
    "ok"
}

async fn status(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": state.service.name,
        "version": state.service.version,
        "environment": state.service.environment.to_string(),
    }))
}
