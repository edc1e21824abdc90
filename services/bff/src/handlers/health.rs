use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use serde_json::{Value, json};

use crate::state::AppState;

// ── GET / ────────────────────────────────────────────────────────────────────

pub async fn root() -> Json<Value> {
    Json(json!({ "ok": true, "name": "Pokedex BFF" }))
}

// ── GET /healthz ─────────────────────────────────────────────────────────────

/// Liveness only; does not touch the database.
pub async fn healthz() -> StatusCode {
    StatusCode::OK
}

// ── GET /readyz ──────────────────────────────────────────────────────────────

pub async fn readyz(State(state): State<AppState>) -> StatusCode {
    match state.db.ping().await {
        Ok(()) => StatusCode::OK,
        Err(e) => {
            tracing::warn!(error = %e, "database ping failed");
            StatusCode::SERVICE_UNAVAILABLE
        }
    }
}
