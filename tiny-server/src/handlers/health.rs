use axum::{Json, extract::State};
use serde_json::{Value, json};
use tracing::debug;

use tiny_core::{TargetFormat, svg::SVG_MIME};

use crate::AppState;

pub async fn ping_handler() -> Json<Value> {
    debug!("Ping endpoint called");
    Json(json!({
        "status": "ok",
        "message": "Tiny tools server is running",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// There are no backing services to probe, so health reports the
/// converter wiring and the effective upload limit.
pub async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "version": env!("CARGO_PKG_VERSION"),
        "checks": {
            "codec": {
                "status": "healthy",
                "embedded": TargetFormat::Png.mime_type(),
                "document": SVG_MIME,
            },
            "upload_limit_bytes": state.config().upload.max_bytes,
        }
    }))
}
