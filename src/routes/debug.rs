use axum::Json;
use serde_json::{json, Value};

/// GET /debug/health - liveness check
/// The service keeps no state, so there is nothing deeper to probe;
/// collaborator outages surface as degraded routes, not as unhealth.
pub async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
