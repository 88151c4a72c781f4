use axum::{extract::State, response::Json};
use serde_json::{json, Value};
use std::sync::Arc;

use crate::utils::logging::*;
use crate::AppState;

pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<Value> {
    log_health_check();

    let store = state.token_manager.store();
    let store_status = match store.health_check().await {
        Ok(_) => "connected",
        Err(e) => {
            log_warning(&format!("⚠️ Token store indisponível: {}", e));
            "disconnected"
        }
    };

    let missing = state.settings.hubspot.missing_credentials();
    let status = if store_status == "connected" { "healthy" } else { "degraded" };

    Json(json!({
        "status": status,
        "service": "hubspot-oauth-middleware",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "store": {
            "backend": store.backend_name(),
            "status": store_status
        },
        "hubspot": {
            "configured": missing.is_empty(),
            "missing": missing
        }
    }))
}
