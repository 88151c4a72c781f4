// Handlers HTTP e montagem do router
pub mod health;
pub mod items;

pub use health::*;
pub use items::*;

use axum::{http::HeaderValue, routing::get, Router};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::auth::{authorize, oauth2_callback};
use crate::utils::logging::log_warning;
use crate::AppState;

pub fn create_router(state: Arc<AppState>) -> Router {
    let cors = cors_layer(&state.settings.server.allowed_origins);

    Router::new()
        .route("/health", get(health_check))
        .route("/hubspot/authorize", get(authorize))
        .route("/hubspot/oauth2callback", get(oauth2_callback))
        .route("/hubspot/items", get(get_items))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                log_warning(&format!("⚠️ Origem CORS inválida ignorada: {}", origin));
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([axum::http::Method::GET])
        .allow_headers(Any)
}
