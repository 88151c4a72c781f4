use tracing::{debug, error, info, warn};

use super::string_utils::mask_token;

pub fn log_request_received(endpoint: &str, method: &str) {
    info!("Request received: {} {}", method, endpoint);
}

pub fn log_hubspot_api_error(endpoint: &str, status: Option<u16>, error: &str) {
    error!("HubSpot API error: {} - Status: {:?} - Error: {}", endpoint, status, error);
}

pub fn log_tokens_stored(tenant: &str, access_token: &str, ttl_seconds: Option<u64>) {
    info!(
        "💾 [TokenManager] Tokens salvos para tenant '{}' (access: {}, ttl: {:?}s)",
        tenant,
        mask_token(access_token),
        ttl_seconds
    );
}

pub fn log_config_loaded(env: &str) {
    info!("Configuration loaded successfully for environment: {}", env);
}

pub fn log_server_startup(port: u16) {
    info!("🚀 HubSpot OAuth middleware server starting on port {}", port);
}

pub fn log_server_ready(addr: &str) {
    info!("✅ Server ready and listening on http://{}", addr);
}

pub fn log_health_check() {
    debug!("Health check requested");
}

pub fn log_info(message: &str) {
    info!("{}", message);
}

pub fn log_error(message: &str) {
    error!("{}", message);
}

pub fn log_warning(message: &str) {
    warn!("{}", message);
}
