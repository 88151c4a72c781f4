// Biblioteca do middleware HubSpot OAuth2
// Expõe módulos para uso em testes e no binário

use std::sync::Arc;

pub mod auth;
pub mod config;
pub mod handlers;
pub mod models;
pub mod services;
pub mod store;
pub mod utils;

// AppState é definido aqui para ser compartilhado
#[derive(Clone)]
pub struct AppState {
    pub settings: config::Settings,
    pub oauth_config: auth::OAuth2Config,
    pub token_manager: Arc<auth::TokenManager>,
    pub hubspot: services::HubSpotClient,
}

impl AppState {
    /// Monta o estado a partir das configurações e do store escolhido
    pub fn new(settings: config::Settings, store: Arc<dyn store::KeyValueStore>) -> Self {
        let http_client = reqwest::Client::new();
        let oauth_config = auth::OAuth2Config::from_settings(&settings.hubspot);
        let oauth_client = auth::OAuth2Client::new(oauth_config.clone(), http_client.clone());
        let hubspot = services::HubSpotClient::new(http_client, &settings.hubspot.api_base_url);

        Self {
            token_manager: Arc::new(auth::TokenManager::new(oauth_client, store)),
            oauth_config,
            hubspot,
            settings,
        }
    }
}
