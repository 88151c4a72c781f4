use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Settings {
    pub server: ServerSettings,
    pub hubspot: HubSpotSettings,
    pub store: StoreSettings,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    /// Origens liberadas no CORS (frontend da integração)
    #[serde(default)]
    pub allowed_origins: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct HubSpotSettings {
    pub client_id: String,
    pub client_secret: String,
    pub redirect_uri: String,
    pub authorize_url: String,
    pub api_base_url: String,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct StoreSettings {
    /// "memory" ou "redis"
    pub backend: String,
    pub redis_url: String,
    pub key_prefix: String,
}

impl HubSpotSettings {
    /// Nomes das credenciais obrigatórias que estão vazias
    pub fn missing_credentials(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.client_id.is_empty() {
            missing.push("HUBSPOT_CLIENT_ID");
        }
        if self.client_secret.is_empty() {
            missing.push("HUBSPOT_CLIENT_SECRET");
        }
        if self.redirect_uri.is_empty() {
            missing.push("HUBSPOT_REDIRECT_URI");
        }
        missing
    }
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let mut builder = Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8000)?
            .set_default("server.allowed_origins", vec!["http://localhost:3000"])?
            .set_default("hubspot.client_id", "")?
            .set_default("hubspot.client_secret", "")?
            .set_default("hubspot.redirect_uri", "")?
            .set_default("hubspot.authorize_url", "https://app.hubspot.com/oauth/authorize")?
            .set_default("hubspot.api_base_url", "https://api.hubapi.com")?
            .set_default("store.backend", "memory")?
            .set_default("store.redis_url", "redis://127.0.0.1:6379")?
            .set_default("store.key_prefix", "")?
            // Arquivo de configuração base
            .add_source(File::with_name("config/default").required(false))
            // Arquivo específico do ambiente
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            .add_source(Environment::with_prefix("HUBSPOT_MIDDLEWARE").separator("__"));

        // Variáveis "oficiais" da integração têm prioridade
        if let Ok(client_id) = std::env::var("HUBSPOT_CLIENT_ID") {
            builder = builder.set_override("hubspot.client_id", client_id)?;
        }
        if let Ok(client_secret) = std::env::var("HUBSPOT_CLIENT_SECRET") {
            builder = builder.set_override("hubspot.client_secret", client_secret)?;
        }
        if let Ok(redirect_uri) = std::env::var("HUBSPOT_REDIRECT_URI") {
            builder = builder.set_override("hubspot.redirect_uri", redirect_uri)?;
        }
        if let Ok(redis_url) = std::env::var("REDIS_URL") {
            builder = builder
                .set_override("store.redis_url", redis_url)?
                .set_override("store.backend", "redis")?;
        }
        // No Cloud Run a porta vem de PORT
        if let Some(port) = std::env::var("PORT").ok().and_then(|p| p.parse::<u16>().ok()) {
            builder = builder.set_override("server.port", port)?;
        }

        builder.build()?.try_deserialize()
    }
}
