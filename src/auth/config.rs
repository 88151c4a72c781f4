//! OAuth2 Configuration
//!
//! Centraliza as configurações OAuth2 do HubSpot

use serde::{Deserialize, Serialize};

use crate::config::HubSpotSettings;

/// Escopos solicitados na tela de consentimento (já codificados para a URL)
pub const HUBSPOT_SCOPES: &str = "crm.objects.contacts.read%20crm.objects.contacts.write%20crm.objects.companies.read%20crm.objects.deals.read%20oauth";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OAuth2Config {
    /// Client ID do app HubSpot
    pub client_id: String,

    /// Client Secret do app HubSpot (também assina o `state`)
    pub client_secret: String,

    /// URL de callback registrada no app HubSpot
    pub redirect_uri: String,

    /// Página de consentimento
    pub authorize_url: String,

    /// Endpoint de troca/refresh de token
    pub token_url: String,
}

impl OAuth2Config {
    pub fn from_settings(settings: &HubSpotSettings) -> Self {
        Self {
            client_id: settings.client_id.clone(),
            client_secret: settings.client_secret.clone(),
            redirect_uri: settings.redirect_uri.clone(),
            authorize_url: settings.authorize_url.clone(),
            token_url: format!("{}/oauth/v1/token", settings.api_base_url.trim_end_matches('/')),
        }
    }

    /// Gerar URL de autorização do HubSpot
    ///
    /// `client_id` e `redirect_uri` entram sem re-codificação, como registrados no app.
    pub fn authorization_url(&self, state: Option<&str>) -> String {
        let mut url = format!(
            "{}?client_id={}&redirect_uri={}&scope={}",
            self.authorize_url, self.client_id, self.redirect_uri, HUBSPOT_SCOPES
        );

        if let Some(state) = state {
            url.push_str("&state=");
            url.push_str(&urlencoding::encode(state));
        }

        url
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> OAuth2Config {
        OAuth2Config {
            client_id: "test_client_id".to_string(),
            client_secret: "test_secret".to_string(),
            redirect_uri: "http://localhost:8000/hubspot/oauth2callback".to_string(),
            authorize_url: "https://app.hubspot.com/oauth/authorize".to_string(),
            token_url: "https://api.hubapi.com/oauth/v1/token".to_string(),
        }
    }

    #[test]
    fn test_authorization_url() {
        let url = test_config().authorization_url(None);

        assert!(url.starts_with("https://app.hubspot.com/oauth/authorize?"));
        assert!(url.contains("client_id=test_client_id"));
        assert!(url.contains("redirect_uri=http://localhost:8000/hubspot/oauth2callback"));
        assert!(url.contains(&format!("scope={}", HUBSPOT_SCOPES)));
        assert!(!url.contains("state="));
    }

    #[test]
    fn test_authorization_url_with_state() {
        let url = test_config().authorization_url(Some("abc.def"));
        assert!(url.ends_with("&state=abc.def"));
    }

    #[test]
    fn test_scopes_not_empty() {
        assert!(!HUBSPOT_SCOPES.is_empty());
        assert!(HUBSPOT_SCOPES.contains("crm.objects.contacts.read"));
    }

    #[test]
    fn test_from_settings_builds_token_url() {
        let settings = HubSpotSettings {
            client_id: "id".to_string(),
            client_secret: "secret".to_string(),
            redirect_uri: "http://cb".to_string(),
            authorize_url: "https://app.hubspot.com/oauth/authorize".to_string(),
            api_base_url: "http://127.0.0.1:5000/".to_string(),
        };

        let config = OAuth2Config::from_settings(&settings);
        assert_eq!(config.token_url, "http://127.0.0.1:5000/oauth/v1/token");
        assert_eq!(config.client_id, "id");
    }
}
