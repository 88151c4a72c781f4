//! OAuth2 HTTP Client
//!
//! Cliente HTTP para o endpoint de token do HubSpot (`/oauth/v1/token`)

use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::OAuth2Config;
use crate::utils::logging::*;
use crate::utils::{http_failure_details, mask_token, truncate_safe, AppError, AppResult};

/// Resposta do endpoint de token
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub expires_in: Option<u64>,
    #[serde(default)]
    pub token_type: Option<String>,
}

/// Cliente OAuth2 para o HubSpot
#[derive(Clone)]
pub struct OAuth2Client {
    config: OAuth2Config,
    http_client: Client,
}

impl OAuth2Client {
    pub fn new(config: OAuth2Config, http_client: Client) -> Self {
        Self { config, http_client }
    }

    /// Trocar authorization code por access/refresh token
    ///
    /// # Retorno
    /// - `Ok(TokenResponse)`: Tokens obtidos
    /// - `Err(AppError::Provider)`: "Failed to get access token" com os detalhes da falha
    pub async fn exchange_code_for_token(&self, code: &str) -> AppResult<TokenResponse> {
        log_info(&format!(
            "🔐 [OAuth2] Trocando authorization code por access token (code: {}...)",
            truncate_safe(code, 6)
        ));

        let params = [
            ("grant_type", "authorization_code"),
            ("client_id", self.config.client_id.as_str()),
            ("client_secret", self.config.client_secret.as_str()),
            ("redirect_uri", self.config.redirect_uri.as_str()),
            ("code", code),
        ];

        self.request_token(&params, "Failed to get access token").await
    }

    /// Obter novo access token a partir do refresh token
    ///
    /// # Retorno
    /// - `Ok(TokenResponse)`: Novo access token (refresh token pode vir rotacionado)
    /// - `Err(AppError::Provider)`: "Failed to refresh access token" com os detalhes da falha
    pub async fn refresh_token(&self, refresh_token: &str) -> AppResult<TokenResponse> {
        log_info(&format!(
            "🔄 [OAuth2] Renovando access token (refresh: {})",
            mask_token(refresh_token)
        ));

        let params = [
            ("grant_type", "refresh_token"),
            ("client_id", self.config.client_id.as_str()),
            ("client_secret", self.config.client_secret.as_str()),
            ("refresh_token", refresh_token),
        ];

        self.request_token(&params, "Failed to refresh access token").await
    }

    async fn request_token(&self, params: &[(&str, &str)], failure: &str) -> AppResult<TokenResponse> {
        let url = self.config.token_url.as_str();

        let response = self
            .http_client
            .post(url)
            .form(params)
            .send()
            .await
            .map_err(|e| {
                log_hubspot_api_error(url, None, &e.to_string());
                AppError::provider(failure, format!("Falha ao conectar com HubSpot OAuth API: {}", e))
            })?;

        let status = response.status();

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            log_hubspot_api_error(url, Some(status.as_u16()), &error_text);
            return Err(AppError::provider(
                failure,
                http_failure_details(status, url, &error_text),
            ));
        }

        let token_response: TokenResponse = response.json().await.map_err(|e| {
            log_error(&format!("❌ [OAuth2] Resposta de token inválida: {}", e));
            AppError::provider(failure, format!("Falha ao parsear resposta do token: {}", e))
        })?;

        log_info(&format!(
            "✅ [OAuth2] Access token obtido: {} (expires_in: {:?})",
            mask_token(&token_response.access_token),
            token_response.expires_in
        ));

        Ok(token_response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use serde_json::json;

    fn client_for(server: &MockServer) -> OAuth2Client {
        let config = OAuth2Config {
            client_id: "test_id".to_string(),
            client_secret: "test_secret".to_string(),
            redirect_uri: "http://localhost:8000/hubspot/oauth2callback".to_string(),
            authorize_url: "https://app.hubspot.com/oauth/authorize".to_string(),
            token_url: server.url("/oauth/v1/token"),
        };
        OAuth2Client::new(config, Client::new())
    }

    #[tokio::test]
    async fn test_exchange_code_sends_form() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/oauth/v1/token")
                    .x_www_form_urlencoded_tuple("grant_type", "authorization_code")
                    .x_www_form_urlencoded_tuple("client_id", "test_id")
                    .x_www_form_urlencoded_tuple("client_secret", "test_secret")
                    .x_www_form_urlencoded_tuple("redirect_uri", "http://localhost:8000/hubspot/oauth2callback")
                    .x_www_form_urlencoded_tuple("code", "the-code");
                then.status(200).json_body(json!({
                    "access_token": "A",
                    "refresh_token": "R",
                    "expires_in": 1800,
                    "token_type": "bearer"
                }));
            })
            .await;

        let tokens = client_for(&server).exchange_code_for_token("the-code").await.unwrap();

        mock.assert_async().await;
        assert_eq!(tokens.access_token, "A");
        assert_eq!(tokens.refresh_token.as_deref(), Some("R"));
        assert_eq!(tokens.expires_in, Some(1800));
    }

    #[tokio::test]
    async fn test_refresh_sends_refresh_grant() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/oauth/v1/token")
                    .x_www_form_urlencoded_tuple("grant_type", "refresh_token")
                    .x_www_form_urlencoded_tuple("refresh_token", "R");
                then.status(200)
                    .json_body(json!({"access_token": "A2", "expires_in": 1800}));
            })
            .await;

        let tokens = client_for(&server).refresh_token("R").await.unwrap();

        mock.assert_async().await;
        assert_eq!(tokens.access_token, "A2");
        assert_eq!(tokens.refresh_token, None);
    }

    #[tokio::test]
    async fn test_non_2xx_is_provider_error() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/oauth/v1/token");
                then.status(400).json_body(json!({"status": "BAD_AUTH_CODE"}));
            })
            .await;

        let err = client_for(&server).exchange_code_for_token("bad").await.unwrap_err();

        match err {
            AppError::Provider { error, details } => {
                assert_eq!(error, "Failed to get access token");
                assert!(details.starts_with("400 Bad Request"));
                assert!(details.contains("BAD_AUTH_CODE"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_body_without_access_token_is_provider_error() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/oauth/v1/token");
                then.status(200).json_body(json!({"unexpected": true}));
            })
            .await;

        let err = client_for(&server).refresh_token("R").await.unwrap_err();
        assert!(matches!(err, AppError::Provider { ref error, .. } if error == "Failed to refresh access token"));
    }
}
