use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;

use crate::store::StoreError;

/// Gravidade de um erro da aplicação
///
/// - `Fatal`: encerra a requisição com status HTTP de erro
/// - `Degraded`: a requisição responde 200 com um payload `{ error, details }`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Fatal,
    Degraded,
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Authorization code missing")]
    MissingAuthorizationCode,

    #[error("Invalid OAuth state: {0}")]
    InvalidState(String),

    #[error("Invalid tenant: {0}")]
    InvalidTenant(String),

    #[error("{0}")]
    ReauthorizationRequired(String),

    /// Falha ao falar com a API do HubSpot (status não-2xx, rede ou corpo inválido)
    #[error("{error}: {details}")]
    Provider { error: String, details: String },

    #[error("Failed to process response: {0}")]
    Formatting(String),

    #[error("Token store error: {0}")]
    Store(#[from] StoreError),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl AppError {
    pub fn provider(error: impl Into<String>, details: impl Into<String>) -> Self {
        Self::Provider {
            error: error.into(),
            details: details.into(),
        }
    }

    pub fn reauthorize(msg: impl Into<String>) -> Self {
        Self::ReauthorizationRequired(msg.into())
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            AppError::Provider { .. } | AppError::Formatting(_) => ErrorSeverity::Degraded,
            _ => ErrorSeverity::Fatal,
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::MissingAuthorizationCode => StatusCode::BAD_REQUEST,
            AppError::InvalidState(_) => StatusCode::BAD_REQUEST,
            AppError::InvalidTenant(_) => StatusCode::BAD_REQUEST,
            AppError::ReauthorizationRequired(_) => StatusCode::UNAUTHORIZED,
            AppError::Provider { .. } | AppError::Formatting(_) => StatusCode::OK,
            AppError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::ConfigError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let body = match (self.severity(), self) {
            (ErrorSeverity::Degraded, AppError::Provider { error, details }) => json!({
                "error": error,
                "details": details
            }),
            (ErrorSeverity::Degraded, AppError::Formatting(details)) => json!({
                "error": "Failed to process response",
                "details": details
            }),
            (_, other) => json!({
                "error": other.to_string(),
                "status": status.as_u16()
            }),
        };

        (status, axum::Json(body)).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;

/// Texto de `details` para uma resposta não-2xx do HubSpot
pub fn http_failure_details(status: reqwest::StatusCode, url: &str, body: &str) -> String {
    let body = super::truncate_with_suffix(body.trim(), 500, "...");
    if body.is_empty() {
        format!("{} for url '{}'", status, url)
    } else {
        format!("{} for url '{}': {}", status, url, body)
    }
}
