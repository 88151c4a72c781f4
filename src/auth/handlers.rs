//! OAuth2 HTTP Handlers
//!
//! Endpoints HTTP para iniciar e completar o fluxo OAuth2

use axum::{
    extract::{Query, State},
    response::Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;

use super::state::{decode_state, encode_state};
use crate::models::TenantId;
use crate::utils::logging::*;
use crate::utils::{truncate_safe, AppError, AppResult};
use crate::AppState;

/// Parâmetros de início do fluxo
#[derive(Debug, Deserialize)]
pub struct AuthorizeParams {
    pub user_id: String,
    pub org_id: String,
}

/// Parâmetros do callback OAuth2
#[derive(Debug, Deserialize)]
pub struct OAuthCallbackParams {
    /// Authorization code retornado pelo HubSpot
    code: Option<String>,
    /// Tenant assinado em `authorize`
    state: Option<String>,
}

/// GET /hubspot/authorize?user_id=..&org_id=..
///
/// Devolve a URL da tela de consentimento do HubSpot
pub async fn authorize(
    State(state): State<Arc<AppState>>,
    Query(params): Query<AuthorizeParams>,
) -> AppResult<Json<Value>> {
    log_request_received("/hubspot/authorize", "GET");

    // O callback recusa um state com tenant vazio; falhar antes da tela de consentimento
    if params.user_id.is_empty() || params.org_id.is_empty() {
        log_warning("⚠️ [OAuth2] authorize chamado com user_id/org_id vazio");
        return Err(AppError::InvalidTenant(
            "user_id and org_id must not be empty".to_string(),
        ));
    }

    let oauth_state = encode_state(
        &params.user_id,
        &params.org_id,
        &state.oauth_config.client_secret,
    )?;
    let auth_url = state.oauth_config.authorization_url(Some(&oauth_state));

    log_info(&format!(
        "🚀 [OAuth2] URL de autorização gerada para {}/{}",
        params.org_id, params.user_id
    ));

    Ok(Json(json!({ "auth_url": auth_url })))
}

/// GET /hubspot/oauth2callback?code=XXX[&state=YYY]
///
/// Troca o code por tokens e persiste ambos no store
///
/// # Retorno
/// - `{ message }`: tokens salvos
/// - `{ error, details }`: HubSpot recusou a troca (HTTP 200)
/// - 400: code ausente ou `state` inválido
pub async fn oauth2_callback(
    State(state): State<Arc<AppState>>,
    Query(params): Query<OAuthCallbackParams>,
) -> AppResult<Json<Value>> {
    log_request_received("/hubspot/oauth2callback", "GET");

    let code = params.code.filter(|c| !c.is_empty()).ok_or_else(|| {
        log_error("❌ [OAuth2] Code não recebido no callback");
        AppError::MissingAuthorizationCode
    })?;

    let tenant = match params.state.as_deref() {
        Some(raw) => decode_state(raw, &state.oauth_config.client_secret).map_err(|e| {
            log_warning(&format!("⚠️ [OAuth2] State rejeitado: {}", e));
            e
        })?,
        None => TenantId::Global,
    };

    log_info(&format!(
        "🔑 [OAuth2] Code recebido: {}... (tenant: {})",
        truncate_safe(&code, 6),
        tenant
    ));

    state.token_manager.exchange_code(&tenant, &code).await?;

    Ok(Json(json!({
        "message": "Authorization successful! Tokens stored."
    })))
}
