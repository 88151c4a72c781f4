//! Parâmetro OAuth `state`
//!
//! Carrega o tenant (`user_id`, `org_id`) através do redirect do HubSpot para
//! que o callback saiba a quem pertencem os tokens.
//!
//! Formato: `base64url(json) "." hex(HMAC-SHA256(client_secret, base64url(json)))`

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;

use crate::models::TenantId;
use crate::utils::{AppError, AppResult};

type HmacSha256 = Hmac<Sha256>;

#[derive(Debug, Serialize, Deserialize)]
struct StateClaims {
    user_id: String,
    org_id: String,
}

fn mac_for(secret: &str, payload: &str) -> AppResult<HmacSha256> {
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .map_err(|e| AppError::ConfigError(format!("Invalid state signing key: {}", e)))?;
    mac.update(payload.as_bytes());
    Ok(mac)
}

/// Gera o `state` assinado para um tenant
pub fn encode_state(user_id: &str, org_id: &str, secret: &str) -> AppResult<String> {
    let claims = StateClaims {
        user_id: user_id.to_string(),
        org_id: org_id.to_string(),
    };
    let json = serde_json::to_vec(&claims)
        .map_err(|e| AppError::ConfigError(format!("Failed to encode state: {}", e)))?;
    let payload = URL_SAFE_NO_PAD.encode(json);

    let signature = hex::encode(mac_for(secret, &payload)?.finalize().into_bytes());

    Ok(format!("{}.{}", payload, signature))
}

/// Verifica a assinatura e devolve o tenant do `state`
pub fn decode_state(state: &str, secret: &str) -> AppResult<TenantId> {
    let (payload, signature) = state
        .split_once('.')
        .ok_or_else(|| AppError::InvalidState("malformed state".to_string()))?;

    let signature = hex::decode(signature)
        .map_err(|_| AppError::InvalidState("malformed signature".to_string()))?;

    // verify_slice compara em tempo constante
    mac_for(secret, payload)?
        .verify_slice(&signature)
        .map_err(|_| AppError::InvalidState("signature mismatch".to_string()))?;

    let json = URL_SAFE_NO_PAD
        .decode(payload)
        .map_err(|_| AppError::InvalidState("malformed payload".to_string()))?;
    let claims: StateClaims = serde_json::from_slice(&json)
        .map_err(|_| AppError::InvalidState("malformed payload".to_string()))?;

    if claims.user_id.is_empty() || claims.org_id.is_empty() {
        return Err(AppError::InvalidState("empty tenant".to_string()));
    }

    Ok(TenantId::scoped(claims.org_id, claims.user_id))
}
