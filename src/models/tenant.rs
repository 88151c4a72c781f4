//! Identificação do dono de um par de tokens
//!
//! O slot `Global` usa exatamente as chaves `hubspot_access_token` e
//! `hubspot_refresh_token`; tenants com `org_id`/`user_id` recebem um
//! sufixo `:{org_id}:{user_id}`, cada componente url-encoded para que
//! um `:` dentro do id não colida com o separador.

use std::fmt;

use serde::{Deserialize, Serialize};

const ACCESS_TOKEN_KEY: &str = "hubspot_access_token";
const REFRESH_TOKEN_KEY: &str = "hubspot_refresh_token";

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TenantId {
    Global,
    Scoped { org_id: String, user_id: String },
}

impl TenantId {
    pub fn scoped(org_id: impl Into<String>, user_id: impl Into<String>) -> Self {
        Self::Scoped {
            org_id: org_id.into(),
            user_id: user_id.into(),
        }
    }

    /// Tenant a partir de query params opcionais; só vira `Scoped` com ambos não vazios
    pub fn from_optional(user_id: Option<String>, org_id: Option<String>) -> Self {
        match (user_id, org_id) {
            (Some(user_id), Some(org_id)) if !user_id.is_empty() && !org_id.is_empty() => {
                Self::Scoped { org_id, user_id }
            }
            _ => Self::Global,
        }
    }

    pub fn access_token_key(&self) -> String {
        self.key(ACCESS_TOKEN_KEY)
    }

    pub fn refresh_token_key(&self) -> String {
        self.key(REFRESH_TOKEN_KEY)
    }

    fn key(&self, base: &str) -> String {
        match self {
            TenantId::Global => base.to_string(),
            TenantId::Scoped { org_id, user_id } => format!(
                "{}:{}:{}",
                base,
                urlencoding::encode(org_id),
                urlencoding::encode(user_id)
            ),
        }
    }
}

impl fmt::Display for TenantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TenantId::Global => write!(f, "global"),
            TenantId::Scoped { org_id, user_id } => write!(f, "{}/{}", org_id, user_id),
        }
    }
}
