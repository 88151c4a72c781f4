//! Cliente da API CRM do HubSpot (leitura de contatos)

use reqwest::Client;
use serde_json::Value;

use crate::auth::TokenManager;
use crate::models::{format_contacts, ContactsPayload, TenantId};
use crate::utils::logging::*;
use crate::utils::{http_failure_details, AppError, AppResult};

const FETCH_FAILED: &str = "Failed to fetch contacts";

#[derive(Clone)]
pub struct HubSpotClient {
    http_client: Client,
    contacts_url: String,
}

impl HubSpotClient {
    pub fn new(http_client: Client, api_base_url: &str) -> Self {
        Self {
            http_client,
            contacts_url: format!("{}/crm/v3/objects/contacts", api_base_url.trim_end_matches('/')),
        }
    }

    pub fn contacts_url(&self) -> &str {
        &self.contacts_url
    }

    /// GET autenticado na listagem de contatos; devolve o JSON cru
    pub async fn list_contacts(&self, access_token: &str) -> AppResult<Value> {
        log_info("🔍 [HubSpot] Consultando contatos...");

        let response = self
            .http_client
            .get(&self.contacts_url)
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|e| {
                log_hubspot_api_error(&self.contacts_url, None, &e.to_string());
                AppError::provider(FETCH_FAILED, format!("Falha ao conectar com HubSpot: {}", e))
            })?;

        let status = response.status();

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            log_hubspot_api_error(&self.contacts_url, Some(status.as_u16()), &error_text);
            return Err(AppError::provider(
                FETCH_FAILED,
                http_failure_details(status, &self.contacts_url, &error_text),
            ));
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| AppError::provider(FETCH_FAILED, format!("Falha ao parsear contatos: {}", e)))
    }

    /// Token válido do tenant → listagem → formatação
    pub async fn fetch_contacts(
        &self,
        token_manager: &TokenManager,
        tenant: &TenantId,
    ) -> AppResult<ContactsPayload> {
        let access_token = token_manager.get_valid_token(tenant).await?;
        let raw = self.list_contacts(&access_token).await?;

        let payload = format_contacts(&raw).map_err(|e| {
            log_error(&format!("❌ [HubSpot] Resposta de contatos malformada: {}", e));
            e
        })?;

        log_info(&format!("✅ [HubSpot] {} contatos formatados (tenant: {})", payload.contacts.len(), tenant));

        Ok(payload)
    }
}
