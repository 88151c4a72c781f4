//! Token Manager
//!
//! Gerenciamento de tokens OAuth2: persistência, refresh e fornecimento de
//! um access token válido por tenant.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;

use super::{OAuth2Client, TokenResponse};
use crate::models::TenantId;
use crate::store::KeyValueStore;
use crate::utils::logging::*;
use crate::utils::{AppError, AppResult};

const NO_REFRESH_TOKEN: &str = "Access token expired, and no refresh token found. Please reauthorize.";
const REFRESH_FAILED: &str = "Failed to refresh access token. Please reauthorize.";

/// Gerenciador de tokens OAuth2
pub struct TokenManager {
    oauth_client: OAuth2Client,
    store: Arc<dyn KeyValueStore>,
    /// Um lock por tenant: só um refresh em andamento por vez
    refresh_locks: Mutex<HashMap<TenantId, Arc<Mutex<()>>>>,
}

impl TokenManager {
    pub fn new(oauth_client: OAuth2Client, store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            oauth_client,
            store,
            refresh_locks: Mutex::new(HashMap::new()),
        }
    }

    pub fn store(&self) -> &Arc<dyn KeyValueStore> {
        &self.store
    }

    /// Trocar o authorization code e salvar os tokens do tenant
    pub async fn exchange_code(&self, tenant: &TenantId, code: &str) -> AppResult<TokenResponse> {
        let tokens = self.oauth_client.exchange_code_for_token(code).await?;
        self.save_tokens(tenant, &tokens).await?;
        Ok(tokens)
    }

    /// Renovar o access token com `refresh_token` e sobrescrever os tokens salvos
    ///
    /// Falhas do HubSpot voltam como `AppError::Provider` (degraded); quem
    /// decide se isso encerra a requisição é o chamador.
    pub async fn refresh_access_token(
        &self,
        tenant: &TenantId,
        refresh_token: &str,
    ) -> AppResult<TokenResponse> {
        let tokens = self.oauth_client.refresh_token(refresh_token).await?;
        self.save_tokens(tenant, &tokens).await?;
        Ok(tokens)
    }

    /// Obter token válido (store → refresh → erro)
    ///
    /// # Retorno
    /// - `Ok(String)`: access token utilizável
    /// - `Err(AppError::ReauthorizationRequired)`: sem access token e sem refresh utilizável
    pub async fn get_valid_token(&self, tenant: &TenantId) -> AppResult<String> {
        let access_key = tenant.access_token_key();

        // 1. A expiração do store é a única validação
        if let Some(token) = self.store.get(&access_key).await? {
            return Ok(token);
        }

        // 2. Serializar o refresh por tenant
        let lock = self.refresh_lock(tenant).await;
        let result = {
            let _guard = lock.lock().await;
            self.refresh_under_lock(tenant, &access_key).await
        };
        self.release_refresh_lock(tenant, lock).await;

        result
    }

    async fn refresh_under_lock(&self, tenant: &TenantId, access_key: &str) -> AppResult<String> {
        // Outro chamador pode ter renovado enquanto esperávamos
        if let Some(token) = self.store.get(access_key).await? {
            log_info(&format!("✅ [TokenManager] Token renovado por outra requisição (tenant: {})", tenant));
            return Ok(token);
        }

        log_info(&format!("🔄 [TokenManager] Access token ausente para tenant '{}', tentando refresh...", tenant));

        // 3. Sem refresh token não há o que fazer
        let refresh_token = self
            .store
            .get(&tenant.refresh_token_key())
            .await?
            .ok_or_else(|| {
                log_warning(&format!("⚠️ [TokenManager] Nenhum refresh token para tenant '{}'", tenant));
                AppError::reauthorize(NO_REFRESH_TOKEN)
            })?;

        // 4. Falha do provider vira reautorização; falha do store propaga
        match self.refresh_access_token(tenant, &refresh_token).await {
            Ok(tokens) => Ok(tokens.access_token),
            Err(AppError::Provider { error, details }) => {
                log_error(&format!("❌ [TokenManager] {}: {}", error, details));
                Err(AppError::reauthorize(REFRESH_FAILED))
            }
            Err(e) => Err(e),
        }
    }

    /// Access token com TTL = `expires_in`; refresh token sem expiração
    ///
    /// Resposta sem `refresh_token` mantém o refresh token já salvo.
    async fn save_tokens(&self, tenant: &TenantId, tokens: &TokenResponse) -> AppResult<()> {
        let ttl = tokens
            .expires_in
            .filter(|seconds| *seconds > 0)
            .map(Duration::from_secs);

        self.store
            .set(&tenant.access_token_key(), &tokens.access_token, ttl)
            .await?;

        if let Some(refresh_token) = &tokens.refresh_token {
            self.store
                .set(&tenant.refresh_token_key(), refresh_token, None)
                .await?;
        }

        log_tokens_stored(&tenant.to_string(), &tokens.access_token, ttl.map(|d| d.as_secs()));

        Ok(())
    }

    async fn refresh_lock(&self, tenant: &TenantId) -> Arc<Mutex<()>> {
        let mut locks = self.refresh_locks.lock().await;
        locks
            .entry(tenant.clone())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }

    /// Remove o lock do mapa quando ninguém mais espera por ele
    ///
    /// Clones só são feitos com o mapa travado, então a contagem aqui é exata:
    /// uma referência do mapa e a nossa.
    async fn release_refresh_lock(&self, tenant: &TenantId, lock: Arc<Mutex<()>>) {
        let mut locks = self.refresh_locks.lock().await;
        if Arc::strong_count(&lock) <= 2 {
            locks.remove(tenant);
        }
    }
}
