//! Key-value store de tokens
//!
//! Abstração mínima sobre o armazenamento dos tokens OAuth2:
//! `set(key, value, ttl?)`, `get(key)`, `delete(key)` e `ttl(key)`.
//!
//! ## Backends:
//! - `memory.rs`: HashMap em memória com expiração (testes / instância única)
//! - `redis.rs`: Redis compartilhado entre instâncias

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

use crate::config::settings::StoreSettings;

pub mod memory;
pub mod redis;

pub use memory::MemoryStore;
pub use self::redis::RedisStore;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Store error: {0}")]
    Backend(String),
    #[error("Connection error: {0}")]
    Connection(String),
    #[error("Unknown store backend: {0}")]
    UnknownBackend(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Grava `value` em `key`; `ttl = None` significa sem expiração
    async fn set(&self, key: &str, value: &str, ttl: Option<Duration>) -> StoreResult<()>;

    /// Lê `key`; entradas expiradas são tratadas como ausentes
    async fn get(&self, key: &str) -> StoreResult<Option<String>>;

    async fn delete(&self, key: &str) -> StoreResult<()>;

    /// Tempo restante até a expiração de `key`
    ///
    /// `None` quando a chave não existe ou não tem expiração.
    async fn ttl(&self, key: &str) -> StoreResult<Option<Duration>>;

    async fn health_check(&self) -> StoreResult<()>;

    fn backend_name(&self) -> &'static str;
}

/// Cria o backend configurado em `store.backend`
pub fn build_store(settings: &StoreSettings) -> StoreResult<Arc<dyn KeyValueStore>> {
    match settings.backend.as_str() {
        "memory" => Ok(Arc::new(MemoryStore::new())),
        "redis" => Ok(Arc::new(RedisStore::new(
            &settings.redis_url,
            settings.key_prefix.clone(),
        )?)),
        other => Err(StoreError::UnknownBackend(other.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(backend: &str) -> StoreSettings {
        StoreSettings {
            backend: backend.to_string(),
            redis_url: "redis://localhost:6379".to_string(),
            key_prefix: "test:".to_string(),
        }
    }

    #[test]
    fn test_build_memory_store() {
        let store = build_store(&settings("memory")).unwrap();
        assert_eq!(store.backend_name(), "memory");
    }

    #[test]
    fn test_build_redis_store_without_server() {
        // Client::open não conecta; só valida a URL
        let store = build_store(&settings("redis")).unwrap();
        assert_eq!(store.backend_name(), "redis");
    }

    #[test]
    fn test_build_unknown_backend() {
        let result = build_store(&settings("dynamodb"));
        assert!(matches!(result, Err(StoreError::UnknownBackend(name)) if name == "dynamodb"));
    }
}
