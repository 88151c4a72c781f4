use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use redis::{AsyncCommands, Client};
use tokio::sync::Mutex;

use super::{KeyValueStore, StoreError, StoreResult};

/// Store Redis com uma conexão multiplexada reaproveitada
pub struct RedisStore {
    client: Client,
    connection: Arc<Mutex<Option<redis::aio::MultiplexedConnection>>>,
    key_prefix: String,
}

impl RedisStore {
    pub fn new(redis_url: &str, key_prefix: String) -> StoreResult<Self> {
        let client = Client::open(redis_url)
            .map_err(|e| StoreError::Connection(format!("Redis client error: {}", e)))?;

        Ok(Self {
            client,
            connection: Arc::new(Mutex::new(None)),
            key_prefix,
        })
    }

    async fn get_connection(&self) -> StoreResult<redis::aio::MultiplexedConnection> {
        let mut guard = self.connection.lock().await;

        if let Some(conn) = guard.as_ref() {
            return Ok(conn.clone());
        }

        let conn = self
            .client
            .get_multiplexed_tokio_connection()
            .await
            .map_err(|e| StoreError::Connection(format!("Connection failed: {}", e)))?;

        *guard = Some(conn.clone());
        Ok(conn)
    }

    /// Descarta a conexão atual; a próxima operação reconecta
    async fn reset_connection(&self) {
        *self.connection.lock().await = None;
    }

    async fn map_failure(&self, e: redis::RedisError) -> StoreError {
        if e.is_io_error() || e.is_connection_dropped() {
            self.reset_connection().await;
            StoreError::Connection(e.to_string())
        } else {
            StoreError::Backend(e.to_string())
        }
    }

    fn prefixed_key(&self, key: &str) -> String {
        format!("{}{}", self.key_prefix, key)
    }
}

#[async_trait]
impl KeyValueStore for RedisStore {
    async fn set(&self, key: &str, value: &str, ttl: Option<Duration>) -> StoreResult<()> {
        let key = self.prefixed_key(key);
        let mut conn = self.get_connection().await?;

        let result: Result<(), redis::RedisError> = match ttl {
            // SETEX rejeita 0 segundos
            Some(ttl) if ttl.as_secs() > 0 => conn.set_ex(&key, value, ttl.as_secs()).await,
            _ => conn.set(&key, value).await,
        };

        match result {
            Ok(()) => Ok(()),
            Err(e) => Err(self.map_failure(e).await),
        }
    }

    async fn get(&self, key: &str) -> StoreResult<Option<String>> {
        let key = self.prefixed_key(key);
        let mut conn = self.get_connection().await?;

        match conn.get::<_, Option<String>>(&key).await {
            Ok(value) => Ok(value),
            Err(e) => Err(self.map_failure(e).await),
        }
    }

    async fn delete(&self, key: &str) -> StoreResult<()> {
        let key = self.prefixed_key(key);
        let mut conn = self.get_connection().await?;

        match conn.del::<_, ()>(&key).await {
            Ok(()) => Ok(()),
            Err(e) => Err(self.map_failure(e).await),
        }
    }

    async fn ttl(&self, key: &str) -> StoreResult<Option<Duration>> {
        let key = self.prefixed_key(key);
        let mut conn = self.get_connection().await?;

        // -2: chave inexistente, -1: sem expiração
        match conn.ttl::<_, i64>(&key).await {
            Ok(seconds) if seconds >= 0 => Ok(Some(Duration::from_secs(seconds as u64))),
            Ok(_) => Ok(None),
            Err(e) => Err(self.map_failure(e).await),
        }
    }

    async fn health_check(&self) -> StoreResult<()> {
        let mut conn = self.get_connection().await?;
        match redis::cmd("PING").query_async::<String>(&mut conn).await {
            Ok(_) => Ok(()),
            Err(e) => Err(self.map_failure(e).await),
        }
    }

    fn backend_name(&self) -> &'static str {
        "redis"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_redis_store_new() {
        let result = RedisStore::new("redis://localhost:6379", "hubspot:".to_string());
        assert!(result.is_ok());
    }

    #[test]
    fn test_redis_store_invalid_url() {
        let result = RedisStore::new("not a url", "hubspot:".to_string());
        assert!(matches!(result, Err(StoreError::Connection(_))));
    }

    #[test]
    fn test_redis_store_key_prefix() {
        let store = RedisStore::new("redis://localhost:6379", "hubspot:".to_string()).unwrap();
        assert_eq!(store.prefixed_key("hubspot_access_token"), "hubspot:hubspot_access_token");
    }

    // Operações reais exigem um Redis rodando; não executadas no CI
}
