use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{KeyValueStore, StoreResult};

#[derive(Debug, Clone)]
struct Entry {
    value: String,
    expires_at: Option<Instant>,
}

impl Entry {
    fn is_expired(&self, now: Instant) -> bool {
        matches!(self.expires_at, Some(at) if now >= at)
    }
}

/// Store em memória com expiração por chave
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Arc<RwLock<HashMap<String, Entry>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Número de entradas ainda válidas
    pub async fn len(&self) -> usize {
        let now = Instant::now();
        self.entries
            .read()
            .await
            .values()
            .filter(|e| !e.is_expired(now))
            .count()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn set(&self, key: &str, value: &str, ttl: Option<Duration>) -> StoreResult<()> {
        let entry = Entry {
            value: value.to_string(),
            expires_at: ttl.map(|ttl| Instant::now() + ttl),
        };
        self.entries.write().await.insert(key.to_string(), entry);
        Ok(())
    }

    async fn get(&self, key: &str) -> StoreResult<Option<String>> {
        let now = Instant::now();
        {
            let entries = self.entries.read().await;
            match entries.get(key) {
                Some(entry) if !entry.is_expired(now) => return Ok(Some(entry.value.clone())),
                Some(_) => {}
                None => return Ok(None),
            }
        }

        // Expirada: remove para não crescer indefinidamente
        let mut entries = self.entries.write().await;
        if entries.get(key).is_some_and(|e| e.is_expired(now)) {
            entries.remove(key);
        }
        Ok(None)
    }

    async fn delete(&self, key: &str) -> StoreResult<()> {
        self.entries.write().await.remove(key);
        Ok(())
    }

    async fn ttl(&self, key: &str) -> StoreResult<Option<Duration>> {
        let now = Instant::now();
        let entries = self.entries.read().await;
        Ok(entries
            .get(key)
            .filter(|e| !e.is_expired(now))
            .and_then(|e| e.expires_at)
            .map(|at| at.saturating_duration_since(now)))
    }

    async fn health_check(&self) -> StoreResult<()> {
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_set_and_get_without_ttl() {
        let store = MemoryStore::new();
        store.set("hubspot_refresh_token", "R", None).await.unwrap();

        assert_eq!(store.get("hubspot_refresh_token").await.unwrap(), Some("R".to_string()));
        assert_eq!(store.ttl("hubspot_refresh_token").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_get_missing_key() {
        let store = MemoryStore::new();
        assert_eq!(store.get("nope").await.unwrap(), None);
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_ttl_reports_remaining_time() {
        let store = MemoryStore::new();
        store
            .set("hubspot_access_token", "A", Some(Duration::from_secs(3600)))
            .await
            .unwrap();

        let ttl = store.ttl("hubspot_access_token").await.unwrap().unwrap();
        assert!(ttl <= Duration::from_secs(3600));
        assert!(ttl > Duration::from_secs(3590));
    }

    #[tokio::test]
    async fn test_entry_expires() {
        let store = MemoryStore::new();
        store
            .set("short", "value", Some(Duration::from_millis(50)))
            .await
            .unwrap();
        assert_eq!(store.get("short").await.unwrap(), Some("value".to_string()));

        tokio::time::sleep(Duration::from_millis(120)).await;

        assert_eq!(store.get("short").await.unwrap(), None);
        assert_eq!(store.ttl("short").await.unwrap(), None);
        assert_eq!(store.len().await, 0);
    }

    #[tokio::test]
    async fn test_set_overwrites_value_and_ttl() {
        let store = MemoryStore::new();
        store.set("k", "old", Some(Duration::from_secs(10))).await.unwrap();
        store.set("k", "new", None).await.unwrap();

        assert_eq!(store.get("k").await.unwrap(), Some("new".to_string()));
        assert_eq!(store.ttl("k").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_delete() {
        let store = MemoryStore::new();
        store.set("k", "v", None).await.unwrap();
        store.delete("k").await.unwrap();
        assert_eq!(store.get("k").await.unwrap(), None);
    }
}
