//! Draft storage implementation
//!
//! This module handles persistence of wizard draft snapshots using Redis,
//! including serialization, expiration, and recovery of malformed data.

use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex};

use redis::AsyncCommands;
use tracing::{debug, warn};

use crate::config::RedisConfig;
use crate::models::draft::DraftSnapshot;
use crate::utils::errors::Result;

/// Persistence seam for wizard drafts. The controller only ever touches
/// drafts through this trait, which keeps it testable without Redis.
pub trait DraftStore: Clone + Send + Sync + 'static {
    fn save(&self, snapshot: &DraftSnapshot) -> impl Future<Output = Result<()>> + Send;
    fn load(&self, author: &str) -> impl Future<Output = Result<Option<DraftSnapshot>>> + Send;
    fn clear(&self, author: &str) -> impl Future<Output = Result<()>> + Send;
}

/// Redis-backed draft storage, one snapshot per author
#[derive(Clone)]
pub struct RedisDraftStorage {
    connection_manager: redis::aio::ConnectionManager,
    config: RedisConfig,
}

impl RedisDraftStorage {
    pub async fn new(config: RedisConfig) -> Result<Self> {
        let client = redis::Client::open(config.url.as_str())?;
        let connection_manager = redis::aio::ConnectionManager::new(client).await?;

        Ok(Self {
            connection_manager,
            config,
        })
    }

    fn draft_key(&self, author: &str) -> String {
        format!("{}draft:{}", self.config.prefix, author)
    }

    /// Test Redis connection
    pub async fn test_connection(&self) -> Result<()> {
        let mut conn = self.connection_manager.clone();
        let _: String = redis::cmd("PING").query_async(&mut conn).await?;
        Ok(())
    }
}

impl DraftStore for RedisDraftStorage {
    async fn save(&self, snapshot: &DraftSnapshot) -> Result<()> {
        let key = self.draft_key(&snapshot.author);
        let serialized = serde_json::to_string(snapshot)?;

        let mut conn = self.connection_manager.clone();
        conn.set_ex::<_, _, ()>(&key, serialized, self.config.ttl_seconds)
            .await?;

        debug!(author = %snapshot.author, step = snapshot.current_step,
               "Draft snapshot saved");
        Ok(())
    }

    async fn load(&self, author: &str) -> Result<Option<DraftSnapshot>> {
        let key = self.draft_key(author);
        let mut conn = self.connection_manager.clone();

        let serialized: Option<String> = conn.get(&key).await?;

        match serialized {
            Some(data) => match serde_json::from_str::<DraftSnapshot>(&data) {
                Ok(snapshot) => {
                    debug!(author = %author, step = snapshot.current_step, "Draft snapshot loaded");
                    Ok(Some(snapshot))
                }
                Err(e) => {
                    // Corrupt snapshots are discarded, never fatal
                    warn!(author = %author, error = %e, "Discarding malformed draft snapshot");
                    let _: u32 = conn.del(&key).await?;
                    Ok(None)
                }
            },
            None => Ok(None),
        }
    }

    async fn clear(&self, author: &str) -> Result<()> {
        let key = self.draft_key(author);
        let mut conn = self.connection_manager.clone();

        let deleted: u32 = conn.del(&key).await?;

        if deleted > 0 {
            debug!(author = %author, "Draft snapshot cleared");
        }

        Ok(())
    }
}

impl std::fmt::Debug for RedisDraftStorage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisDraftStorage")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// In-memory draft store for tests and local development without Redis
#[derive(Debug, Clone, Default)]
pub struct MemoryDraftStore {
    drafts: Arc<Mutex<HashMap<String, DraftSnapshot>>>,
}

impl MemoryDraftStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot_count(&self) -> usize {
        self.drafts
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .len()
    }
}

impl DraftStore for MemoryDraftStore {
    async fn save(&self, snapshot: &DraftSnapshot) -> Result<()> {
        self.drafts
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .insert(snapshot.author.clone(), snapshot.clone());
        Ok(())
    }

    async fn load(&self, author: &str) -> Result<Option<DraftSnapshot>> {
        Ok(self
            .drafts
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .get(author)
            .cloned())
    }

    async fn clear(&self, author: &str) -> Result<()> {
        self.drafts
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .remove(author);
        Ok(())
    }
}
