//! File-based key/value store
//!
//! Persists every key in a single JSON object on disk. The file is read once
//! and cached; each write rewrites the whole file.

use std::collections::BTreeMap;
use std::path::PathBuf;

use async_trait::async_trait;
use nt_core::ports::KeyValueStorePort;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;
use tracing::debug;

pub const DEFAULT_PREFERENCES_FILE: &str = "preferences.json";

type Entries = BTreeMap<String, String>;

pub struct FileKeyValueStore {
    path: PathBuf,
    cache: Mutex<Option<Entries>>,
}

impl FileKeyValueStore {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            cache: Mutex::new(None),
        }
    }

    pub fn with_defaults(base_dir: PathBuf) -> Self {
        Self::new(base_dir.join(DEFAULT_PREFERENCES_FILE))
    }

    async fn ensure_parent_dir(&self) -> anyhow::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).await?;
        }
        Ok(())
    }

    async fn load(&self) -> anyhow::Result<Entries> {
        if !self.path.exists() {
            return Ok(Entries::new());
        }

        let content = fs::read_to_string(&self.path).await?;
        if content.trim().is_empty() {
            return Ok(Entries::new());
        }

        serde_json::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse preferences file: {}", e))
    }

    async fn persist(&self, entries: &Entries) -> anyhow::Result<()> {
        self.ensure_parent_dir().await?;

        let json = serde_json::to_string_pretty(entries)
            .map_err(|e| anyhow::anyhow!("Failed to serialize preferences: {}", e))?;

        let mut file = fs::File::create(&self.path)
            .await
            .map_err(|e| anyhow::anyhow!("Failed to create preferences file: {}", e))?;

        file.write_all(json.as_bytes())
            .await
            .map_err(|e| anyhow::anyhow!("Failed to write preferences file: {}", e))?;

        file.sync_all()
            .await
            .map_err(|e| anyhow::anyhow!("Failed to sync preferences file: {}", e))?;

        Ok(())
    }

    /// Apply `update` to the cached entries and write them back.
    async fn modify(&self, update: impl FnOnce(&mut Entries)) -> anyhow::Result<()> {
        let mut cache = self.cache.lock().await;
        let mut entries = match cache.take() {
            Some(entries) => entries,
            None => self.load().await?,
        };
        update(&mut entries);
        let result = self.persist(&entries).await;
        *cache = Some(entries);
        result
    }
}

#[async_trait]
impl KeyValueStorePort for FileKeyValueStore {
    async fn get_item(&self, key: &str) -> anyhow::Result<Option<String>> {
        let mut cache = self.cache.lock().await;
        if cache.is_none() {
            *cache = Some(self.load().await?);
        }
        Ok(cache.as_ref().and_then(|entries| entries.get(key).cloned()))
    }

    async fn set_item(&self, key: &str, value: &str) -> anyhow::Result<()> {
        debug!(key, "writing preference");
        self.modify(|entries| {
            entries.insert(key.to_string(), value.to_string());
        })
        .await
    }

    async fn remove_item(&self, key: &str) -> anyhow::Result<()> {
        debug!(key, "removing preference");
        self.modify(|entries| {
            entries.remove(key);
        })
        .await
    }
}
