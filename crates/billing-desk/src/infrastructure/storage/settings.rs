//! Key-value settings backends.
//!
//! [`FileSettingsStore`] keeps every setting in one JSON object
//! (`{"key": "value", ...}`) on disk.  Writes go to a sibling temp file that
//! is then renamed over the document, so a crash mid-write leaves either the
//! old or the new document, never a truncated one.
//!
//! [`MemorySettingsStore`] is the in-process equivalent used by tests and by
//! hosts that do not want layout persisted.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use async_trait::async_trait;
use tokio::sync::Mutex as AsyncMutex;
use tracing::debug;

use crate::application::layout_store::{SettingsError, SettingsStore};

/// Settings stored in a JSON document on disk.
#[derive(Debug)]
pub struct FileSettingsStore {
    path: PathBuf,
    // Serializes read-modify-write cycles within this process.
    write_lock: AsyncMutex<()>,
}

impl FileSettingsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: AsyncMutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> SettingsError {
        SettingsError::Io {
            path: self.path.clone(),
            source,
        }
    }

    async fn read_document(&self) -> Result<HashMap<String, String>, SettingsError> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(content) if content.trim().is_empty() => Ok(HashMap::new()),
            Ok(content) => Ok(serde_json::from_str(&content)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(HashMap::new()),
            Err(e) => Err(self.io_error(e)),
        }
    }

    async fn write_document(&self, document: &HashMap<String, String>) -> Result<(), SettingsError> {
        if let Some(dir) = self.path.parent() {
            tokio::fs::create_dir_all(dir)
                .await
                .map_err(|e| self.io_error(e))?;
        }

        let content = serde_json::to_string_pretty(document)?;
        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, content)
            .await
            .map_err(|e| self.io_error(e))?;
        tokio::fs::rename(&tmp, &self.path)
            .await
            .map_err(|e| self.io_error(e))?;
        Ok(())
    }
}

#[async_trait]
impl SettingsStore for FileSettingsStore {
    async fn get_all(&self) -> Result<HashMap<String, String>, SettingsError> {
        self.read_document().await
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), SettingsError> {
        let _guard = self.write_lock.lock().await;
        let mut document = self.read_document().await?;
        document.insert(key.to_string(), value.to_string());
        self.write_document(&document).await?;
        debug!(key, path = %self.path.display(), "setting written");
        Ok(())
    }
}

/// Settings held in memory for the lifetime of the process.
#[derive(Debug, Default)]
pub struct MemorySettingsStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemorySettingsStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entries(entries: impl IntoIterator<Item = (String, String)>) -> Self {
        Self {
            entries: Mutex::new(entries.into_iter().collect()),
        }
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, HashMap<String, String>>, SettingsError> {
        self.entries
            .lock()
            .map_err(|_| SettingsError::Unavailable("settings map lock poisoned".to_string()))
    }
}

#[async_trait]
impl SettingsStore for MemorySettingsStore {
    async fn get_all(&self) -> Result<HashMap<String, String>, SettingsError> {
        Ok(self.lock()?.clone())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), SettingsError> {
        self.lock()?.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
