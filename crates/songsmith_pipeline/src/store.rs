//! Prompt stores
//!
//! [`JsonFilePromptStore`] keeps one pretty-printed JSON file per prompt:
//!
//! ```text
//! <dir>/
//! ├── {prompt_id_1}.json
//! └── {prompt_id_2}.json
//! ```

use anyhow::{Context, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::sync::RwLock;
use tracing::debug;

use crate::error::StoreError;
use crate::ports::PromptStore;
use crate::prompt::{Prompt, PromptId};

// =============================================================================
// In-memory
// =============================================================================

/// Prompts kept in a map; nothing survives the process.
#[derive(Debug, Default)]
pub struct MemoryPromptStore {
    prompts: RwLock<HashMap<PromptId, Prompt>>,
}

impl MemoryPromptStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn get(&self, id: &PromptId) -> Option<Prompt> {
        self.prompts.read().await.get(id).cloned()
    }

    pub async fn len(&self) -> usize {
        self.prompts.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.prompts.read().await.is_empty()
    }
}

#[async_trait]
impl PromptStore for MemoryPromptStore {
    async fn save(&self, prompt: &Prompt) -> Result<(), StoreError> {
        self.prompts.write().await.insert(prompt.id, prompt.clone());
        Ok(())
    }
}

// =============================================================================
// JSON files
// =============================================================================

/// Persistent prompt store
pub struct JsonFilePromptStore {
    dir: PathBuf,
}

impl JsonFilePromptStore {
    /// Open a store, creating the directory if needed
    pub async fn open(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)
            .await
            .with_context(|| {
                format!("Failed to create prompt store directory: {}", dir.display())
            })?;
        Ok(Self { dir })
    }

    fn prompt_path(&self, id: &PromptId) -> PathBuf {
        self.dir.join(format!("{}.json", id))
    }

    /// Load a prompt from disk
    pub async fn load(&self, id: &PromptId) -> Result<Option<Prompt>> {
        let path = self.prompt_path(id);
        if !fs::try_exists(&path).await.unwrap_or(false) {
            return Ok(None);
        }

        let json = fs::read_to_string(&path)
            .await
            .with_context(|| format!("Failed to read prompt file: {}", path.display()))?;
        let prompt = serde_json::from_str(&json)
            .with_context(|| format!("Failed to parse prompt file: {}", path.display()))?;
        Ok(Some(prompt))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    async fn write_prompt(&self, prompt: &Prompt) -> Result<PathBuf> {
        let path = self.prompt_path(&prompt.id);
        let json = serde_json::to_string_pretty(prompt).context("Failed to serialize prompt")?;
        atomic_write(&path, json.as_bytes())
            .await
            .with_context(|| format!("Failed to write prompt file: {}", path.display()))?;
        Ok(path)
    }
}

#[async_trait]
impl PromptStore for JsonFilePromptStore {
    async fn save(&self, prompt: &Prompt) -> Result<(), StoreError> {
        let path = self
            .write_prompt(prompt)
            .await
            .map_err(|source| StoreError::Save {
                id: prompt.id,
                source,
            })?;
        debug!("Saved prompt {} to {}", prompt.id, path.display());
        Ok(())
    }
}

/// Atomic write via temp file + rename
async fn atomic_write(path: &Path, content: &[u8]) -> Result<()> {
    let parent = path.parent().unwrap_or_else(|| Path::new("."));
    let temp_path = parent.join(format!(".tmp_{}", uuid::Uuid::new_v4()));
    fs::write(&temp_path, content)
        .await
        .with_context(|| format!("Failed to write temp file: {}", temp_path.display()))?;
    if let Err(err) = fs::rename(&temp_path, path).await {
        let _ = fs::remove_file(&temp_path).await;
        return Err(err)
            .with_context(|| format!("Failed to rename temp file to {}", path.display()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use songsmith_core::Genre;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_memory_store() {
        let store = MemoryPromptStore::new();
        assert!(store.is_empty().await);
        let prompt = Prompt::new("Night Drive", "Synthwave");
        store.save(&prompt).await.unwrap();
        assert_eq!(store.len().await, 1);
        assert_eq!(store.get(&prompt.id).await.unwrap(), prompt);
    }

    #[tokio::test]
    async fn test_json_store_save_and_load() {
        let temp = TempDir::new().unwrap();
        let store = JsonFilePromptStore::open(temp.path().join("prompts")).await.unwrap();

        let prompt = Prompt::new("Night Drive", "Synthwave, neon")
            .with_genre(Genre::new(&["Electronic", "Pop"]).unwrap())
            .with_tags(vec!["retro".to_string()]);
        store.save(&prompt).await.unwrap();

        assert!(store.dir().join(format!("{}.json", prompt.id)).exists());
        let loaded = store.load(&prompt.id).await.unwrap().unwrap();
        assert_eq!(loaded, prompt);
    }

    #[tokio::test]
    async fn test_json_store_missing() {
        let temp = TempDir::new().unwrap();
        let store = JsonFilePromptStore::open(temp.path()).await.unwrap();
        assert!(store.load(&PromptId::new()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_json_store_write_failure() {
        let temp = TempDir::new().unwrap();
        let store = JsonFilePromptStore::open(temp.path().join("gone")).await.unwrap();
        std::fs::remove_dir_all(store.dir()).unwrap();

        let prompt = Prompt::new("Night Drive", "Synthwave");
        let err = store.save(&prompt).await.unwrap_err();
        assert!(matches!(err, StoreError::Save { id, .. } if id == prompt.id));
    }

    #[tokio::test]
    async fn test_failed_rename_leaves_no_temp_file() {
        let temp = TempDir::new().unwrap();
        let store = JsonFilePromptStore::open(temp.path()).await.unwrap();
        let prompt = Prompt::new("Night Drive", "Synthwave");

        // A non-empty directory at the target path makes the rename fail
        let blocker = store.prompt_path(&prompt.id);
        std::fs::create_dir(&blocker).unwrap();
        std::fs::write(blocker.join("keep"), b"x").unwrap();

        assert!(store.save(&prompt).await.is_err());

        let leftovers: Vec<_> = std::fs::read_dir(store.dir())
            .unwrap()
            .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
            .filter(|name| name.starts_with(".tmp_"))
            .collect();
        assert!(leftovers.is_empty(), "temp files left: {:?}", leftovers);
    }
}
