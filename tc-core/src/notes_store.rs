use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use mockall::automock;
use serde_json::{Map, Value};
use std::fmt::Debug;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::debug;

pub const NOTES_KEY: &str = "notes";

#[automock]
#[async_trait]
pub trait KeyValueStore: Send + Sync + Debug {
    async fn get(&self, key: &str) -> Result<Option<Value>>;

    async fn set(&self, key: &str, value: Value) -> Result<()>;
}

/// All keys live in one JSON object on disk. A missing file reads as an empty store.
#[derive(Debug)]
pub struct JsonFileKeyValueStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonFileKeyValueStore {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            write_lock: Mutex::new(()),
        }
    }

    async fn read_all(&self) -> Result<Map<String, Value>> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => serde_json::from_slice(&bytes).with_context(|| format!("Failed to decode key-value store at {}", self.path.display())),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Map::new()),
            Err(e) => Err(e).with_context(|| format!("Failed to read key-value store at {}", self.path.display())),
        }
    }
}

#[async_trait]
impl KeyValueStore for JsonFileKeyValueStore {
    async fn get(&self, key: &str) -> Result<Option<Value>> {
        Ok(self.read_all().await?.remove(key))
    }

    async fn set(&self, key: &str, value: Value) -> Result<()> {
        let _guard = self.write_lock.lock().await;

        let mut entries = self.read_all().await?;
        entries.insert(key.to_string(), value);

        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await.context("Failed to create data directory")?;
        }

        // written next to the store, then renamed over it
        let tmp_path = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp_path, serde_json::to_vec_pretty(&entries)?).await.context("Failed to write key-value store")?;
        tokio::fs::rename(&tmp_path, &self.path).await.context("Failed to replace key-value store")?;

        debug!(key, path = %self.path.display(), "stored value");
        Ok(())
    }
}

/// User notes, persisted as a JSON list of strings under a single key.
#[derive(Debug, Clone)]
pub struct NotesStore {
    store: Arc<dyn KeyValueStore>,
}

impl NotesStore {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    pub async fn load(&self) -> Result<Vec<String>> {
        match self.store.get(NOTES_KEY).await? {
            None => Ok(vec![]),
            Some(value) => serde_json::from_value(value).context("Stored notes are malformed"),
        }
    }

    pub async fn save(&self, notes: &[String]) -> Result<()> {
        self.store.set(NOTES_KEY, serde_json::to_value(notes)?).await
    }

    pub async fn add(&self, note: String) -> Result<Vec<String>> {
        let mut notes = self.load().await?;
        notes.push(note);
        self.save(&notes).await?;
        Ok(notes)
    }

    pub async fn remove(&self, index: usize) -> Result<String> {
        let mut notes = self.load().await?;
        if index >= notes.len() {
            bail!("There is no note #{index}, only {} notes are stored", notes.len());
        }
        let removed = notes.remove(index);
        self.save(&notes).await?;
        Ok(removed)
    }
}
