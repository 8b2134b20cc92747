use anyhow::{Context, Result};
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

/// Durable key holding the JSON-encoded quote collection
pub const QUOTES_KEY: &str = "quotes";

/// Durable key holding the last-used category filter (plain string)
pub const LAST_FILTER_KEY: &str = "lastFilter";

/// Session key holding the JSON-encoded last viewed quote
pub const LAST_QUOTE_KEY: &str = "lastQuote";

/// String key-value storage.
///
/// Callers do their own JSON encoding; the storage layer only moves strings.
/// Two implementations exist: [`FileStorage`] outlives the process,
/// [`SessionStorage`] is cleared when dropped.
pub trait KeyValueStorage {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
    fn remove(&mut self, key: &str) -> Result<()>;
}

/// Durable storage backed by one file per key under a directory.
///
/// Every `set` is an immediate write-through; there is no batching.
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create storage directory: {}", dir.display()))?;
        Ok(FileStorage { dir })
    }

    fn key_path(&self, key: &str) -> PathBuf {
        self.dir.join(key)
    }
}

impl KeyValueStorage for FileStorage {
    fn get(&self, key: &str) -> Option<String> {
        fs::read_to_string(self.key_path(key)).ok()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let path = self.key_path(key);
        fs::write(&path, value)
            .with_context(|| format!("Failed to write storage key: {}", path.display()))
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        let path = self.key_path(key);
        if path.exists() {
            fs::remove_file(&path)
                .with_context(|| format!("Failed to remove storage key: {}", path.display()))?;
        }
        Ok(())
    }
}

/// In-memory storage with session lifetime.
#[derive(Default)]
pub struct SessionStorage {
    values: HashMap<String, String>,
}

impl SessionStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStorage for SessionStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.values.remove(key);
        Ok(())
    }
}
