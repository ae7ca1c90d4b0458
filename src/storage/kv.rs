use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use crate::error::{NotasError, Result};

/// A string key-value store in the shape of the browser's `localStorage`.
pub trait KeyValueStorage {
    /// Read the value under `key`, `None` when the slot is empty.
    ///
    /// A slot holding something other than text fails with
    /// `NotasError::MalformedSlot`.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Replace the value under `key`.
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

/// Keys must stay inside the data directory when mapped to file names.
fn validate_key(key: &str) -> Result<()> {
    let valid = !key.is_empty()
        && !key.starts_with('.')
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'));
    if valid {
        Ok(())
    } else {
        Err(NotasError::InvalidStorageKey(key.to_string()))
    }
}

/// Storage backed by one JSON file per key under a data directory.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// File that holds the value for `key`
    pub fn path_for(&self, key: &str) -> Result<PathBuf> {
        validate_key(key)?;
        Ok(self.dir.join(format!("{}.json", key)))
    }
}

impl KeyValueStorage for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key)?;
        let bytes = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        String::from_utf8(bytes)
            .map(Some)
            .map_err(|e| NotasError::MalformedSlot {
                key: key.to_string(),
                reason: e.to_string(),
            })
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let path = self.path_for(key)?;
        fs::create_dir_all(&self.dir)?;
        fs::write(&path, value)?;
        tracing::debug!(path = %path.display(), bytes = value.len(), "wrote storage slot");
        Ok(())
    }
}

/// Storage that lives only as long as the process.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    slots: HashMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        validate_key(key)?;
        Ok(self.slots.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        validate_key(key)?;
        self.slots.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
