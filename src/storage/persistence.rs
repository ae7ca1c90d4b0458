use std::fmt;

use crate::entity::Note;
use crate::error::{NotasError, Result};

use super::KeyValueStorage;

/// Key of the slot that holds the whole note list.
pub const STORAGE_KEY: &str = "notas-rapidas";

/// Moves the note list in and out of the storage slot.
///
/// The storage capability is injected: a headless adapter (no storage, the
/// equivalent of running outside a browser) turns every load and save into
/// a no-op.
pub struct Persistence {
    storage: Option<Box<dyn KeyValueStorage>>,
}

impl Persistence {
    /// Adapter with a storage capability
    pub fn with_storage(storage: impl KeyValueStorage + 'static) -> Self {
        Self {
            storage: Some(Box::new(storage)),
        }
    }

    /// Adapter without storage
    pub fn headless() -> Self {
        Self { storage: None }
    }

    pub fn has_storage(&self) -> bool {
        self.storage.is_some()
    }

    pub fn storage(&self) -> Option<&dyn KeyValueStorage> {
        self.storage.as_deref()
    }

    /// Read the note list from the slot.
    ///
    /// Returns `None` when there is nothing to load: headless, empty slot,
    /// or a slot that is not a note list (logged, left as is).
    pub fn load(&self) -> Result<Option<Vec<Note>>> {
        let Some(storage) = self.storage.as_deref() else {
            return Ok(None);
        };

        let raw = match storage.get(STORAGE_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                tracing::debug!(key = STORAGE_KEY, "storage slot is empty");
                return Ok(None);
            }
            Err(NotasError::MalformedSlot { reason, .. }) => {
                tracing::error!(key = STORAGE_KEY, error = %reason, "Error parsing notes");
                return Ok(None);
            }
            Err(e) => return Err(e),
        };

        match serde_json::from_str::<Vec<Note>>(&raw) {
            Ok(notes) => {
                tracing::debug!(key = STORAGE_KEY, count = notes.len(), "loaded notes");
                Ok(Some(notes))
            }
            Err(e) => {
                tracing::error!(key = STORAGE_KEY, error = %e, "Error parsing notes");
                Ok(None)
            }
        }
    }

    /// Serialize the full list and write it to the slot.
    pub fn save(&mut self, notes: &[Note]) -> Result<()> {
        let Some(storage) = self.storage.as_deref_mut() else {
            return Ok(());
        };

        let raw = serde_json::to_string(notes)?;
        storage.set(STORAGE_KEY, &raw)
    }
}

impl fmt::Debug for Persistence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Persistence")
            .field("has_storage", &self.has_storage())
            .finish()
    }
}
