// src/entity/note.rs
use serde::{Deserialize, Serialize};

/// Title given to notes the user has not named yet.
pub const DEFAULT_TITLE: &str = "Sin título";

/// A single note as kept in the store and in the storage slot.
///
/// Timestamps are Unix epoch milliseconds. The id is the decimal
/// rendering of the creation timestamp.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: String,
    pub title: String,
    pub content: String,
    pub created_at: i64,
    pub updated_at: i64,
}

impl Note {
    pub fn new(created_at: i64) -> Self {
        Self {
            id: created_at.to_string(),
            title: DEFAULT_TITLE.to_string(),
            content: String::new(),
            created_at,
            updated_at: created_at,
        }
    }

    /// Merge `updates` into this note and stamp it with `now`.
    ///
    /// `id` and `created_at` are not part of the payload and never change.
    pub fn apply(&mut self, updates: NoteUpdate, now: i64) {
        if let Some(title) = updates.title {
            self.title = title;
        }
        if let Some(content) = updates.content {
            self.content = content;
        }
        self.updated_at = now;
    }
}

/// Update payload for a note
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteUpdate {
    pub title: Option<String>,
    pub content: Option<String>,
}

impl NoteUpdate {
    pub fn title(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            content: None,
        }
    }

    pub fn content(content: impl Into<String>) -> Self {
        Self {
            title: None,
            content: Some(content.into()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.content.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_note_defaults() {
        let note = Note::new(1_700_000_000_000);
        assert_eq!(note.id, "1700000000000");
        assert_eq!(note.title, DEFAULT_TITLE);
        assert!(note.content.is_empty());
        assert_eq!(note.created_at, note.updated_at);
    }

    #[test]
    fn test_apply_merges_only_given_fields() {
        let mut note = Note::new(1_000);
        note.content = "keep me".to_string();

        note.apply(NoteUpdate::title("Groceries"), 5_000);

        assert_eq!(note.title, "Groceries");
        assert_eq!(note.content, "keep me");
        assert_eq!(note.id, "1000");
        assert_eq!(note.created_at, 1_000);
        assert_eq!(note.updated_at, 5_000);
    }

    #[test]
    fn test_empty_update_still_refreshes_timestamp() {
        let mut note = Note::new(1_000);
        note.apply(NoteUpdate::default(), 2_000);
        assert_eq!(note.title, DEFAULT_TITLE);
        assert_eq!(note.updated_at, 2_000);
    }

    #[test]
    fn test_wire_format_is_camel_case() {
        let note = Note::new(42);
        let json = serde_json::to_value(&note).unwrap();
        assert_eq!(json["createdAt"], 42);
        assert_eq!(json["updatedAt"], 42);
        assert_eq!(json["id"], "42");
        assert!(json.get("created_at").is_none());
    }

    #[test]
    fn test_reads_slot_written_by_web_app() {
        let raw = r#"[{"id":"1721040000000","title":"Compras","content":"pan, leche","createdAt":1721040000000,"updatedAt":1721040123456}]"#;
        let notes: Vec<Note> = serde_json::from_str(raw).unwrap();
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].title, "Compras");
        assert_eq!(notes[0].updated_at, 1_721_040_123_456);
    }
}
