use thiserror::Error;

#[derive(Error, Debug)]
pub enum NotasError {
    #[error("Note not found: {0}")]
    NoteNotFound(String),

    #[error("Invalid storage key: {0:?}")]
    InvalidStorageKey(String),

    #[error("Malformed data in storage slot {key}: {reason}")]
    MalformedSlot { key: String, reason: String },

    #[error("Config error: {0}")]
    Config(String),

    #[error("Invalid PWA configuration:\n  {}", .0.join("\n  "))]
    InvalidPwaConfig(Vec<String>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

pub type Result<T> = std::result::Result<T, NotasError>;
