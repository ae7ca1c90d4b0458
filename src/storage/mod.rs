mod kv;
mod note_store;
mod persistence;

pub use kv::{FileStorage, KeyValueStorage, MemoryStorage};
pub use note_store::NoteStore;
pub use persistence::{Persistence, STORAGE_KEY};
