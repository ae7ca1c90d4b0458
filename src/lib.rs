pub mod cli;
pub mod clock;
pub mod config;
pub mod entity;
pub mod error;
pub mod format;
pub mod pwa;
pub mod storage;

pub use clock::{Clock, SystemClock};
pub use entity::{Note, NoteUpdate};
pub use error::{NotasError, Result};
pub use format::{format_date, format_date_in, Locale};
pub use storage::{FileStorage, KeyValueStorage, MemoryStorage, NoteStore, Persistence};
