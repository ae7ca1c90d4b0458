mod note;

pub use note::{Note, NoteUpdate, DEFAULT_TITLE};
