use crate::clock::Clock;
use crate::entity::{Note, NoteUpdate};
use crate::error::Result;

use super::Persistence;

/// In-memory list of notes, newest first, mirrored to storage after every
/// mutation.
pub struct NoteStore {
    notes: Vec<Note>,
    persistence: Persistence,
    clock: Box<dyn Clock>,
}

impl NoteStore {
    /// Open a store and load whatever the storage slot holds
    pub fn open(persistence: Persistence, clock: impl Clock + 'static) -> Result<Self> {
        let mut store = Self {
            notes: Vec::new(),
            persistence,
            clock: Box::new(clock),
        };
        store.reload()?;
        Ok(store)
    }

    /// Replace the in-memory list with the storage slot's contents.
    ///
    /// Leaves the list untouched when there is nothing loadable.
    pub fn reload(&mut self) -> Result<()> {
        if let Some(notes) = self.persistence.load()? {
            self.notes = notes;
        }
        Ok(())
    }

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    pub fn persistence(&self) -> &Persistence {
        &self.persistence
    }

    /// Create an untitled, empty note at the head of the list
    pub fn create(&mut self) -> Result<Note> {
        self.create_with(NoteUpdate::default())
    }

    /// Create a note at the head of the list with `fields` already applied.
    ///
    /// Both timestamps are equal and the slot is written once.
    pub fn create_with(&mut self, fields: NoteUpdate) -> Result<Note> {
        let created_at = self.next_free_timestamp(self.clock.now_millis());
        let mut note = Note::new(created_at);
        note.apply(fields, created_at);

        self.notes.insert(0, note.clone());
        if let Err(e) = self.save() {
            self.notes.remove(0);
            return Err(e);
        }

        tracing::info!(id = %note.id, "created note");
        Ok(note)
    }

    /// Merge `updates` into the note with `id`.
    ///
    /// Returns `false` and changes nothing when no such note exists.
    pub fn update(&mut self, id: &str, updates: NoteUpdate) -> Result<bool> {
        let now = self.clock.now_millis();
        let Some(index) = self.notes.iter().position(|n| n.id == id) else {
            tracing::debug!(id, "update skipped, no such note");
            return Ok(false);
        };

        let previous = self.notes[index].clone();
        self.notes[index].apply(updates, now);
        if let Err(e) = self.save() {
            self.notes[index] = previous;
            return Err(e);
        }

        tracing::info!(id, "updated note");
        Ok(true)
    }

    /// Remove the note with `id`, returning it if it existed
    pub fn delete(&mut self, id: &str) -> Result<Option<Note>> {
        let Some(index) = self.notes.iter().position(|n| n.id == id) else {
            tracing::debug!(id, "delete skipped, no such note");
            return Ok(None);
        };

        let removed = self.notes.remove(index);
        if let Err(e) = self.save() {
            self.notes.insert(index, removed);
            return Err(e);
        }

        tracing::info!(id, "deleted note");
        Ok(Some(removed))
    }

    pub fn get(&self, id: &str) -> Option<&Note> {
        self.notes.iter().find(|n| n.id == id)
    }

    /// Ids come from the creation time; step forward past any that are taken.
    fn next_free_timestamp(&self, now: i64) -> i64 {
        let mut candidate = now;
        while self.get(&candidate.to_string()).is_some() {
            candidate += 1;
        }
        candidate
    }

    fn save(&mut self) -> Result<()> {
        self.persistence.save(&self.notes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    use crate::clock::FixedClock;
    use crate::entity::DEFAULT_TITLE;
    use crate::error::NotasError;
    use crate::storage::{KeyValueStorage, MemoryStorage, STORAGE_KEY};

    const T0: i64 = 1_721_040_000_000;

    /// Memory storage whose writes can be switched to fail
    #[derive(Default)]
    struct FlakyStorage {
        inner: MemoryStorage,
        fail_writes: Rc<Cell<bool>>,
    }

    impl KeyValueStorage for FlakyStorage {
        fn get(&self, key: &str) -> Result<Option<String>> {
            self.inner.get(key)
        }

        fn set(&mut self, key: &str, value: &str) -> Result<()> {
            if self.fail_writes.get() {
                return Err(NotasError::Io(std::io::Error::other("disk full")));
            }
            self.inner.set(key, value)
        }
    }

    fn flaky_store(clock: &FixedClock) -> (NoteStore, Rc<Cell<bool>>) {
        let storage = FlakyStorage::default();
        let fail_writes = storage.fail_writes.clone();
        let store = NoteStore::open(Persistence::with_storage(storage), clock.clone()).unwrap();
        (store, fail_writes)
    }

    fn memory_store(clock: &FixedClock) -> NoteStore {
        NoteStore::open(
            Persistence::with_storage(MemoryStorage::new()),
            clock.clone(),
        )
        .unwrap()
    }

    fn stored_notes(store: &NoteStore) -> Vec<Note> {
        let raw = store
            .persistence()
            .storage()
            .unwrap()
            .get(STORAGE_KEY)
            .unwrap()
            .unwrap();
        serde_json::from_str(&raw).unwrap()
    }

    #[test]
    fn test_create_lists_newest_first() {
        let clock = FixedClock::new(T0);
        let mut store = memory_store(&clock);

        let mut created = Vec::new();
        for _ in 0..5 {
            created.push(store.create().unwrap());
            clock.advance(1_000);
        }

        assert_eq!(store.len(), 5);
        let ids: Vec<&str> = store.notes().iter().map(|n| n.id.as_str()).collect();
        let expected: Vec<&str> = created.iter().rev().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, expected);
    }

    #[test]
    fn test_create_defaults_and_persists() {
        let clock = FixedClock::new(T0);
        let mut store = memory_store(&clock);

        let note = store.create().unwrap();

        assert_eq!(note.id, T0.to_string());
        assert_eq!(note.title, DEFAULT_TITLE);
        assert_eq!(note.content, "");
        assert_eq!(note.created_at, T0);
        assert_eq!(note.updated_at, T0);
        assert_eq!(stored_notes(&store), vec![note]);
    }

    #[test]
    fn test_ids_stay_unique_within_one_millisecond() {
        let clock = FixedClock::new(T0);
        let mut store = memory_store(&clock);

        let a = store.create().unwrap();
        let b = store.create().unwrap();
        let c = store.create().unwrap();

        assert_eq!(a.id, T0.to_string());
        assert_eq!(b.id, (T0 + 1).to_string());
        assert_eq!(c.id, (T0 + 2).to_string());
        assert_eq!(c.created_at, T0 + 2);
    }

    #[test]
    fn test_update_merges_and_refreshes_timestamp() {
        let clock = FixedClock::new(T0);
        let mut store = memory_store(&clock);
        let note = store.create().unwrap();

        clock.advance(60_000);
        let applied = store
            .update(&note.id, NoteUpdate::content("leche, pan"))
            .unwrap();
        assert!(applied);

        clock.advance(60_000);
        store.update(&note.id, NoteUpdate::title("Compras")).unwrap();

        let updated = store.get(&note.id).unwrap();
        assert_eq!(updated.id, note.id);
        assert_eq!(updated.created_at, T0);
        assert_eq!(updated.updated_at, T0 + 120_000);
        assert_eq!(updated.title, "Compras");
        assert_eq!(updated.content, "leche, pan");
        assert_eq!(stored_notes(&store)[0], *updated);
    }

    #[test]
    fn test_update_unknown_id_is_noop() {
        let clock = FixedClock::new(T0);
        let mut store = memory_store(&clock);
        store.create().unwrap();
        let before = store.notes().to_vec();

        clock.advance(5_000);
        let applied = store.update("nope", NoteUpdate::title("x")).unwrap();

        assert!(!applied);
        assert_eq!(store.notes(), before.as_slice());
        assert_eq!(stored_notes(&store), before);
    }

    #[test]
    fn test_delete_removes_only_target() {
        let clock = FixedClock::new(T0);
        let mut store = memory_store(&clock);
        let a = store.create().unwrap();
        clock.advance(1);
        let b = store.create().unwrap();
        clock.advance(1);
        let c = store.create().unwrap();

        let removed = store.delete(&b.id).unwrap();

        assert_eq!(removed, Some(b.clone()));
        assert!(store.get(&b.id).is_none());
        assert_eq!(store.notes(), &[c, a][..]);
        assert_eq!(stored_notes(&store).len(), 2);
    }

    #[test]
    fn test_delete_unknown_id_is_noop() {
        let clock = FixedClock::new(T0);
        let mut store = memory_store(&clock);
        store.create().unwrap();

        assert_eq!(store.delete("missing").unwrap(), None);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_get_missing_is_none() {
        let clock = FixedClock::new(T0);
        let store = memory_store(&clock);
        assert!(store.get("1").is_none());
    }

    #[test]
    fn test_open_loads_existing_slot() {
        let clock = FixedClock::new(T0);
        let mut storage = MemoryStorage::new();
        let saved = vec![Note::new(T0 - 10), Note::new(T0 - 20)];
        storage
            .set(STORAGE_KEY, &serde_json::to_string(&saved).unwrap())
            .unwrap();

        let store = NoteStore::open(Persistence::with_storage(storage), clock).unwrap();

        assert_eq!(store.notes(), saved.as_slice());
    }

    #[test]
    fn test_malformed_slot_opens_empty_and_next_write_replaces_it() {
        let clock = FixedClock::new(T0);
        let mut storage = MemoryStorage::new();
        storage.set(STORAGE_KEY, "not json at all").unwrap();

        let mut store = NoteStore::open(Persistence::with_storage(storage), clock).unwrap();
        assert!(store.is_empty());

        let note = store.create().unwrap();
        assert_eq!(stored_notes(&store), vec![note]);
    }

    #[test]
    fn test_headless_store_works_in_memory() {
        let clock = FixedClock::new(T0);
        let mut store = NoteStore::open(Persistence::headless(), clock).unwrap();

        let note = store.create().unwrap();
        store.update(&note.id, NoteUpdate::title("solo")).unwrap();

        assert_eq!(store.get(&note.id).unwrap().title, "solo");
        assert!(!store.persistence().has_storage());
    }

    #[test]
    fn test_reload_replaces_list() {
        let clock = FixedClock::new(T0);
        let mut store = memory_store(&clock);
        store.create().unwrap();
        store.create().unwrap();

        store.reload().unwrap();

        assert_eq!(store.len(), 2);
        assert_eq!(store.notes()[0].id, (T0 + 1).to_string());
    }

    #[test]
    fn test_create_with_applies_fields_in_one_write() {
        let clock = FixedClock::new(T0);
        let mut store = memory_store(&clock);

        let note = store
            .create_with(NoteUpdate {
                title: Some("Compras".to_string()),
                content: Some("leche".to_string()),
            })
            .unwrap();

        assert_eq!(note.title, "Compras");
        assert_eq!(note.content, "leche");
        assert_eq!(note.created_at, T0);
        assert_eq!(note.updated_at, note.created_at);
        assert_eq!(stored_notes(&store), vec![note]);
    }

    #[test]
    fn test_failed_create_leaves_store_unchanged() {
        let clock = FixedClock::new(T0);
        let (mut store, fail_writes) = flaky_store(&clock);
        store.create().unwrap();
        let before = store.notes().to_vec();

        fail_writes.set(true);
        clock.advance(1_000);
        assert!(store.create().is_err());

        assert_eq!(store.notes(), before.as_slice());
        assert_eq!(stored_notes(&store), before);
    }

    #[test]
    fn test_failed_update_leaves_note_unchanged() {
        let clock = FixedClock::new(T0);
        let (mut store, fail_writes) = flaky_store(&clock);
        let note = store.create().unwrap();

        fail_writes.set(true);
        clock.advance(1_000);
        assert!(store.update(&note.id, NoteUpdate::title("x")).is_err());

        assert_eq!(store.get(&note.id), Some(&note));
        assert_eq!(stored_notes(&store), vec![note]);
    }

    #[test]
    fn test_failed_delete_keeps_note_in_place() {
        let clock = FixedClock::new(T0);
        let (mut store, fail_writes) = flaky_store(&clock);
        store.create().unwrap();
        clock.advance(1);
        let middle = store.create().unwrap();
        clock.advance(1);
        store.create().unwrap();
        let before = store.notes().to_vec();

        fail_writes.set(true);
        assert!(store.delete(&middle.id).is_err());

        assert_eq!(store.notes(), before.as_slice());
        assert_eq!(stored_notes(&store), before);
    }
}
