//! In-memory key-value store.

use std::collections::HashMap;
use std::io;

use parking_lot::Mutex;

use crate::error::Result;
use crate::port::outbound::storage::KeyValueStore;

/// [`KeyValueStore`] backed by a map, with switchable read and write failures.
#[derive(Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
    fail_reads: Mutex<bool>,
    fail_writes: Mutex<bool>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with one record.
    pub fn with_entry(key: &str, value: &str) -> Self {
        let store = Self::new();
        store
            .entries
            .lock()
            .insert(key.to_string(), value.to_string());
        store
    }

    /// Make every subsequent `get` fail.
    pub fn fail_reads(&self, fail: bool) {
        *self.fail_reads.lock() = fail;
    }

    /// Make every subsequent `set` fail.
    pub fn fail_writes(&self, fail: bool) {
        *self.fail_writes.lock() = fail;
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        if *self.fail_reads.lock() {
            return Err(io::Error::new(io::ErrorKind::PermissionDenied, "read blocked").into());
        }
        Ok(self.entries.lock().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        if *self.fail_writes.lock() {
            return Err(io::Error::new(io::ErrorKind::Other, "disk full").into());
        }
        self.entries
            .lock()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}
