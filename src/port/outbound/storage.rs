//! Durable key-value storage port.

use crate::error::Result;

/// Small durable string store keyed by name.
///
/// Writes are synchronous: once [`set`](Self::set) returns, a subsequent
/// [`get`](Self::get) observes the new value, including from a new process.
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`, or `None` if nothing was stored.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing storage exists but cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Overwrite the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the value cannot be persisted.
    fn set(&self, key: &str, value: &str) -> Result<()>;
}
