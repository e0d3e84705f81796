//! Persistence collaborator: a string-only key/value store.
//!
//! Each logical collection lives under exactly one stable key and is
//! JSON-encoded by its owner before it reaches the store.

mod memory;
mod sqlite;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

use crate::errors::AppResult;
use serde::Serialize;
use serde::de::DeserializeOwned;

pub const TIMELINE_KEY: &str = "timeline_events";
pub const MEDICATIONS_KEY: &str = "medication_schedules";
pub const TWIN_KEY: &str = "digital_twin";

pub trait KeyValueStore {
    fn get(&self, key: &str) -> AppResult<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> AppResult<()>;
}

/// Read and decode the value stored under `key`.
///
/// Missing keys, read failures and malformed JSON all yield `None`;
/// the last two are logged.
pub(crate) fn read_json<S, T>(store: &S, key: &str) -> Option<T>
where
    S: KeyValueStore + ?Sized,
    T: DeserializeOwned,
{
    let raw = match store.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return None,
        Err(e) => {
            tracing::error!(key, "Failed to read from storage: {e}");
            return None;
        }
    };

    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!(key, "Discarding malformed stored data: {e}");
            None
        }
    }
}

/// Encode and write `value` under `key`. Failures are logged, never returned.
pub(crate) fn write_json<S, T>(store: &mut S, key: &str, value: &T) -> bool
where
    S: KeyValueStore + ?Sized,
    T: Serialize + ?Sized,
{
    let encoded = match serde_json::to_string(value) {
        Ok(s) => s,
        Err(e) => {
            tracing::error!(key, "Failed to encode data for storage: {e}");
            return false;
        }
    };

    match store.set(key, &encoded) {
        Ok(()) => true,
        Err(e) => {
            tracing::error!(key, "Failed to persist to storage: {e}");
            false
        }
    }
}
