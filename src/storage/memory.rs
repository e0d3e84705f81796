use super::KeyValueStore;
use crate::errors::{AppError, AppResult};
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

#[derive(Debug, Default)]
struct Inner {
    values: HashMap<String, String>,
    fail_reads: bool,
    fail_writes: bool,
}

/// In-memory store. Clones share the same data, so a clone handed to a
/// freshly built store behaves like the same device storage after a restart.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    inner: Rc<RefCell<Inner>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent `get` fail.
    pub fn set_fail_reads(&self, fail: bool) {
        self.inner.borrow_mut().fail_reads = fail;
    }

    /// Make every subsequent `set` fail.
    pub fn set_fail_writes(&self, fail: bool) {
        self.inner.borrow_mut().fail_writes = fail;
    }

    /// Raw value under `key`, bypassing failure simulation.
    pub fn raw(&self, key: &str) -> Option<String> {
        self.inner.borrow().values.get(key).cloned()
    }

    /// Plant a raw value under `key`, bypassing failure simulation.
    pub fn put_raw(&self, key: &str, value: &str) {
        self.inner
            .borrow_mut()
            .values
            .insert(key.to_string(), value.to_string());
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> AppResult<Option<String>> {
        let inner = self.inner.borrow();
        if inner.fail_reads {
            return Err(AppError::StorageUnavailable(format!("read of '{key}'")));
        }
        Ok(inner.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> AppResult<()> {
        let mut inner = self.inner.borrow_mut();
        if inner.fail_writes {
            return Err(AppError::StorageUnavailable(format!("write of '{key}'")));
        }
        inner.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
