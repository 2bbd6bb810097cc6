//! Identity registry
//!
//! Bidirectional mapping between external field keys and process-local
//! synchronization handles. Handles are created at mapping-build time, are
//! deliberately not serializable, and are never reused across document
//! loads (the allocation counter survives a registry clear).

use std::collections::HashMap;

/// Process-local token identifying one field for the lifetime of a load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FieldHandle(u32);

/// Bidirectional field-key ↔ handle tables for one document session.
#[derive(Debug, Default)]
pub struct IdentityRegistry {
    by_key: HashMap<String, FieldHandle>,
    by_handle: HashMap<FieldHandle, String>,
    next: u32,
}

impl IdentityRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build (or extend) the mapping for a set of field keys.
    ///
    /// Idempotent per session: keys already mapped keep their handle, new
    /// keys are appended. Duplicate keys in the input collapse to one
    /// handle.
    pub fn build_mapping<'a>(&mut self, keys: impl IntoIterator<Item = &'a str>) {
        for key in keys {
            self.intern(key);
        }
    }

    /// Map one key, allocating a handle if it is new.
    pub fn intern(&mut self, key: &str) -> FieldHandle {
        if let Some(&handle) = self.by_key.get(key) {
            return handle;
        }
        let handle = FieldHandle(self.next);
        self.next += 1;
        self.by_key.insert(key.to_string(), handle);
        self.by_handle.insert(handle, key.to_string());
        handle
    }

    pub fn handle_for(&self, key: &str) -> Option<FieldHandle> {
        self.by_key.get(key).copied()
    }

    pub fn key_for(&self, handle: FieldHandle) -> Option<&str> {
        self.by_handle.get(&handle).map(String::as_str)
    }

    pub fn handles(&self) -> impl Iterator<Item = FieldHandle> + '_ {
        self.by_handle.keys().copied()
    }

    pub fn pairs(&self) -> impl Iterator<Item = (&str, FieldHandle)> + '_ {
        self.by_key.iter().map(|(k, &h)| (k.as_str(), h))
    }

    pub fn len(&self) -> usize {
        self.by_key.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_key.is_empty()
    }

    /// Drop all mappings while keeping the allocation counter, so handles
    /// from a previous load are never handed out again.
    pub fn clear(&mut self) {
        self.by_key.clear();
        self.by_handle.clear();
    }
}
