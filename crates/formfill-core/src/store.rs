//! Canonical field value store
//!
//! One mutable handle → value map is the single source of truth for every
//! editing surface. Mutations publish to an explicit subscriber list;
//! subscribers only record what changed and pull the current value when
//! they act, which keeps update ordering explicit and avoids re-entrant
//! cycles.

use crate::registry::{FieldHandle, IdentityRegistry};
use std::collections::{BTreeMap, HashMap};

/// Notification callback registered on the store. Called with the mutated
/// handle; the subscriber pulls the current value when it does its work.
pub type StoreListener = Box<dyn FnMut(FieldHandle)>;

#[derive(Default)]
pub struct FieldValueStore {
    values: HashMap<FieldHandle, String>,
    listeners: Vec<StoreListener>,
}

impl FieldValueStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current value for a handle; unknown handles read as empty.
    ///
    /// The empty default covers transient widget/registry races during
    /// load and teardown; it is a documented default, not an error.
    pub fn get_value(&self, handle: FieldHandle) -> &str {
        self.values.get(&handle).map(String::as_str).unwrap_or("")
    }

    /// Write a value and notify every subscriber. Always succeeds.
    pub fn set_value(&mut self, handle: FieldHandle, value: impl Into<String>) {
        self.values.insert(handle, value.into());
        for listener in &mut self.listeners {
            listener(handle);
        }
    }

    pub fn subscribe(&mut self, listener: StoreListener) {
        self.listeners.push(listener);
    }

    /// fieldKey → value snapshot, for drafts and submission.
    pub fn snapshot(&self, registry: &IdentityRegistry) -> BTreeMap<String, String> {
        let mut out = BTreeMap::new();
        for (&handle, value) in &self.values {
            if let Some(key) = registry.key_for(handle) {
                out.insert(key.to_string(), value.clone());
            }
        }
        out
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Clear all values. Subscriptions survive; the map itself is never
    /// replaced.
    pub fn reset(&mut self) {
        self.values.clear();
    }
}

impl std::fmt::Debug for FieldValueStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FieldValueStore")
            .field("values", &self.values)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
