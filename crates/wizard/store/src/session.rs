//! The in-memory session store.
//!
//! All operations are synchronous and idempotent: repeated `save`
//! overwrites, repeated `clear` is a no-op after the first. A `save`
//! queues a `DataUpdated` notification; the runtime drains the queue and
//! forwards it onto the event bus, so the store itself never calls back
//! into other components.

use crate::keys::StoreKey;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::BTreeMap;
use wizard_types::{WizardEvent, WizardResult};

/// Session-scoped key/value cache of JSON values.
#[derive(Clone, Debug, Default)]
pub struct SessionStore {
    entries: BTreeMap<String, serde_json::Value>,
    pending: Vec<WizardEvent>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serialize `value` and store it under `key`, overwriting any previous
    /// entry, and queue a `DataUpdated` notification.
    pub fn save<T: Serialize>(&mut self, key: StoreKey, value: &T) -> WizardResult<()> {
        let data = serde_json::to_value(value)?;
        let key = key.to_string();
        tracing::debug!(%key, "store save");
        self.pending.push(WizardEvent::DataUpdated {
            key: key.clone(),
            data: data.clone(),
        });
        self.entries.insert(key, data);
        Ok(())
    }

    /// Load and deserialize the value under `key`; `None` if never set or
    /// cleared since.
    pub fn load<T: DeserializeOwned>(&self, key: StoreKey) -> WizardResult<Option<T>> {
        match self.entries.get(&key.to_string()) {
            Some(value) => Ok(Some(serde_json::from_value(value.clone())?)),
            None => Ok(None),
        }
    }

    /// Remove the entry under `key`. Idempotent.
    pub fn clear(&mut self, key: StoreKey) {
        self.entries.remove(&key.to_string());
    }

    pub fn contains(&self, key: StoreKey) -> bool {
        self.entries.contains_key(&key.to_string())
    }

    /// Drop every entry. The abandonment path.
    pub fn wipe(&mut self) {
        tracing::debug!(entries = self.entries.len(), "store wiped");
        self.entries.clear();
    }

    /// Copy the value under `from` in this store to `to` in `target`.
    /// Absent source values copy nothing.
    pub fn copy_to(&self, from: StoreKey, target: &mut SessionStore, to: StoreKey) {
        if let Some(value) = self.entries.get(&from.to_string()) {
            target.entries.insert(to.to_string(), value.clone());
        }
    }

    /// Drain the queued `DataUpdated` notifications.
    pub fn take_notifications(&mut self) -> Vec<WizardEvent> {
        std::mem::take(&mut self.pending)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
