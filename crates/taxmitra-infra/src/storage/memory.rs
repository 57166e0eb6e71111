//! In-memory slot storage.
//!
//! Backs tests and sessions that run without durable state. Clones share
//! the same underlying map, which lets a caller keep a handle for
//! inspection after handing the store to a controller.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use taxmitra_core::persistence::SlotStore;
use taxmitra_types::error::PersistenceError;

/// In-memory implementation of `SlotStore`.
#[derive(Debug, Clone, Default)]
pub struct MemorySlotStore {
    slots: Arc<Mutex<HashMap<String, String>>>,
}

impl MemorySlotStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current value of a slot, for assertions.
    pub fn snapshot(&self, slot: &str) -> Option<String> {
        self.slots.lock().ok()?.get(slot).cloned()
    }

    /// Seed a slot directly, bypassing the gateway.
    pub fn seed(&self, slot: &str, value: &str) {
        if let Ok(mut slots) = self.slots.lock() {
            slots.insert(slot.to_string(), value.to_string());
        }
    }
}

impl SlotStore for MemorySlotStore {
    async fn read(&self, slot: &str) -> Result<Option<String>, PersistenceError> {
        let slots = self
            .slots
            .lock()
            .map_err(|_| PersistenceError::Unavailable("slot map poisoned".to_string()))?;
        Ok(slots.get(slot).cloned())
    }

    async fn write(&self, slot: &str, value: &str) -> Result<(), PersistenceError> {
        let mut slots = self
            .slots
            .lock()
            .map_err(|_| PersistenceError::Unavailable("slot map poisoned".to_string()))?;
        slots.insert(slot.to_string(), value.to_string());
        Ok(())
    }
}
