use std::cell::RefCell;
use std::rc::Rc;

use thiserror::Error;

/// Failure of the durable slot itself.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage is unavailable: {0}")]
    Unavailable(String),
    #[error("storage rejected the write: {0}")]
    WriteRejected(String),
}

/// One named durable slot holding the serialized snapshot.
pub trait SnapshotStore {
    /// Read the slot. `Ok(None)` when nothing was saved.
    fn read(&self) -> Result<Option<String>, StoreError>;
    /// Overwrite the slot.
    fn write(&mut self, payload: &str) -> Result<(), StoreError>;
    /// Delete the slot.
    fn clear(&mut self) -> Result<(), StoreError>;
}

/// In-memory slot. Clones share the same slot, so a test can keep one
/// handle while a session owns the other.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    slot: Rc<RefCell<Option<String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-filled slot.
    pub fn with_payload(payload: impl Into<String>) -> Self {
        Self { slot: Rc::new(RefCell::new(Some(payload.into()))) }
    }

    /// Current slot contents.
    pub fn payload(&self) -> Option<String> {
        self.slot.borrow().clone()
    }
}

impl SnapshotStore for MemoryStore {
    fn read(&self) -> Result<Option<String>, StoreError> {
        Ok(self.slot.borrow().clone())
    }

    fn write(&mut self, payload: &str) -> Result<(), StoreError> {
        *self.slot.borrow_mut() = Some(payload.to_string());
        Ok(())
    }

    fn clear(&mut self) -> Result<(), StoreError> {
        *self.slot.borrow_mut() = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_store_round_trip() {
        let mut store = MemoryStore::new();
        assert_eq!(store.read().unwrap(), None);
        store.write("abc").unwrap();
        assert_eq!(store.read().unwrap().as_deref(), Some("abc"));
        store.clear().unwrap();
        assert_eq!(store.read().unwrap(), None);
    }

    #[test]
    fn clones_share_slot() {
        let observer = MemoryStore::new();
        let mut owner = observer.clone();
        owner.write("shared").unwrap();
        assert_eq!(observer.payload().as_deref(), Some("shared"));
    }
}
