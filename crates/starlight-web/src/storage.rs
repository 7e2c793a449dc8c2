use starlight_engine::{SnapshotStore, StoreError};
use web_sys::Storage;

/// Snapshot slot backed by `window.localStorage`.
///
/// Private browsing modes may refuse storage entirely; every call then
/// reports `Unavailable` and the session carries on without persistence.
pub struct LocalStorageStore {
    key: String,
}

impl LocalStorageStore {
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }

    fn storage(&self) -> Result<Storage, StoreError> {
        let window = web_sys::window().ok_or_else(|| StoreError::Unavailable("no window".into()))?;
        window
            .local_storage()
            .map_err(|e| StoreError::Unavailable(format!("{e:?}")))?
            .ok_or_else(|| StoreError::Unavailable("localStorage is disabled".into()))
    }
}

impl SnapshotStore for LocalStorageStore {
    fn read(&self) -> Result<Option<String>, StoreError> {
        self.storage()?
            .get_item(&self.key)
            .map_err(|e| StoreError::Unavailable(format!("{e:?}")))
    }

    fn write(&mut self, payload: &str) -> Result<(), StoreError> {
        self.storage()?
            .set_item(&self.key, payload)
            .map_err(|e| StoreError::WriteRejected(format!("{e:?}")))
    }

    fn clear(&mut self) -> Result<(), StoreError> {
        self.storage()?
            .remove_item(&self.key)
            .map_err(|e| StoreError::Unavailable(format!("{e:?}")))
    }
}
