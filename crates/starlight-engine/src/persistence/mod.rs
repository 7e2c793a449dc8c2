//! Snapshot persistence.
//!
//! Saving is fire-and-forget and loading never fails: anything that cannot
//! be restored is logged and replaced by the default state.

pub mod snapshot;
pub mod store;

pub use snapshot::{decode, encode, SnapshotError, SNAPSHOT_VERSION};
pub use store::{MemoryStore, SnapshotStore, StoreError};

use crate::catalog::Catalog;
use crate::progression::GameState;

/// Restore the saved state, if there is a usable one.
pub fn load<S: SnapshotStore + ?Sized>(store: &S, catalog: &Catalog) -> Option<GameState> {
    let payload = match store.read() {
        Ok(Some(payload)) => payload,
        Ok(None) => return None,
        Err(e) => {
            log::warn!("Failed to read saved progress: {e}");
            return None;
        }
    };
    match decode(catalog, &payload) {
        Ok(state) => Some(state),
        Err(e) => {
            log::warn!("Discarding saved progress: {e}");
            None
        }
    }
}

/// Overwrite the slot with `state`. Failures are logged and swallowed.
pub fn save<S: SnapshotStore + ?Sized>(store: &mut S, state: &GameState) {
    let result = encode(state)
        .map_err(|e| e.to_string())
        .and_then(|payload| store.write(&payload).map_err(|e| e.to_string()));
    if let Err(e) = result {
        log::warn!("Failed to save progress: {e}");
    }
}

/// Delete the slot. Failures are logged and swallowed.
pub fn clear<S: SnapshotStore + ?Sized>(store: &mut S) {
    if let Err(e) = store.clear() {
        log::warn!("Failed to clear saved progress: {e}");
    }
}
