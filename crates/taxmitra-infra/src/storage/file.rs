//! Filesystem-backed slot storage.
//!
//! Each slot is one JSON document at `{dir}/{slot}.json`. Writes go through
//! a temp file followed by a rename, so a slot is either fully replaced or
//! left at its previous value.

use std::path::PathBuf;

use taxmitra_core::persistence::SlotStore;
use taxmitra_types::error::PersistenceError;

/// Filesystem implementation of `SlotStore`.
///
/// All I/O goes through `tokio::fs`. The directory is created on first
/// write.
pub struct FileSlotStore {
    dir: PathBuf,
}

impl FileSlotStore {
    /// Create a store rooted at the given directory.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Path of the file backing a slot.
    pub fn slot_path(&self, slot: &str) -> PathBuf {
        self.dir.join(format!("{slot}.json"))
    }
}

impl SlotStore for FileSlotStore {
    async fn read(&self, slot: &str) -> Result<Option<String>, PersistenceError> {
        match tokio::fs::read_to_string(self.slot_path(slot)).await {
            Ok(content) => Ok(Some(content)),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(unavailable(slot, "read", &err)),
        }
    }

    async fn write(&self, slot: &str, value: &str) -> Result<(), PersistenceError> {
        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|err| unavailable(slot, "prepare directory for", &err))?;

        // Write the new value next to the target, then swap it in. The
        // rename either lands completely or leaves the old file in place.
        let target = self.slot_path(slot);
        let staging = self.dir.join(format!("{slot}.json.tmp"));
        tokio::fs::write(&staging, value)
            .await
            .map_err(|err| unavailable(slot, "stage", &err))?;
        tokio::fs::rename(&staging, &target)
            .await
            .map_err(|err| unavailable(slot, "commit", &err))?;

        Ok(())
    }
}

fn unavailable(slot: &str, action: &str, err: &std::io::Error) -> PersistenceError {
    PersistenceError::Unavailable(format!("failed to {action} slot '{slot}': {err}"))
}

/// Resolve the default data directory.
///
/// Platform data dir (e.g. `~/.local/share/taxmitra` on Linux) with a
/// home-directory fallback, then the current directory as a last resort.
pub fn resolve_data_dir() -> PathBuf {
    if let Some(base) = dirs::data_dir() {
        return base.join("taxmitra");
    }
    if let Some(home) = dirs::home_dir() {
        return home.join(".taxmitra");
    }
    PathBuf::from(".taxmitra")
}

/// Default store rooted at [`resolve_data_dir`].
pub fn default_store() -> FileSlotStore {
    FileSlotStore::new(resolve_data_dir())
}
