/// Snapshot storage — where a saved `GameState` lives between sessions.

use rustc_hash::FxHashMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::schema::state::GameState;

/// Slot the engine saves to unless configured otherwise.
pub const DEFAULT_SLOT: &str = "cw_phase2_save";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("store is read-only, cannot write slot {slot:?}")]
    ReadOnly { slot: String },
}

/// Why a snapshot could not be loaded.
#[derive(Debug, Error)]
pub enum LoadFailure {
    #[error("no snapshot in slot {slot:?}")]
    Missing { slot: String },
    #[error("store read failed: {0}")]
    Unreadable(#[source] StoreError),
    #[error("corrupt snapshot: {0}")]
    Corrupt(#[from] ron::error::SpannedError),
}

#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("save unavailable: {0}")]
    SaveUnavailable(#[source] StoreError),
    #[error("load failed: {0}")]
    LoadMissingOrCorrupt(#[from] LoadFailure),
}

/// A place that keeps one opaque payload per named slot.
pub trait SnapshotStore {
    fn write(&mut self, slot: &str, payload: &str) -> Result<(), StoreError>;
    fn read(&self, slot: &str) -> Result<Option<String>, StoreError>;
}

/// Serialize a state into the snapshot payload format (RON).
pub fn encode(state: &GameState) -> Result<String, ron::Error> {
    ron::ser::to_string_pretty(state, ron::ser::PrettyConfig::default())
}

/// Parse a snapshot payload. No validation beyond the parse itself.
pub fn decode(payload: &str) -> Result<GameState, ron::error::SpannedError> {
    ron::from_str(payload)
}

/// Slot table held in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    slots: FxHashMap<String, String>,
    read_only: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store that rejects every write, as a full or locked-down backend would.
    pub fn read_only() -> Self {
        Self {
            slots: FxHashMap::default(),
            read_only: true,
        }
    }

    /// Put a raw payload into a slot, bypassing the read-only flag.
    pub fn seed(&mut self, slot: &str, payload: &str) {
        self.slots.insert(slot.to_string(), payload.to_string());
    }

    pub fn get(&self, slot: &str) -> Option<&str> {
        self.slots.get(slot).map(String::as_str)
    }
}

impl SnapshotStore for MemoryStore {
    fn write(&mut self, slot: &str, payload: &str) -> Result<(), StoreError> {
        if self.read_only {
            return Err(StoreError::ReadOnly {
                slot: slot.to_string(),
            });
        }
        self.slots.insert(slot.to_string(), payload.to_string());
        Ok(())
    }

    fn read(&self, slot: &str) -> Result<Option<String>, StoreError> {
        Ok(self.slots.get(slot).cloned())
    }
}

/// One `<slot>.ron` file per slot under a root directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn slot_path(&self, slot: &str) -> PathBuf {
        self.root.join(format!("{slot}.ron"))
    }
}

impl SnapshotStore for FileStore {
    fn write(&mut self, slot: &str, payload: &str) -> Result<(), StoreError> {
        std::fs::create_dir_all(&self.root)?;
        std::fs::write(self.slot_path(slot), payload)?;
        Ok(())
    }

    fn read(&self, slot: &str) -> Result<Option<String>, StoreError> {
        match std::fs::read_to_string(self.slot_path(slot)) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StoreError::Io(e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::scene::Scene;

    #[test]
    fn encode_decode_preserves_state() {
        let mut state = GameState::initial();
        state.scene = Scene::CeresArrive;
        state.spend_fuel(2);
        state.gold_found = true;

        let payload = encode(&state).unwrap();
        assert_eq!(decode(&payload).unwrap(), state);
    }

    #[test]
    fn decode_rejects_garbage() {
        assert!(decode("not a snapshot").is_err());
        assert!(decode("(scene: MOON_BASE)").is_err());
    }

    #[test]
    fn memory_store_roundtrip() {
        let mut store = MemoryStore::new();
        assert_eq!(store.read("slot").unwrap(), None);
        store.write("slot", "payload").unwrap();
        assert_eq!(store.read("slot").unwrap().as_deref(), Some("payload"));
        store.write("slot", "newer").unwrap();
        assert_eq!(store.get("slot"), Some("newer"));
    }

    #[test]
    fn read_only_store_rejects_writes() {
        let mut store = MemoryStore::read_only();
        let err = store.write("slot", "payload").unwrap_err();
        assert!(matches!(err, StoreError::ReadOnly { ref slot } if slot == "slot"));
        assert_eq!(store.read("slot").unwrap(), None);

        store.seed("slot", "payload");
        assert_eq!(store.get("slot"), Some("payload"));
    }

    #[test]
    fn file_store_missing_slot_reads_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());
        assert_eq!(store.read(DEFAULT_SLOT).unwrap(), None);
    }

    #[test]
    fn file_store_writes_one_file_per_slot() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::new(dir.path().join("saves"));
        store.write(DEFAULT_SLOT, "(payload)").unwrap();

        let path = dir.path().join("saves").join("cw_phase2_save.ron");
        assert_eq!(store.slot_path(DEFAULT_SLOT), path);
        assert_eq!(std::fs::read_to_string(path).unwrap(), "(payload)");
        assert_eq!(
            store.read(DEFAULT_SLOT).unwrap().as_deref(),
            Some("(payload)")
        );
    }
}
