//! Single-slot project persistence.
//!
//! A canvas keeps one saved project under [`PROJECT_SLOT_KEY`]. Saving
//! overwrites it and loading replaces the document with its elements. The slot
//! holds an opaque JSON blob; decoding happens in the store.

use crate::project::{ProjectError, ProjectFile};
use crate::store::DocumentStore;
use thiserror::Error;

#[cfg(not(target_arch = "wasm32"))]
use std::fs;
#[cfg(not(target_arch = "wasm32"))]
use std::io;
#[cfg(not(target_arch = "wasm32"))]
use std::path::{Path, PathBuf};

/// Key of the saved-project slot.
pub const PROJECT_SLOT_KEY: &str = "design-project";

/// Storage errors.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Project(#[from] ProjectError),
}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// A place that holds at most one saved project blob.
pub trait ProjectSlot {
    /// Replace the slot's contents.
    fn write(&mut self, blob: String) -> StorageResult<()>;

    /// Read the slot; `None` if nothing was ever saved.
    fn read(&self) -> StorageResult<Option<String>>;
}

/// Slot kept in memory, for tests and hosts that persist elsewhere.
#[derive(Debug, Clone, Default)]
pub struct MemorySlot {
    blob: Option<String>,
}

impl MemorySlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw saved blob, if any.
    pub fn blob(&self) -> Option<&str> {
        self.blob.as_deref()
    }
}

impl ProjectSlot for MemorySlot {
    fn write(&mut self, blob: String) -> StorageResult<()> {
        self.blob = Some(blob);
        Ok(())
    }

    fn read(&self) -> StorageResult<Option<String>> {
        Ok(self.blob.clone())
    }
}

/// Slot backed by `design-project.json` in a directory.
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Clone)]
pub struct FileSlot {
    path: PathBuf,
}

#[cfg(not(target_arch = "wasm32"))]
impl FileSlot {
    /// Use `dir` for the slot file, creating the directory if needed.
    pub fn in_dir(dir: impl Into<PathBuf>) -> StorageResult<Self> {
        let dir = dir.into();
        if !dir.exists() {
            fs::create_dir_all(&dir)?;
            log::info!("Created project directory {}", dir.display());
        }
        Ok(Self {
            path: dir.join(format!("{}.json", PROJECT_SLOT_KEY)),
        })
    }

    /// Slot in the platform data directory.
    ///
    /// On Unix: `~/.local/share/vellum/`
    /// On Windows: `%LOCALAPPDATA%\vellum\`
    pub fn default_location() -> StorageResult<Self> {
        let base = dirs::data_local_dir().or_else(dirs::home_dir).ok_or_else(|| {
            io::Error::new(io::ErrorKind::NotFound, "Could not determine home directory")
        })?;
        Self::in_dir(base.join("vellum"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl ProjectSlot for FileSlot {
    fn write(&mut self, blob: String) -> StorageResult<()> {
        fs::write(&self.path, blob).map_err(|e| {
            log::warn!("Failed to write {}: {}", self.path.display(), e);
            StorageError::Io(e)
        })
    }

    fn read(&self) -> StorageResult<Option<String>> {
        match fs::read_to_string(&self.path) {
            Ok(blob) => Ok(Some(blob)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

impl DocumentStore {
    /// Save the current elements into `slot` under `name`.
    ///
    /// History and selection are left alone.
    pub fn save_to(
        &self,
        slot: &mut impl ProjectSlot,
        name: impl Into<String>,
    ) -> StorageResult<()> {
        let project = ProjectFile::from_store(name, self);
        slot.write(project.to_json()?)?;
        log::info!(
            "saved project {:?} ({} elements)",
            project.name,
            project.elements.len()
        );
        Ok(())
    }

    /// Replace the document with the project saved in `slot`.
    ///
    /// Returns the project's name, or `None` if the slot is empty. A blob that
    /// does not decode leaves the document untouched.
    pub fn load_from(&mut self, slot: &impl ProjectSlot) -> StorageResult<Option<String>> {
        let Some(blob) = slot.read()? else {
            log::info!("no saved project");
            return Ok(None);
        };
        let project = ProjectFile::from_json(&blob)?;
        let name = project.name.clone();
        self.open_project(project);
        Ok(Some(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::{ElementPatch, NewElement};

    #[test]
    fn test_load_empty_slot() {
        let mut store = DocumentStore::starter();
        let loaded = store.load_from(&MemorySlot::new()).unwrap();
        assert!(loaded.is_none());
        assert_eq!(store.len(), 2);
        assert!(!store.can_undo());
    }

    #[test]
    fn test_save_then_load() {
        let mut store = DocumentStore::starter();
        let mut slot = MemorySlot::new();
        store.save_to(&mut slot, "Untitled Project").unwrap();
        assert!(!store.can_undo());

        store.delete_element("rect1");
        store.update_element("rect2", ElementPatch::position(0.0, 0.0));

        let name = store.load_from(&slot).unwrap();
        assert_eq!(name.as_deref(), Some("Untitled Project"));
        assert_eq!(store.elements(), DocumentStore::starter().elements());

        // Loading is itself undoable.
        assert!(store.undo());
        assert!(store.get("rect1").is_none());
    }

    #[test]
    fn test_save_overwrites_slot() {
        let mut store = DocumentStore::new();
        let mut slot = MemorySlot::new();
        store.save_to(&mut slot, "first").unwrap();
        store.add_element(NewElement::circle(0.0, 0.0));
        store.save_to(&mut slot, "second").unwrap();

        let mut other = DocumentStore::new();
        assert_eq!(other.load_from(&slot).unwrap().as_deref(), Some("second"));
        assert_eq!(other.len(), 1);
    }

    #[test]
    fn test_corrupt_blob_leaves_document() {
        let mut slot = MemorySlot::new();
        slot.write("{ not json".to_string()).unwrap();

        let mut store = DocumentStore::starter();
        let result = store.load_from(&slot);
        assert!(matches!(result, Err(StorageError::Project(_))));
        assert_eq!(store.len(), 2);
        assert!(!store.can_undo());
    }

    #[test]
    fn test_saved_blob_is_a_project_file() {
        let store = DocumentStore::starter();
        let mut slot = MemorySlot::new();
        store.save_to(&mut slot, "poster").unwrap();

        let project = ProjectFile::from_json(slot.blob().unwrap()).unwrap();
        assert_eq!(project.name, "poster");
        assert_eq!(project.elements.len(), 2);
    }

    #[cfg(not(target_arch = "wasm32"))]
    mod file {
        use super::*;
        use tempfile::tempdir;

        #[test]
        fn test_file_slot_round_trip() {
            let dir = tempdir().unwrap();
            let mut slot = FileSlot::in_dir(dir.path()).unwrap();
            assert_eq!(slot.path(), dir.path().join("design-project.json"));

            let store = DocumentStore::starter();
            store.save_to(&mut slot, "Untitled Project").unwrap();
            assert!(slot.path().exists());

            let mut other = DocumentStore::new();
            let name = other.load_from(&slot).unwrap();
            assert_eq!(name.as_deref(), Some("Untitled Project"));
            assert_eq!(other.elements(), store.elements());
        }

        #[test]
        fn test_missing_file_is_empty_slot() {
            let dir = tempdir().unwrap();
            let slot = FileSlot::in_dir(dir.path()).unwrap();
            assert!(slot.read().unwrap().is_none());
        }

        #[test]
        fn test_creates_nested_directory() {
            let dir = tempdir().unwrap();
            let nested = dir.path().join("a").join("b");
            let mut slot = FileSlot::in_dir(&nested).unwrap();
            slot.write("{}".to_string()).unwrap();
            assert!(nested.join("design-project.json").exists());
        }

        #[test]
        fn test_reads_original_save_layout() {
            let dir = tempdir().unwrap();
            let mut slot = FileSlot::in_dir(dir.path()).unwrap();
            slot.write(
                r##"{"name":"Untitled Project","elements":[],"lastModified":"2024-05-02T08:30:00.000Z"}"##
                    .to_string(),
            )
            .unwrap();

            let mut store = DocumentStore::starter();
            assert_eq!(store.load_from(&slot).unwrap().as_deref(), Some("Untitled Project"));
            assert!(store.is_empty());
        }
    }
}
