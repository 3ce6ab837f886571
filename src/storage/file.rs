//! File-backed slot

use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use crate::storage::{CART_STORAGE_KEY, CartSlot, StorageError};

/// Slot stored as `<dir>/<key>.json`.
#[derive(Debug, Clone)]
pub struct FileSlot {
    path: PathBuf,
}

impl FileSlot {
    /// Creates the cart slot inside the given directory.
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self::with_key(dir, CART_STORAGE_KEY)
    }

    /// Creates a slot with a custom key inside the given directory.
    pub fn with_key(dir: impl AsRef<Path>, key: &str) -> Self {
        Self {
            path: dir.as_ref().join(format!("{key}.json")),
        }
    }

    /// Location of the slot file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CartSlot for FileSlot {
    fn read(&self) -> Result<Option<String>, StorageError> {
        match fs::read_to_string(&self.path) {
            Ok(payload) => Ok(Some(payload)),
            Err(error) if error.kind() == ErrorKind::NotFound => Ok(None),
            Err(error) => Err(error.into()),
        }
    }

    fn write(&mut self, payload: &str) -> Result<(), StorageError> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir)?;
        }

        // Readers never observe a half-written slot.
        let staging = self.path.with_extension("json.tmp");

        fs::write(&staging, payload)?;
        fs::rename(&staging, &self.path)?;

        Ok(())
    }
}
