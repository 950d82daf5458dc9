use super::{DataStore, StoreKey};
use crate::error::{MemozError, Result};
use std::fs;
use std::path::PathBuf;

/// File-backed store: `<root>/<key>.json` per key.
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn path_for(&self, key: StoreKey) -> PathBuf {
        self.root.join(format!("{}.json", key.name()))
    }

    fn ensure_dir(&self) -> Result<()> {
        if !self.root.exists() {
            fs::create_dir_all(&self.root).map_err(MemozError::Io)?;
        }
        Ok(())
    }
}

impl DataStore for FileStore {
    fn load(&self, key: StoreKey) -> Result<Option<String>> {
        let path = self.path_for(key);
        if !path.exists() {
            return Ok(None);
        }
        let bytes = fs::read(&path).map_err(MemozError::Io)?;
        match String::from_utf8(bytes) {
            Ok(content) => Ok(Some(content)),
            Err(e) => {
                // Unreadable text is corrupt data, same as unparseable JSON.
                tracing::warn!(key = %key, error = %e, "store corrupt, using an empty collection");
                Ok(None)
            }
        }
    }

    fn save(&mut self, key: StoreKey, document: &str) -> Result<()> {
        self.ensure_dir()?;

        // Write then rename so a crash never leaves half a document behind.
        let path = self.path_for(key);
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, document).map_err(MemozError::Io)?;
        fs::rename(&tmp, &path).map_err(MemozError::Io)?;
        Ok(())
    }
}
