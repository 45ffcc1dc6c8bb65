//! FILENAME: core/persistence/src/lib.rs
//! Table preferences persistence.
//!
//! Keeps every table's `TablePrefs` in a single JSON file. The file is
//! read once when the store is opened and rewritten in full on each save.

mod document;
mod error;

pub use document::{PrefsDocument, CURRENT_VERSION};
pub use error::PersistenceError;

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use log::debug;
use table_engine::{PrefsStore, TablePrefs};

// ============================================================================
// JSON FILE STORE
// ============================================================================

#[derive(Debug)]
pub struct JsonPrefsStore {
    path: PathBuf,
    document: PrefsDocument,
}

impl JsonPrefsStore {
    /// Opens the store at `path`. A missing file is an empty store; an
    /// unreadable or malformed one is an error.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, PersistenceError> {
        let path = path.into();
        let document = match fs::read_to_string(&path) {
            Ok(json) => PrefsDocument::from_json(&json)?,
            Err(e) if e.kind() == ErrorKind::NotFound => PrefsDocument::default(),
            Err(e) => return Err(e.into()),
        };
        debug!(
            target: "prefs",
            "opened {} ({} tables)",
            path.display(),
            document.tables.len()
        );
        Ok(Self { path, document })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn table_names(&self) -> impl Iterator<Item = &str> {
        self.document.tables.keys().map(String::as_str)
    }

    /// Forgets one table. Returns whether it was stored.
    pub fn remove(&mut self, name: &str) -> Result<bool, PersistenceError> {
        let removed = self.document.tables.remove(name).is_some();
        if removed {
            self.write()?;
        }
        Ok(removed)
    }

    /// Writes through a sibling temp file so a crash never leaves a
    /// half-written document behind.
    fn write(&self) -> Result<(), PersistenceError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let json = self.document.to_json()?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)?;
        debug!(target: "prefs", "saved {}", self.path.display());
        Ok(())
    }
}

impl PrefsStore for JsonPrefsStore {
    type Error = PersistenceError;

    fn load(&self, name: &str) -> Option<TablePrefs> {
        self.document.tables.get(name).cloned()
    }

    fn save(&mut self, name: &str, prefs: &TablePrefs) -> Result<(), PersistenceError> {
        if prefs.is_empty() {
            self.document.tables.remove(name);
        } else {
            self.document.tables.insert(name.to_string(), prefs.clone());
        }
        self.write()
    }
}
