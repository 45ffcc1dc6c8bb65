//! FILENAME: core/table-engine/src/prefs.rs
//! Per-table preferences, keyed by the table's `name`.

use std::convert::Infallible;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// What a user chose for one table and expects to see again next time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TablePrefs {
    pub page_size: Option<usize>,

    /// Keys of columns the user hid.
    pub hidden_columns: Vec<String>,
}

impl TablePrefs {
    pub fn is_empty(&self) -> bool {
        self.page_size.is_none() && self.hidden_columns.is_empty()
    }
}

/// Somewhere to keep `TablePrefs` between sessions.
pub trait PrefsStore {
    type Error: std::error::Error;

    fn load(&self, name: &str) -> Option<TablePrefs>;

    fn save(&mut self, name: &str, prefs: &TablePrefs) -> Result<(), Self::Error>;
}

/// Process-lifetime store.
#[derive(Debug, Default)]
pub struct MemoryPrefsStore {
    tables: FxHashMap<String, TablePrefs>,
}

impl MemoryPrefsStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}

impl PrefsStore for MemoryPrefsStore {
    type Error = Infallible;

    fn load(&self, name: &str) -> Option<TablePrefs> {
        self.tables.get(name).cloned()
    }

    fn save(&mut self, name: &str, prefs: &TablePrefs) -> Result<(), Infallible> {
        if prefs.is_empty() {
            self.tables.remove(name);
        } else {
            self.tables.insert(name.to_string(), prefs.clone());
        }
        Ok(())
    }
}
