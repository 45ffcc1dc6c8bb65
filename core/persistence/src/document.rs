//! FILENAME: core/persistence/src/document.rs
//! On-disk shape of the preferences file.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use table_engine::TablePrefs;

use crate::PersistenceError;

pub const CURRENT_VERSION: u32 = 1;

/// Every table's preferences, keyed by table name. A `BTreeMap` keeps the
/// file stable between saves.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrefsDocument {
    pub version: u32,
    #[serde(default)]
    pub tables: BTreeMap<String, TablePrefs>,
}

impl Default for PrefsDocument {
    fn default() -> Self {
        Self {
            version: CURRENT_VERSION,
            tables: BTreeMap::new(),
        }
    }
}

impl PrefsDocument {
    pub fn to_json(&self) -> Result<String, PersistenceError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self, PersistenceError> {
        let document: PrefsDocument = serde_json::from_str(json)?;
        if document.version > CURRENT_VERSION {
            return Err(PersistenceError::UnsupportedVersion(document.version));
        }
        Ok(document)
    }
}
