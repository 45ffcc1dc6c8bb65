//! FILENAME: core/table-engine/src/columns.rs
//! Column catalog and short-name resolution.
//!
//! Views ask for columns by short identifier ("Age", "stat:pts"). The
//! catalog describing the active domain's columns is injected by the
//! caller (or loaded from JSON), so switching sports means switching
//! catalogs, not branching inside the engine.

use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};

use crate::definition::{default_sort_sequence, ColumnSpec, SortSequence, SortType};
use crate::error::{TableError, TableResult};

// ============================================================================
// CATALOG ENTRIES
// ============================================================================

/// Catalog entry. Anything left out gets the column defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnTemplate {
    pub title: String,

    #[serde(default)]
    pub sort_type: Option<SortType>,

    #[serde(default)]
    pub sort_sequence: Option<SortSequence>,

    #[serde(default)]
    pub width: Option<String>,

    #[serde(default)]
    pub desc: Option<String>,

    #[serde(default)]
    pub case_sensitive: Option<bool>,
}

impl ColumnTemplate {
    pub fn new(title: impl Into<String>) -> Self {
        ColumnTemplate {
            title: title.into(),
            sort_type: None,
            sort_sequence: None,
            width: None,
            desc: None,
            case_sensitive: None,
        }
    }

    pub fn with_sort_type(mut self, sort_type: SortType) -> Self {
        self.sort_type = Some(sort_type);
        self
    }

    pub fn with_sort_sequence(mut self, sequence: SortSequence) -> Self {
        self.sort_sequence = Some(sequence);
        self
    }

    pub fn with_desc(mut self, desc: impl Into<String>) -> Self {
        self.desc = Some(desc.into());
        self
    }

    pub fn with_width(mut self, width: impl Into<String>) -> Self {
        self.width = Some(width.into());
        self
    }

    fn to_spec(&self) -> ColumnSpec {
        ColumnSpec {
            title: self.title.clone(),
            key: None,
            sort_type: self.sort_type.unwrap_or_default(),
            sort_sequence: self
                .sort_sequence
                .clone()
                .unwrap_or_else(default_sort_sequence),
            width: self.width.clone(),
            desc: self.desc.clone(),
            case_sensitive: self.case_sensitive.unwrap_or(true),
        }
    }
}

/// Per-view adjustment applied on top of a catalog entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ColumnOverride {
    pub title: Option<String>,
    pub key: Option<String>,
    pub sort_type: Option<SortType>,
    pub sort_sequence: Option<SortSequence>,
    pub width: Option<String>,
    pub desc: Option<String>,
}

impl ColumnOverride {
    fn apply(&self, spec: &mut ColumnSpec) {
        if let Some(title) = &self.title {
            spec.title = title.clone();
        }
        if let Some(key) = &self.key {
            spec.key = Some(key.clone());
        }
        if let Some(sort_type) = self.sort_type {
            spec.sort_type = sort_type;
        }
        if let Some(sequence) = &self.sort_sequence {
            spec.sort_sequence = sequence.clone();
        }
        if let Some(width) = &self.width {
            spec.width = Some(width.clone());
        }
        if let Some(desc) = &self.desc {
            spec.desc = Some(desc.clone());
        }
    }
}

// ============================================================================
// CATALOG
// ============================================================================

/// Every column a domain knows about, by short identifier.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColumnCatalog {
    entries: FxHashMap<String, ColumnTemplate>,
}

impl ColumnCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads a catalog from a JSON object of `id -> template`.
    pub fn from_json(json: &str) -> TableResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn insert(&mut self, id: impl Into<String>, template: ColumnTemplate) {
        self.entries.insert(id.into(), template);
    }

    pub fn with(mut self, id: impl Into<String>, template: ColumnTemplate) -> Self {
        self.insert(id, template);
        self
    }

    pub fn get(&self, id: &str) -> Option<&ColumnTemplate> {
        self.entries.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.entries.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Expands identifiers into column specs, in order. The same identifier
    /// may appear more than once (career vs best-season stat blocks).
    pub fn resolve<S: AsRef<str>>(&self, ids: &[S]) -> TableResult<Vec<ColumnSpec>> {
        self.resolve_with_overrides(ids, &FxHashMap::default())
    }

    /// Like `resolve`, with overrides keyed by identifier.
    pub fn resolve_with_overrides<S: AsRef<str>>(
        &self,
        ids: &[S],
        overrides: &FxHashMap<String, ColumnOverride>,
    ) -> TableResult<Vec<ColumnSpec>> {
        ids.iter()
            .map(|id| {
                let id = id.as_ref();
                let template = self
                    .entries
                    .get(id)
                    .ok_or_else(|| TableError::UnknownColumn(id.to_string()))?;
                let mut spec = template.to_spec();
                if let Some(column_override) = overrides.get(id) {
                    column_override.apply(&mut spec);
                }
                Ok(spec)
            })
            .collect()
    }
}

// ============================================================================
// KEYS
// ============================================================================

/// Effective identity of each column.
///
/// Explicit keys must be unique. Columns without one are keyed by title;
/// a repeated title gets its occurrence number appended ("PTS", "PTS@2")
/// so two stat blocks sharing labels stay distinguishable.
pub fn column_keys(columns: &[ColumnSpec]) -> TableResult<Vec<String>> {
    let mut seen: FxHashSet<String> = FxHashSet::default();
    for key in columns.iter().filter_map(|c| c.key.as_deref()) {
        if !seen.insert(key.to_string()) {
            return Err(TableError::DuplicateColumnKey(key.to_string()));
        }
    }

    let mut title_counts: FxHashMap<&str, usize> = FxHashMap::default();
    let mut keys = Vec::with_capacity(columns.len());
    for column in columns {
        let key = match &column.key {
            Some(key) => key.clone(),
            None => {
                let count = title_counts.entry(column.title.as_str()).or_insert(0);
                *count += 1;
                let derived = if *count == 1 {
                    column.title.clone()
                } else {
                    format!("{}@{}", column.title, count)
                };
                if !seen.insert(derived.clone()) {
                    return Err(TableError::DuplicateColumnKey(derived));
                }
                derived
            }
        };
        keys.push(key);
    }
    Ok(keys)
}
