//! FILENAME: core/table-engine/src/definition.rs
//! Table Definition - The serializable configuration.
//!
//! This module contains the types a view uses to DESCRIBE a table:
//! its columns, grouped headers, default ordering and paging. They are
//! rebuilt by the calling view on every data change and never mutated by
//! the engine.

use serde::{Deserialize, Serialize};
use smallvec::{smallvec, SmallVec};

use crate::pagination::DEFAULT_PAGE_SIZE;

// ============================================================================
// SORTING
// ============================================================================

/// Direction of a column sort.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SortDirection {
    #[serde(rename = "asc")]
    Ascending,
    #[serde(rename = "desc")]
    Descending,
}

impl SortDirection {
    pub fn reverse(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }
}

/// How cell sort keys in a column are compared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortType {
    /// Both sides coerced to numbers; anything non-numeric sorts last.
    Number,
    /// Lexicographic comparison of the display text.
    String,
    /// Numeric when a key parses as a number, text otherwise.
    #[default]
    Default,
}

/// Ordered cycle of directions a column advances through on repeated
/// activation. Empty means the column cannot be sorted.
pub type SortSequence = SmallVec<[SortDirection; 2]>;

pub fn default_sort_sequence() -> SortSequence {
    smallvec![SortDirection::Ascending, SortDirection::Descending]
}

// ============================================================================
// COLUMNS
// ============================================================================

/// A fully resolved column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnSpec {
    /// Display label.
    pub title: String,

    /// Stable identity. Falls back to the title when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,

    #[serde(default)]
    pub sort_type: SortType,

    #[serde(default = "default_sort_sequence")]
    pub sort_sequence: SortSequence,

    /// Layout hint passed through to the header (e.g. "1%").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<String>,

    /// Tooltip text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub desc: Option<String>,

    /// Only consulted for text comparisons.
    #[serde(default = "default_true")]
    pub case_sensitive: bool,
}

fn default_true() -> bool {
    true
}

impl ColumnSpec {
    pub fn new(title: impl Into<String>) -> Self {
        ColumnSpec {
            title: title.into(),
            key: None,
            sort_type: SortType::Default,
            sort_sequence: default_sort_sequence(),
            width: None,
            desc: None,
            case_sensitive: true,
        }
    }

    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    pub fn with_sort_type(mut self, sort_type: SortType) -> Self {
        self.sort_type = sort_type;
        self
    }

    pub fn with_sort_sequence(mut self, sequence: &[SortDirection]) -> Self {
        self.sort_sequence = sequence.iter().copied().collect();
        self
    }

    pub fn with_width(mut self, width: impl Into<String>) -> Self {
        self.width = Some(width.into());
        self
    }

    pub fn with_desc(mut self, desc: impl Into<String>) -> Self {
        self.desc = Some(desc.into());
        self
    }

    pub fn case_insensitive(mut self) -> Self {
        self.case_sensitive = false;
        self
    }

    /// The key the column was given, or its title.
    pub fn key(&self) -> &str {
        self.key.as_deref().unwrap_or(&self.title)
    }

    pub fn is_sortable(&self) -> bool {
        !self.sort_sequence.is_empty()
    }
}

/// A header cell spanning `colspan` consecutive base columns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuperColumnGroup {
    pub title: String,
    pub colspan: usize,
}

impl SuperColumnGroup {
    pub fn new(title: impl Into<String>, colspan: usize) -> Self {
        SuperColumnGroup {
            title: title.into(),
            colspan,
        }
    }
}

// ============================================================================
// TABLE CONFIG
// ============================================================================

/// Initial ordering: `[columnIndex, "asc" | "desc"]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefaultSort(pub usize, pub SortDirection);

/// `true`/`false`, or an explicit page size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Pagination {
    Enabled(bool),
    PageSize(usize),
}

impl Default for Pagination {
    fn default() -> Self {
        Pagination::Enabled(false)
    }
}

impl Pagination {
    /// Rows per page, or `None` when every row belongs to a single page.
    pub fn page_size(&self) -> Option<usize> {
        match *self {
            Pagination::Enabled(true) => Some(DEFAULT_PAGE_SIZE),
            Pagination::Enabled(false) | Pagination::PageSize(0) => None,
            Pagination::PageSize(size) => Some(size),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.page_size().is_some()
    }
}

/// Everything about a table that is not column or row data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TableConfig {
    /// Identity of the table for persisted preferences.
    pub name: String,

    pub default_sort: Option<DefaultSort>,

    pub pagination: Pagination,

    /// Page sizes offered to the user when pagination is on.
    pub page_size_options: Vec<usize>,

    /// Layout hint: don't stretch the table to the container width.
    pub nonfluid: bool,

    /// Grouped header row. Empty means a single header row.
    pub super_columns: Vec<SuperColumnGroup>,
}

impl Default for TableConfig {
    fn default() -> Self {
        TableConfig {
            name: String::new(),
            default_sort: None,
            pagination: Pagination::default(),
            page_size_options: vec![10, 25, 50, 100],
            nonfluid: false,
            super_columns: Vec::new(),
        }
    }
}

impl TableConfig {
    pub fn new(name: impl Into<String>) -> Self {
        TableConfig {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_default_sort(mut self, column: usize, direction: SortDirection) -> Self {
        self.default_sort = Some(DefaultSort(column, direction));
        self
    }

    pub fn with_pagination(mut self, pagination: Pagination) -> Self {
        self.pagination = pagination;
        self
    }

    pub fn with_super_columns(mut self, groups: Vec<SuperColumnGroup>) -> Self {
        self.super_columns = groups;
        self
    }

    pub fn nonfluid(mut self) -> Self {
        self.nonfluid = true;
        self
    }
}
