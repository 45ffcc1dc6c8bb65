//! FILENAME: core/table-engine/src/view.rs
//! Table View - Renderable output for the frontend.
//!
//! The engine turns config + rows + interaction state into these
//! descriptors. The frontend draws them as-is: no sorting, slicing or
//! class logic happens on its side.

use serde::{Deserialize, Serialize};

use crate::definition::{ColumnSpec, SortDirection};
use crate::row::{RowDescriptor, RowKey, Scalar};
use crate::styling;

// ============================================================================
// HEADER
// ============================================================================

/// One header cell, either a super-column label or a column title.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeaderCell {
    pub title: String,

    pub colspan: usize,

    /// Base column this cell heads. `None` for super-column labels.
    pub column_index: Option<usize>,

    pub desc: Option<String>,

    pub width: Option<String>,

    pub sortable: bool,

    /// Set on the column the table is currently ordered by.
    pub sorted: Option<SortDirection>,
}

impl HeaderCell {
    /// Creates a super-column label.
    pub fn group(title: String, colspan: usize) -> Self {
        HeaderCell {
            title,
            colspan,
            column_index: None,
            desc: None,
            width: None,
            sortable: false,
            sorted: None,
        }
    }

    /// Creates a column title cell.
    pub fn column(spec: &ColumnSpec, column_index: usize) -> Self {
        HeaderCell {
            title: spec.title.clone(),
            colspan: 1,
            column_index: Some(column_index),
            desc: spec.desc.clone(),
            width: spec.width.clone(),
            sortable: spec.is_sortable(),
            sorted: None,
        }
    }

    pub fn with_sorted(mut self, direction: Option<SortDirection>) -> Self {
        self.sorted = direction;
        self
    }
}

/// Header rows: optional grouped row, then one cell per visible column.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeaderLayout {
    pub super_columns: Option<Vec<HeaderCell>>,
    pub columns: Vec<HeaderCell>,
}

impl HeaderLayout {
    pub fn row_count(&self) -> usize {
        if self.super_columns.is_some() {
            2
        } else {
            1
        }
    }
}

// ============================================================================
// BODY
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewCell {
    pub column_index: usize,
    /// Display value only; sort keys never reach the frontend.
    pub value: Scalar,
    pub classes: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewRow {
    pub key: RowKey,
    pub classes: Vec<String>,
    pub cells: Vec<ViewCell>,
}

impl ViewRow {
    /// Builds the rendered row for the given visible columns. Missing
    /// cells render empty.
    pub fn from_row(row: &RowDescriptor, columns: &[usize]) -> Self {
        ViewRow {
            key: row.key.clone(),
            classes: styling::resolve(Some(&row.class_names)),
            cells: columns
                .iter()
                .map(|&c| ViewCell {
                    column_index: c,
                    value: row.cell(c).map(|cell| cell.display().clone()).unwrap_or_default(),
                    classes: styling::resolve(row.cell_classes(c)),
                })
                .collect(),
        }
    }
}

// ============================================================================
// MAIN VIEW STRUCT
// ============================================================================

/// The complete rendered state of a table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableView {
    pub name: String,

    pub header: HeaderLayout,

    /// Rows of the current page.
    pub rows: Vec<ViewRow>,

    /// Rendered after the body; never sorted, filtered or paginated.
    pub footer: Vec<ViewRow>,

    pub page_index: usize,

    pub page_count: usize,

    /// `None` when the table isn't paginated.
    pub page_size: Option<usize>,

    pub page_size_options: Vec<usize>,

    /// Row count before search/filters.
    pub total_rows: usize,

    /// Row count after search/filters.
    pub filtered_rows: usize,

    /// 1-based position of the first row on this page (0 when empty).
    pub first_row: usize,

    pub sort: Option<(usize, SortDirection)>,

    pub search: String,

    pub nonfluid: bool,
}

impl TableView {
    /// 1-based position of the last row on this page.
    pub fn last_row(&self) -> usize {
        if self.rows.is_empty() {
            0
        } else {
            self.first_row + self.rows.len() - 1
        }
    }

    pub fn row_keys(&self) -> Vec<&RowKey> {
        self.rows.iter().map(|r| &r.key).collect()
    }
}
