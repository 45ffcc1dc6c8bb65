//! FILENAME: core/table-engine/src/header.rs
//! Super-column grouping.
//!
//! Super-columns are validated once, when columns or config are set. The
//! per-render pass only recounts spans against the visible columns.

use crate::definition::{ColumnSpec, SortDirection, SuperColumnGroup};
use crate::error::{TableError, TableResult};
use crate::view::{HeaderCell, HeaderLayout};

/// Checks that every group spans at least one column and that the spans
/// add up to exactly `column_count`. No groups is always valid.
pub fn validate_super_columns(groups: &[SuperColumnGroup], column_count: usize) -> TableResult<()> {
    if groups.is_empty() {
        return Ok(());
    }
    if let Some(empty) = groups.iter().find(|g| g.colspan == 0) {
        return Err(TableError::EmptySuperColumn(empty.title.clone()));
    }
    let actual: usize = groups.iter().map(|g| g.colspan).sum();
    if actual != column_count {
        return Err(TableError::ColspanMismatch {
            expected: column_count,
            actual,
        });
    }
    Ok(())
}

/// Builds the header for the visible columns (ascending base indices).
///
/// A group's rendered colspan is the number of its members still visible;
/// a group with none left is dropped. Assumes `groups` already passed
/// `validate_super_columns`.
pub fn build_header(
    groups: &[SuperColumnGroup],
    columns: &[ColumnSpec],
    visible: &[usize],
    sort: Option<(usize, SortDirection)>,
) -> HeaderLayout {
    let super_columns = if groups.is_empty() {
        None
    } else {
        let mut cells = Vec::with_capacity(groups.len());
        let mut start = 0;
        for group in groups {
            let end = start + group.colspan;
            let span = visible.iter().filter(|&&c| c >= start && c < end).count();
            if span > 0 {
                cells.push(HeaderCell::group(group.title.clone(), span));
            }
            start = end;
        }
        Some(cells)
    };

    let columns = visible
        .iter()
        .filter_map(|&c| {
            let spec = columns.get(c)?;
            let sorted = sort.and_then(|(col, dir)| (col == c).then_some(dir));
            Some(HeaderCell::column(spec, c).with_sorted(sorted))
        })
        .collect();

    HeaderLayout {
        super_columns,
        columns,
    }
}
