//! FILENAME: core/table-engine/src/sort.rs
//! Stable column sort.
//!
//! Keys are extracted once per row, then row indices are stably sorted.
//! Sorting always starts from the caller's order, so rows that compare
//! equal keep whatever pre-sort the view applied (e.g. by season).

use std::borrow::Cow;
use std::cmp::Ordering;

use crate::definition::{ColumnSpec, SortDirection, SortType};
use crate::error::{TableError, TableResult};
use crate::row::{CellValue, RowDescriptor, Scalar};

/// A comparable reading of one cell.
#[derive(Debug, Clone, PartialEq)]
enum SortKey<'a> {
    Number(f64),
    Text(Cow<'a, str>),
    /// Missing cells, empty values, and non-numeric values in a number
    /// column. Always ordered last, whatever the direction.
    Missing,
}

fn text_key<'a>(scalar: &'a Scalar, case_sensitive: bool) -> SortKey<'a> {
    let text = scalar.display_text();
    if case_sensitive {
        SortKey::Text(text)
    } else {
        SortKey::Text(Cow::Owned(text.to_lowercase()))
    }
}

fn sort_key<'a>(cell: Option<&'a CellValue>, column: &ColumnSpec) -> SortKey<'a> {
    let scalar = match cell.map(CellValue::sort_value) {
        Some(scalar) if !scalar.is_empty() => scalar,
        _ => return SortKey::Missing,
    };

    match column.sort_type {
        SortType::Number => scalar
            .as_number()
            .map(SortKey::Number)
            .unwrap_or(SortKey::Missing),
        SortType::String => text_key(scalar, column.case_sensitive),
        SortType::Default => match scalar.as_number() {
            Some(n) => SortKey::Number(n),
            None if matches!(scalar, Scalar::Number(_)) => SortKey::Missing,
            None => text_key(scalar, column.case_sensitive),
        },
    }
}

/// Ascending order of two present keys: numbers before text.
fn compare_present(a: &SortKey<'_>, b: &SortKey<'_>) -> Ordering {
    match (a, b) {
        (SortKey::Number(x), SortKey::Number(y)) => x.partial_cmp(y).unwrap_or(Ordering::Equal),
        (SortKey::Number(_), _) => Ordering::Less,
        (_, SortKey::Number(_)) => Ordering::Greater,
        (SortKey::Text(x), SortKey::Text(y)) => x.cmp(y),
        _ => Ordering::Equal,
    }
}

fn compare_keys(a: &SortKey<'_>, b: &SortKey<'_>, direction: SortDirection) -> Ordering {
    match (a, b) {
        (SortKey::Missing, SortKey::Missing) => Ordering::Equal,
        (SortKey::Missing, _) => Ordering::Greater,
        (_, SortKey::Missing) => Ordering::Less,
        _ => match direction {
            SortDirection::Ascending => compare_present(a, b),
            SortDirection::Descending => compare_present(a, b).reverse(),
        },
    }
}

/// Stably reorders `indices` (positions into `rows`) by the cell at
/// `column_index`. Short rows sort as missing instead of failing.
pub fn sort_indices(
    rows: &[RowDescriptor],
    indices: &[usize],
    column: &ColumnSpec,
    column_index: usize,
    direction: SortDirection,
) -> Vec<usize> {
    let mut keyed: Vec<(SortKey<'_>, usize)> = indices
        .iter()
        .filter_map(|&i| rows.get(i).map(|row| (sort_key(row.cell(column_index), column), i)))
        .collect();

    // `sort_by` is stable; ties keep their incoming order.
    keyed.sort_by(|(a, _), (b, _)| compare_keys(a, b, direction));

    keyed.into_iter().map(|(_, i)| i).collect()
}

/// Returns the rows ordered by `column_index`.
pub fn sort_rows(
    rows: &[RowDescriptor],
    columns: &[ColumnSpec],
    column_index: usize,
    direction: SortDirection,
) -> TableResult<Vec<RowDescriptor>> {
    let column = columns.get(column_index).ok_or(TableError::ColumnOutOfRange {
        column: column_index,
        column_count: columns.len(),
    })?;
    let all: Vec<usize> = (0..rows.len()).collect();
    let order = sort_indices(rows, &all, column, column_index, direction);
    Ok(order.into_iter().map(|i| rows[i].clone()).collect())
}
