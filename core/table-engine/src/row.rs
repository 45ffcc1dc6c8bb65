//! FILENAME: core/table-engine/src/row.rs
//! Row descriptors and cell values supplied by the calling view.

use std::borrow::Cow;
use std::fmt;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::styling::ClassMap;

// ============================================================================
// SCALARS
// ============================================================================

/// An opaque, already formatted value. Text may contain markup; the engine
/// never looks inside it beyond comparing and searching.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    #[default]
    Empty,
    Number(f64),
    Text(String),
}

impl Scalar {
    pub fn text(s: impl Into<String>) -> Self {
        Scalar::Text(s.into())
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Scalar::Empty => true,
            Scalar::Number(_) => false,
            Scalar::Text(s) => s.is_empty(),
        }
    }

    /// Numeric reading of the value. Text is accepted when it parses as a
    /// finite number after trimming.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Scalar::Empty => None,
            Scalar::Number(n) if n.is_nan() => None,
            Scalar::Number(n) => Some(*n),
            Scalar::Text(s) => s
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|n| n.is_finite()),
        }
    }

    pub fn display_text(&self) -> Cow<'_, str> {
        match self {
            Scalar::Empty => Cow::Borrowed(""),
            Scalar::Number(n) => Cow::Owned(n.to_string()),
            Scalar::Text(s) => Cow::Borrowed(s),
        }
    }
}

impl From<f64> for Scalar {
    fn from(value: f64) -> Self {
        Scalar::Number(value)
    }
}

impl From<i64> for Scalar {
    fn from(value: i64) -> Self {
        Scalar::Number(value as f64)
    }
}

impl From<i32> for Scalar {
    fn from(value: i32) -> Self {
        Scalar::Number(f64::from(value))
    }
}

impl From<u32> for Scalar {
    fn from(value: u32) -> Self {
        Scalar::Number(f64::from(value))
    }
}

impl From<&str> for Scalar {
    fn from(value: &str) -> Self {
        Scalar::Text(value.to_string())
    }
}

impl From<String> for Scalar {
    fn from(value: String) -> Self {
        Scalar::Text(value)
    }
}

impl<T: Into<Scalar>> From<Option<T>> for Scalar {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(Scalar::Empty)
    }
}

// ============================================================================
// CELL VALUES
// ============================================================================

/// A cell is either a scalar used for both display and ordering, or a
/// display value paired with a separate sort key (a rounded percentage
/// sorted by its full precision, a link sorted by its plain label, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    WithSortKey {
        value: Scalar,
        #[serde(rename = "sortValue")]
        sort_value: Scalar,
    },
    Scalar(Scalar),
}

impl CellValue {
    pub fn sortable(value: impl Into<Scalar>, sort_value: impl Into<Scalar>) -> Self {
        CellValue::WithSortKey {
            value: value.into(),
            sort_value: sort_value.into(),
        }
    }

    /// What gets rendered.
    pub fn display(&self) -> &Scalar {
        match self {
            CellValue::WithSortKey { value, .. } => value,
            CellValue::Scalar(s) => s,
        }
    }

    /// What gets compared.
    pub fn sort_value(&self) -> &Scalar {
        match self {
            CellValue::WithSortKey { sort_value, .. } => sort_value,
            CellValue::Scalar(s) => s,
        }
    }
}

impl Default for CellValue {
    fn default() -> Self {
        CellValue::Scalar(Scalar::Empty)
    }
}

macro_rules! cell_from_scalar {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for CellValue {
                fn from(value: $ty) -> Self {
                    CellValue::Scalar(value.into())
                }
            }
        )*
    };
}

cell_from_scalar!(Scalar, f64, i64, i32, u32, &str, String);

// ============================================================================
// ROWS
// ============================================================================

/// Stable row identity, used by the frontend to reconcile re-renders.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RowKey {
    Int(i64),
    Text(String),
}

impl fmt::Display for RowKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RowKey::Int(i) => write!(f, "{}", i),
            RowKey::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for RowKey {
    fn from(value: i64) -> Self {
        RowKey::Int(value)
    }
}

impl From<i32> for RowKey {
    fn from(value: i32) -> Self {
        RowKey::Int(i64::from(value))
    }
}

impl From<u32> for RowKey {
    fn from(value: u32) -> Self {
        RowKey::Int(i64::from(value))
    }
}

impl From<&str> for RowKey {
    fn from(value: &str) -> Self {
        RowKey::Text(value.to_string())
    }
}

impl From<String> for RowKey {
    fn from(value: String) -> Self {
        RowKey::Text(value)
    }
}

/// One body row: cells positionally aligned with the column list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RowDescriptor {
    pub key: RowKey,

    pub data: Vec<CellValue>,

    #[serde(default, skip_serializing_if = "ClassMap::is_empty")]
    pub class_names: ClassMap,

    /// Per-cell class maps keyed by column index.
    #[serde(default, skip_serializing_if = "FxHashMap::is_empty")]
    pub cell_class_names: FxHashMap<usize, ClassMap>,
}

impl RowDescriptor {
    pub fn new<I, C>(key: impl Into<RowKey>, data: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<CellValue>,
    {
        RowDescriptor {
            key: key.into(),
            data: data.into_iter().map(Into::into).collect(),
            class_names: ClassMap::default(),
            cell_class_names: FxHashMap::default(),
        }
    }

    pub fn with_classes(mut self, classes: ClassMap) -> Self {
        self.class_names = classes;
        self
    }

    pub fn with_cell_classes(mut self, column: usize, classes: ClassMap) -> Self {
        self.cell_class_names.insert(column, classes);
        self
    }

    /// The cell at `column`, or `None` when the row is short.
    pub fn cell(&self, column: usize) -> Option<&CellValue> {
        self.data.get(column)
    }

    pub fn cell_classes(&self, column: usize) -> Option<&ClassMap> {
        self.cell_class_names.get(&column)
    }
}
