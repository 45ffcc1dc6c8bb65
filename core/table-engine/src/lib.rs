//! FILENAME: core/table-engine/src/lib.rs
//! Report table engine.
//!
//! Every report view hands this crate a column list, a row list and a
//! config; the engine owns sort/page/filter interaction state and produces
//! a renderable `TableView`. Cell contents are opaque, already formatted
//! values.
//!
//! Layers:
//! - `definition`: Serializable configuration (what the table IS)
//! - `row`: Row descriptors and cell values supplied by views
//! - `columns`: Column catalog and short-name resolution
//! - `sort`, `filter`, `pagination`: Pure row-ordering passes
//! - `header`: Super-column validation and two-row header layout
//! - `styling`: Boolean class maps -> class lists
//! - `prefs`: Per-table persisted preferences
//! - `view`: Renderable output for the frontend (WHAT we display)
//! - `engine`: Interaction state machine (HOW we recompute)

pub mod columns;
pub mod definition;
pub mod engine;
pub mod error;
pub mod filter;
pub mod header;
pub mod pagination;
pub mod prefs;
pub mod row;
pub mod sort;
pub mod styling;
pub mod view;

pub use columns::{column_keys, ColumnCatalog, ColumnOverride, ColumnTemplate};
pub use definition::*;
pub use engine::{SortState, TableEngine, TableEvent};
pub use error::{TableError, TableResult};
pub use filter::ColumnFilter;
pub use header::{build_header, validate_super_columns};
pub use pagination::{paginate, Page, PageState, DEFAULT_PAGE_SIZE};
pub use prefs::{MemoryPrefsStore, PrefsStore, TablePrefs};
pub use row::{CellValue, RowDescriptor, RowKey, Scalar};
pub use sort::{sort_indices, sort_rows};
pub use styling::ClassMap;
pub use view::*;
