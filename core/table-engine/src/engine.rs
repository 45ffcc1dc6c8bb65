//! FILENAME: core/table-engine/src/engine.rs
//! Table Engine - interaction state and recomputation.
//!
//! A `TableEngine` is one mounted table. Views replace its columns, rows
//! or config whenever their data changes; user actions arrive as
//! `TableEvent`s. Neither ever mutates the rows themselves: the engine
//! keeps an ordering (`order`) over them, rebuilt whenever the data,
//! columns, sort or filters change.
//!
//! Pipeline: rows --> search/filters --> stable sort --> page window --> TableView

use log::{debug, warn};
use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};

use crate::columns::column_keys;
use crate::definition::{ColumnSpec, DefaultSort, SortDirection, TableConfig};
use crate::error::{TableError, TableResult};
use crate::filter::{matches_search, ColumnFilter};
use crate::header::{build_header, validate_super_columns};
use crate::pagination::PageState;
use crate::prefs::{PrefsStore, TablePrefs};
use crate::row::RowDescriptor;
use crate::sort::sort_indices;
use crate::view::{TableView, ViewRow};

const LOG_TARGET: &str = "table";

// ============================================================================
// SORT STATE
// ============================================================================

/// Which column the table is ordered by, and where in that column's
/// `sort_sequence` it currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SortState {
    pub column_index: usize,
    pub direction_index: usize,
}

impl SortState {
    /// Header click: the same column advances through its sequence,
    /// another column starts at the beginning of its own.
    pub fn activate(current: Option<SortState>, column_index: usize, sequence_len: usize) -> SortState {
        match current {
            Some(state) if state.column_index == column_index && sequence_len > 0 => SortState {
                column_index,
                direction_index: (state.direction_index + 1) % sequence_len,
            },
            _ => SortState {
                column_index,
                direction_index: 0,
            },
        }
    }

    pub fn direction(&self, columns: &[ColumnSpec]) -> Option<SortDirection> {
        columns
            .get(self.column_index)?
            .sort_sequence
            .get(self.direction_index)
            .copied()
    }
}

// ============================================================================
// EVENTS
// ============================================================================

/// User interaction with a mounted table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TableEvent {
    /// Header click.
    ActivateColumn(usize),
    ChangePage(usize),
    ChangePageSize(usize),
    /// Search box text.
    Search(String),
    /// Per-column filter expression; blank clears that column's filter.
    FilterColumn { column: usize, expression: String },
    /// Clears the search box and every column filter.
    ClearFilters,
    /// Hide/show a column.
    ToggleColumn(usize),
}

// ============================================================================
// ENGINE
// ============================================================================

#[derive(Debug)]
pub struct TableEngine {
    config: TableConfig,
    columns: Vec<ColumnSpec>,
    /// Effective key of each column, parallel to `columns`.
    column_keys: Vec<String>,
    rows: Vec<RowDescriptor>,
    footer: Vec<RowDescriptor>,

    sort: Option<SortState>,
    page: PageState,
    search: String,
    /// Column filters by column key, so they survive column replacement.
    filters: FxHashMap<String, ColumnFilter>,
    /// Hidden column keys.
    hidden: FxHashSet<String>,

    /// Indices into `rows` that pass the filters, in display order.
    order: Vec<usize>,
}

/// Initial sort derived from `default_sort`.
fn initial_sort(config: &TableConfig, columns: &[ColumnSpec]) -> TableResult<Option<SortState>> {
    let Some(DefaultSort(column, direction)) = config.default_sort else {
        return Ok(None);
    };
    let spec = columns.get(column).ok_or(TableError::ColumnOutOfRange {
        column,
        column_count: columns.len(),
    })?;
    let direction_index = spec
        .sort_sequence
        .iter()
        .position(|&d| d == direction)
        .ok_or(TableError::DefaultSortDirection { column, direction })?;
    Ok(Some(SortState {
        column_index: column,
        direction_index,
    }))
}

impl TableEngine {
    /// Validates the configuration against the columns and computes the
    /// initial ordering. Configuration errors stop here, before any row
    /// is rendered.
    pub fn new(
        columns: Vec<ColumnSpec>,
        rows: Vec<RowDescriptor>,
        config: TableConfig,
    ) -> TableResult<Self> {
        let column_keys = column_keys(&columns)?;
        validate_super_columns(&config.super_columns, columns.len())?;
        let sort = initial_sort(&config, &columns)?;
        let page = PageState::new(config.pagination.page_size());

        let mut engine = TableEngine {
            config,
            columns,
            column_keys,
            rows,
            footer: Vec::new(),
            sort,
            page,
            search: String::new(),
            filters: FxHashMap::default(),
            hidden: FxHashSet::default(),
            order: Vec::new(),
        };
        engine.check_row_widths();
        engine.recompute();
        debug!(
            target: LOG_TARGET,
            "[{}] created: {} columns, {} rows, sort={:?}, page_size={:?}",
            engine.config.name,
            engine.columns.len(),
            engine.rows.len(),
            engine.sort,
            engine.page.page_size
        );
        Ok(engine)
    }

    /// Footer rows (totals, averages) render below the body as given.
    pub fn with_footer(mut self, footer: Vec<RowDescriptor>) -> Self {
        self.footer = footer;
        self
    }

    pub fn set_footer(&mut self, footer: Vec<RowDescriptor>) {
        self.footer = footer;
    }

    // -------------------------------------------------------------------------
    // Data replacement
    // -------------------------------------------------------------------------

    /// Replaces the row set. Interaction state is kept, except the page,
    /// which returns to the first.
    pub fn set_rows(&mut self, rows: Vec<RowDescriptor>) {
        self.rows = rows;
        self.page.reset();
        self.check_row_widths();
        self.recompute();
        debug!(target: LOG_TARGET, "[{}] rows replaced: {}", self.config.name, self.rows.len());
    }

    /// Replaces the columns. Sort, filters and hidden columns follow their
    /// column by key. A sort whose column disappeared, or whose direction
    /// the new column no longer offers, falls back to the default sort.
    pub fn set_columns(&mut self, columns: Vec<ColumnSpec>) -> TableResult<()> {
        let keys = column_keys(&columns)?;
        validate_super_columns(&self.config.super_columns, columns.len())?;
        let default_sort = initial_sort(&self.config, &columns)?;

        // Keep the direction on screen, not the position in the old sequence.
        let carried_sort = self.sort.and_then(|state| {
            let direction = state.direction(&self.columns)?;
            let key = self.column_keys.get(state.column_index)?;
            let column_index = keys.iter().position(|k| k == key)?;
            let direction_index = columns[column_index]
                .sort_sequence
                .iter()
                .position(|&d| d == direction)?;
            Some(SortState {
                column_index,
                direction_index,
            })
        });
        if self.sort.is_some() && carried_sort.is_none() {
            debug!(target: LOG_TARGET, "[{}] sort can't be carried over, using default sort", self.config.name);
            self.page.reset();
        }
        self.sort = carried_sort.or(default_sort);

        self.filters.retain(|key, _| keys.contains(key));
        self.hidden.retain(|key| keys.contains(key));

        self.columns = columns;
        self.column_keys = keys;
        self.check_row_widths();
        self.recompute();
        Ok(())
    }

    /// Replaces the config. A different `name` is a different table: all
    /// interaction state is discarded.
    pub fn set_config(&mut self, config: TableConfig) -> TableResult<()> {
        validate_super_columns(&config.super_columns, self.columns.len())?;
        let default_sort = initial_sort(&config, &self.columns)?;

        if config.name != self.config.name {
            debug!(
                target: LOG_TARGET,
                "[{}] renamed to [{}], resetting interaction state",
                self.config.name,
                config.name
            );
            self.sort = default_sort;
            self.page = PageState::new(config.pagination.page_size());
            self.search.clear();
            self.filters.clear();
            self.hidden.clear();
        } else if config.pagination != self.config.pagination {
            self.page = PageState::new(config.pagination.page_size());
        }

        self.config = config;
        self.recompute();
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Events
    // -------------------------------------------------------------------------

    pub fn apply(&mut self, event: TableEvent) -> TableResult<()> {
        match event {
            TableEvent::ActivateColumn(column) => self.activate_column(column),
            TableEvent::ChangePage(page) => {
                self.change_page(page);
                Ok(())
            }
            TableEvent::ChangePageSize(size) => {
                self.change_page_size(size);
                Ok(())
            }
            TableEvent::Search(text) => {
                self.set_search(text);
                Ok(())
            }
            TableEvent::FilterColumn { column, expression } => self.filter_column(column, &expression),
            TableEvent::ClearFilters => {
                self.clear_filters();
                Ok(())
            }
            TableEvent::ToggleColumn(column) => self.toggle_column(column),
        }
    }

    /// Header click on `column`. Unsortable columns ignore the click.
    pub fn activate_column(&mut self, column: usize) -> TableResult<()> {
        let sequence_len = self.column(column)?.sort_sequence.len();
        if sequence_len == 0 {
            debug!(target: LOG_TARGET, "[{}] column {} is not sortable", self.config.name, column);
            return Ok(());
        }

        self.sort = Some(SortState::activate(self.sort, column, sequence_len));
        self.page.reset();
        self.recompute();
        debug!(target: LOG_TARGET, "[{}] sort -> {:?}", self.config.name, self.current_sort());
        Ok(())
    }

    /// Moves to `page`, clamped to the available pages. Returns the page
    /// actually selected.
    pub fn change_page(&mut self, page: usize) -> usize {
        let selected = self.page.go_to(page, self.order.len());
        debug!(target: LOG_TARGET, "[{}] page {} (requested {})", self.config.name, selected, page);
        selected
    }

    /// Ignored when the table isn't paginated or `size` is 0.
    pub fn change_page_size(&mut self, size: usize) {
        if !self.config.pagination.is_enabled() {
            debug!(target: LOG_TARGET, "[{}] page size change ignored: not paginated", self.config.name);
            return;
        }
        self.page.set_page_size(size);
    }

    pub fn set_search(&mut self, text: impl Into<String>) {
        self.search = text.into();
        self.page.reset();
        self.recompute();
    }

    pub fn filter_column(&mut self, column: usize, expression: &str) -> TableResult<()> {
        self.column(column)?;
        let key = self.column_keys[column].clone();
        match ColumnFilter::parse(expression) {
            Some(filter) => {
                self.filters.insert(key, filter);
            }
            None => {
                self.filters.remove(&key);
            }
        }
        self.page.reset();
        self.recompute();
        Ok(())
    }

    pub fn clear_filters(&mut self) {
        self.search.clear();
        self.filters.clear();
        self.page.reset();
        self.recompute();
    }

    /// Hides or shows a column. The last visible column can't be hidden.
    pub fn toggle_column(&mut self, column: usize) -> TableResult<()> {
        self.column(column)?;
        let key = self.column_keys[column].clone();
        if !self.hidden.remove(&key) {
            if self.visible_columns().len() <= 1 {
                debug!(target: LOG_TARGET, "[{}] refusing to hide last visible column", self.config.name);
                return Ok(());
            }
            self.hidden.insert(key);
        }
        // Search only looks at visible columns.
        self.recompute();
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Preferences
    // -------------------------------------------------------------------------

    /// Snapshot of what should be remembered for this table. The page size
    /// is only kept when the user moved it off the configured size.
    pub fn prefs(&self) -> TablePrefs {
        let configured = self.config.pagination.page_size();
        TablePrefs {
            page_size: if configured.is_some() && self.page.page_size != configured {
                self.page.page_size
            } else {
                None
            },
            hidden_columns: self
                .column_keys
                .iter()
                .filter(|k| self.hidden.contains(*k))
                .cloned()
                .collect(),
        }
    }

    /// Applies stored preferences. Unknown column keys are ignored; if
    /// they would hide every column, nothing is hidden.
    pub fn apply_prefs(&mut self, prefs: &TablePrefs) {
        if let Some(size) = prefs.page_size {
            self.change_page_size(size);
        }
        self.hidden = prefs
            .hidden_columns
            .iter()
            .filter(|k| self.column_keys.contains(*k))
            .cloned()
            .collect();
        if !self.hidden.is_empty() && self.hidden.len() >= self.columns.len() {
            warn!(target: LOG_TARGET, "[{}] stored prefs hide every column; ignoring", self.config.name);
            self.hidden.clear();
        }
        self.page.reset();
        self.recompute();
    }

    /// Loads preferences stored under this table's name. Unnamed tables
    /// have no preferences.
    pub fn load_prefs<S: PrefsStore>(&mut self, store: &S) {
        if self.config.name.is_empty() {
            return;
        }
        if let Some(prefs) = store.load(&self.config.name) {
            debug!(target: LOG_TARGET, "[{}] loaded prefs {:?}", self.config.name, prefs);
            self.apply_prefs(&prefs);
        }
    }

    pub fn save_prefs<S: PrefsStore>(&self, store: &mut S) -> Result<(), S::Error> {
        if self.config.name.is_empty() {
            return Ok(());
        }
        store.save(&self.config.name, &self.prefs())
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    pub fn columns(&self) -> &[ColumnSpec] {
        &self.columns
    }

    pub fn column_keys(&self) -> &[String] {
        &self.column_keys
    }

    pub fn rows(&self) -> &[RowDescriptor] {
        &self.rows
    }

    pub fn sort_state(&self) -> Option<SortState> {
        self.sort
    }

    /// Sorted column and its current direction.
    pub fn current_sort(&self) -> Option<(usize, SortDirection)> {
        self.sort
            .and_then(|state| state.direction(&self.columns).map(|d| (state.column_index, d)))
    }

    pub fn page_state(&self) -> PageState {
        self.page
    }

    pub fn page_index(&self) -> usize {
        self.page.page_index
    }

    pub fn page_count(&self) -> usize {
        self.page.page_count(self.order.len())
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn filter_expression(&self, column: usize) -> Option<&str> {
        let key = self.column_keys.get(column)?;
        self.filters.get(key).map(|f| f.source.as_str())
    }

    pub fn is_hidden(&self, column: usize) -> bool {
        self.column_keys
            .get(column)
            .map(|k| self.hidden.contains(k))
            .unwrap_or(false)
    }

    /// Indices of the columns being rendered, in column order.
    pub fn visible_columns(&self) -> Vec<usize> {
        (0..self.columns.len())
            .filter(|&c| !self.hidden.contains(&self.column_keys[c]))
            .collect()
    }

    /// Every row passing the filters, in display order (all pages).
    pub fn ordered_rows(&self) -> impl Iterator<Item = &RowDescriptor> + '_ {
        self.order.iter().map(move |&i| &self.rows[i])
    }

    /// Rows of the current page, in display order.
    pub fn page_rows(&self) -> impl Iterator<Item = &RowDescriptor> + '_ {
        let bounds = self.page.bounds(self.order.len());
        self.order[bounds].iter().map(move |&i| &self.rows[i])
    }

    // -------------------------------------------------------------------------
    // Rendering
    // -------------------------------------------------------------------------

    pub fn view(&self) -> TableView {
        let visible = self.visible_columns();
        let sort = self.current_sort();
        let bounds = self.page.bounds(self.order.len());
        let first_row = if bounds.is_empty() { 0 } else { bounds.start + 1 };

        TableView {
            name: self.config.name.clone(),
            header: build_header(&self.config.super_columns, &self.columns, &visible, sort),
            rows: self.order[bounds]
                .iter()
                .map(|&i| ViewRow::from_row(&self.rows[i], &visible))
                .collect(),
            footer: self
                .footer
                .iter()
                .map(|row| ViewRow::from_row(row, &visible))
                .collect(),
            page_index: self.page.page_index,
            page_count: self.page_count(),
            page_size: self.page.page_size,
            page_size_options: if self.config.pagination.is_enabled() {
                self.config.page_size_options.clone()
            } else {
                Vec::new()
            },
            total_rows: self.rows.len(),
            filtered_rows: self.order.len(),
            first_row,
            sort,
            search: self.search.clone(),
            nonfluid: self.config.nonfluid,
        }
    }

    // -------------------------------------------------------------------------
    // Internals
    // -------------------------------------------------------------------------

    fn column(&self, column: usize) -> TableResult<&ColumnSpec> {
        self.columns.get(column).ok_or(TableError::ColumnOutOfRange {
            column,
            column_count: self.columns.len(),
        })
    }

    fn check_row_widths(&self) {
        let expected = self.columns.len();
        let short = self.rows.iter().filter(|r| r.data.len() < expected).count();
        if short > 0 {
            warn!(
                target: LOG_TARGET,
                "[{}] {} of {} rows have fewer than {} cells; missing cells render empty",
                self.config.name,
                short,
                self.rows.len(),
                expected
            );
        }
    }

    /// Rebuilds `order` from the rows, then clamps the current page.
    fn recompute(&mut self) {
        let visible = self.visible_columns();
        let needle = self.search.trim().to_lowercase();
        let filters: Vec<(usize, &ColumnFilter)> = self
            .filters
            .iter()
            .filter_map(|(key, filter)| {
                let column = self.column_keys.iter().position(|k| k == key)?;
                Some((column, filter))
            })
            .collect();

        let matching: Vec<usize> = self
            .rows
            .iter()
            .enumerate()
            .filter(|(_, row)| {
                matches_search(row, &visible, &needle)
                    && filters.iter().all(|(column, filter)| filter.matches(row.cell(*column)))
            })
            .map(|(i, _)| i)
            .collect();

        self.order = match self.current_sort() {
            Some((column, direction)) => {
                sort_indices(&self.rows, &matching, &self.columns[column], column, direction)
            }
            None => matching,
        };
        self.page.go_to(self.page.page_index, self.order.len());
    }
}
