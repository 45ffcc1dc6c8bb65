//! FILENAME: core/table-engine/tests/test_filters_prefs.rs
//! Integration tests for search, column filters, column visibility and
//! persisted table preferences.

mod common;

use common::{keys, PlayerStatsFixture, StandingsFixture};
use serde_json::json;
use table_engine::{
    ColumnSpec, MemoryPrefsStore, Pagination, PrefsStore, SortDirection, SortType, TableConfig,
    TableEngine, TableEvent, TablePrefs,
};

// ============================================================================
// SEARCH AND FILTERS
// ============================================================================

#[test]
fn test_search_covers_visible_columns_only() {
    let mut engine = PlayerStatsFixture::engine();

    engine.apply(TableEvent::Search("G".to_string())).unwrap();
    assert_eq!(keys(engine.ordered_rows()), vec!["Ann Lee", "Di Moss"]);

    engine.toggle_column(1).unwrap();
    let view = engine.view();
    assert_eq!(view.filtered_rows, 0);
    assert_eq!(view.total_rows, 5);
    assert_eq!(view.page_count, 1);
    assert_eq!(view.search, "G");
}

#[test]
fn test_numeric_column_filters() {
    let mut engine = PlayerStatsFixture::engine();

    engine.filter_column(2, ">= 300").unwrap();
    assert_eq!(keys(engine.ordered_rows()), vec!["Ann Lee", "Cy Dunn", "Ed Vale"]);
    assert_eq!(engine.filter_expression(2), Some(">= 300"));

    engine.filter_column(2, "!>=300").unwrap();
    assert_eq!(keys(engine.ordered_rows()), vec!["Bo Park", "Di Moss"]);

    // Blank clears.
    engine.filter_column(2, "  ").unwrap();
    assert_eq!(engine.filter_expression(2), None);
    assert_eq!(engine.ordered_rows().count(), 5);
}

#[test]
fn test_negated_comparison_keeps_missing_values() {
    let mut engine = PlayerStatsFixture::engine();

    engine.filter_column(5, ">20").unwrap();
    assert_eq!(keys(engine.ordered_rows()), vec!["Ann Lee", "Cy Dunn"]);

    engine.filter_column(5, "!>20").unwrap();
    assert_eq!(keys(engine.ordered_rows()), vec!["Bo Park", "Di Moss", "Ed Vale"]);
}

#[test]
fn test_filters_combine_with_search_and_sort() {
    let mut engine = PlayerStatsFixture::engine();

    engine
        .apply(TableEvent::FilterColumn { column: 3, expression: ">10".to_string() })
        .unwrap();
    engine.apply(TableEvent::ActivateColumn(2)).unwrap();
    assert_eq!(keys(engine.ordered_rows()), vec!["Ed Vale", "Ann Lee", "Cy Dunn"]);

    engine.set_search("f");
    assert_eq!(keys(engine.ordered_rows()), vec!["Ed Vale"]);

    engine.apply(TableEvent::ClearFilters).unwrap();
    assert_eq!(engine.search(), "");
    assert_eq!(engine.filter_expression(3), None);
    assert_eq!(
        keys(engine.ordered_rows()),
        vec!["Di Moss", "Bo Park", "Ed Vale", "Ann Lee", "Cy Dunn"]
    );
}

#[test]
fn test_filter_out_of_range_column() {
    let mut engine = PlayerStatsFixture::engine();
    assert!(engine.filter_column(6, ">1").is_err());
    assert!(engine.apply(TableEvent::ToggleColumn(9)).is_err());
}

// ============================================================================
// COLUMN REPLACEMENT
// ============================================================================

#[test]
fn test_state_follows_columns_by_key() {
    let config = TableConfig::new("standings").with_default_sort(StandingsFixture::WON, SortDirection::Descending);
    let mut engine = StandingsFixture::engine(config);
    engine.filter_column(StandingsFixture::WON, ">45").unwrap();
    engine.toggle_column(StandingsFixture::STREAK).unwrap();

    let reordered = vec![
        ColumnSpec::new("Team").with_sort_type(SortType::String),
        ColumnSpec::new("L").with_sort_type(SortType::Number),
        ColumnSpec::new("W").with_sort_type(SortType::Number),
        ColumnSpec::new("%").with_sort_type(SortType::Number),
        ColumnSpec::new("Streak").with_sort_sequence(&[]),
    ];
    engine.set_columns(reordered).unwrap();

    assert_eq!(engine.current_sort(), Some((2, SortDirection::Descending)));
    assert_eq!(engine.filter_expression(2), Some(">45"));
    assert_eq!(engine.filter_expression(1), None);
    assert!(engine.is_hidden(4));
}

fn standings_with_won_sequence(sequence: &[SortDirection]) -> Vec<ColumnSpec> {
    let mut columns = StandingsFixture::columns();
    columns[StandingsFixture::WON] = ColumnSpec::new("W")
        .with_sort_type(SortType::Number)
        .with_sort_sequence(sequence);
    columns
}

#[test]
fn test_reordered_sequence_keeps_visible_direction() {
    let config = TableConfig::new("standings").with_pagination(Pagination::PageSize(3));
    let mut engine = StandingsFixture::engine(config);
    engine.activate_column(StandingsFixture::WON).unwrap();
    engine.activate_column(StandingsFixture::WON).unwrap();
    engine.change_page(2);
    let before = keys(engine.ordered_rows());
    assert_eq!(engine.current_sort(), Some((StandingsFixture::WON, SortDirection::Descending)));

    engine
        .set_columns(standings_with_won_sequence(&[SortDirection::Descending, SortDirection::Ascending]))
        .unwrap();
    assert_eq!(engine.current_sort(), Some((StandingsFixture::WON, SortDirection::Descending)));
    assert_eq!(engine.sort_state().map(|s| s.direction_index), Some(0));
    assert_eq!(keys(engine.ordered_rows()), before);
    assert_eq!(engine.page_index(), 2);

    // Next click continues from the direction on screen.
    engine.activate_column(StandingsFixture::WON).unwrap();
    assert_eq!(engine.current_sort(), Some((StandingsFixture::WON, SortDirection::Ascending)));
}

#[test]
fn test_unavailable_direction_falls_back_to_default() {
    let config = TableConfig::new("standings").with_pagination(Pagination::PageSize(3));
    let mut engine = StandingsFixture::engine(config);
    engine.activate_column(StandingsFixture::WON).unwrap();
    engine.activate_column(StandingsFixture::WON).unwrap();
    engine.change_page(2);

    engine
        .set_columns(standings_with_won_sequence(&[SortDirection::Ascending]))
        .unwrap();
    assert_eq!(engine.current_sort(), None);
    assert_eq!(engine.page_index(), 0);
    assert_eq!(keys(engine.ordered_rows()), vec!["1", "2", "3", "4", "5", "6", "7", "8"]);
}

#[test]
fn test_removed_sort_column_falls_back_to_default() {
    let config = TableConfig::new("standings")
        .with_pagination(Pagination::PageSize(3))
        .with_default_sort(StandingsFixture::LOST, SortDirection::Descending);
    let mut engine = StandingsFixture::engine(config);
    engine.activate_column(StandingsFixture::PCT).unwrap();
    engine.filter_column(StandingsFixture::PCT, ">.5").unwrap();
    engine.change_page(1);

    let without_pct = vec![
        ColumnSpec::new("Team").with_sort_type(SortType::String),
        ColumnSpec::new("W").with_sort_type(SortType::Number),
        ColumnSpec::new("L").with_sort_type(SortType::Number),
    ];
    engine.set_columns(without_pct).unwrap();

    assert_eq!(engine.current_sort(), Some((StandingsFixture::LOST, SortDirection::Descending)));
    assert_eq!(engine.page_index(), 0);
    assert_eq!(engine.ordered_rows().count(), 8);
}

// ============================================================================
// PREFERENCES
// ============================================================================

#[test]
fn test_prefs_restore_page_size_and_hidden_columns() {
    let config = TableConfig::new("player_stats")
        .with_super_columns(PlayerStatsFixture::super_columns())
        .with_pagination(Pagination::Enabled(true));
    let mut store = MemoryPrefsStore::new();

    let mut engine = TableEngine::new(PlayerStatsFixture::columns(), PlayerStatsFixture::rows(), config.clone()).unwrap();
    engine.change_page_size(2);
    engine.toggle_column(5).unwrap();
    engine.toggle_column(1).unwrap();
    engine.save_prefs(&mut store).unwrap();

    assert_eq!(
        store.load("player_stats"),
        Some(TablePrefs {
            page_size: Some(2),
            hidden_columns: vec!["Pos".to_string(), "PTS@2".to_string()],
        })
    );

    let mut restored = TableEngine::new(PlayerStatsFixture::columns(), PlayerStatsFixture::rows(), config).unwrap();
    restored.load_prefs(&store);
    assert_eq!(restored.visible_columns(), vec![0, 2, 3, 4]);
    assert_eq!(restored.page_count(), 3);
}

#[test]
fn test_configured_page_size_is_not_pinned() {
    let mut store = MemoryPrefsStore::new();
    let config = TableConfig::new("standings").with_pagination(Pagination::Enabled(true));
    let mut engine = StandingsFixture::engine(config);
    engine.change_page_size(10);
    engine.toggle_column(StandingsFixture::STREAK).unwrap();
    assert_eq!(engine.prefs().page_size, None);
    engine.save_prefs(&mut store).unwrap();

    // A later config default wins over an untouched size.
    let resized = TableConfig::new("standings").with_pagination(Pagination::PageSize(25));
    let mut restored = StandingsFixture::engine(resized);
    restored.load_prefs(&store);
    assert_eq!(restored.page_state().page_size, Some(25));
    assert!(restored.is_hidden(StandingsFixture::STREAK));

    restored.change_page_size(50);
    assert_eq!(restored.prefs().page_size, Some(50));
}

#[test]
fn test_prefs_ignore_unknown_and_total_hiding() {
    let mut engine = StandingsFixture::engine(TableConfig::new("standings"));

    engine.apply_prefs(&TablePrefs {
        page_size: Some(50),
        hidden_columns: vec!["Streak".to_string(), "Conf".to_string()],
    });
    assert_eq!(engine.visible_columns(), vec![0, 1, 2, 3]);
    // Not paginated, so the page size has nowhere to go.
    assert_eq!(engine.prefs().page_size, None);

    let every_key = engine.column_keys().to_vec();
    engine.apply_prefs(&TablePrefs {
        page_size: None,
        hidden_columns: every_key,
    });
    assert_eq!(engine.visible_columns().len(), 5);
}

#[test]
fn test_unnamed_tables_are_not_persisted() {
    let mut store = MemoryPrefsStore::new();
    let mut engine = StandingsFixture::engine(TableConfig::default());
    engine.toggle_column(StandingsFixture::STREAK).unwrap();

    engine.save_prefs(&mut store).unwrap();
    assert!(store.is_empty());
}

#[test]
fn test_rename_discards_filters_and_visibility() {
    let mut engine = PlayerStatsFixture::engine();
    engine.filter_column(2, ">100").unwrap();
    engine.toggle_column(1).unwrap();

    let mut config = PlayerStatsFixture::config();
    config.name = "player_stats_playoffs".to_string();
    engine.set_config(config).unwrap();

    assert_eq!(engine.filter_expression(2), None);
    assert!(!engine.is_hidden(1));
    assert_eq!(engine.ordered_rows().count(), 5);
}

// ============================================================================
// JSON BOUNDARY
// ============================================================================

#[test]
fn test_config_from_json_and_view_to_json() {
    let config: TableConfig = serde_json::from_str(
        r#"{ "name": "standings", "defaultSort": [3, "desc"], "pagination": 3, "nonfluid": true }"#,
    )
    .unwrap();
    let engine = StandingsFixture::engine(config);

    let view = serde_json::to_value(engine.view()).unwrap();
    assert_eq!(view["pageCount"], json!(3));
    assert_eq!(view["firstRow"], json!(1));
    assert_eq!(view["sort"], json!([3, "desc"]));
    assert_eq!(view["nonfluid"], json!(true));
    assert_eq!(view["rows"][0]["key"], json!(1));
    assert_eq!(view["rows"][0]["cells"][3]["value"], json!(".610"));
    assert_eq!(view["rows"][0]["classes"], json!(["table-info"]));
    assert_eq!(view["header"]["columns"][3]["sorted"], json!("desc"));
}
