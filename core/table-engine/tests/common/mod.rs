//! FILENAME: core/table-engine/tests/common/mod.rs
//! Fixtures for table engine integration tests.

#![allow(dead_code)]

use table_engine::{
    CellValue, ClassMap, ColumnCatalog, ColumnSpec, RowDescriptor, Scalar, SortType,
    SuperColumnGroup, TableConfig, TableEngine,
};

// ============================================================================
// STANDINGS
// ============================================================================

/// Conference standings: one row per team, win percentage rendered
/// rounded but sorted at full precision.
pub struct StandingsFixture;

impl StandingsFixture {
    pub const TEAM: usize = 0;
    pub const WON: usize = 1;
    pub const LOST: usize = 2;
    pub const PCT: usize = 3;
    pub const STREAK: usize = 4;

    pub fn columns() -> Vec<ColumnSpec> {
        vec![
            ColumnSpec::new("Team").with_sort_type(SortType::String),
            ColumnSpec::new("W").with_sort_type(SortType::Number),
            ColumnSpec::new("L").with_sort_type(SortType::Number),
            ColumnSpec::new("%").with_sort_type(SortType::Number),
            ColumnSpec::new("Streak").with_sort_sequence(&[]),
        ]
    }

    /// (abbrev, won, lost, streak)
    pub fn data() -> Vec<(&'static str, i64, i64, &'static str)> {
        vec![
            ("BOS", 50, 32, "W3"),
            ("NYK", 50, 32, "L1"),
            ("MIA", 44, 38, "W1"),
            ("IND", 47, 35, "L2"),
            ("PHI", 41, 41, "W2"),
            ("CHI", 39, 43, "L4"),
            ("TOR", 25, 57, "L7"),
            ("DET", 17, 65, "W1"),
        ]
    }

    pub fn rows() -> Vec<RowDescriptor> {
        Self::data()
            .into_iter()
            .enumerate()
            .map(|(i, (team, won, lost, streak))| {
                let pct = won as f64 / (won + lost) as f64;
                RowDescriptor::new(
                    i as i64 + 1,
                    vec![
                        CellValue::from(team),
                        CellValue::from(won),
                        CellValue::from(lost),
                        CellValue::sortable(format_pct(pct), pct),
                        CellValue::from(streak),
                    ],
                )
                .with_classes(ClassMap::new().set("table-info", team == "BOS"))
            })
            .collect()
    }

    pub fn engine(config: TableConfig) -> TableEngine {
        TableEngine::new(Self::columns(), Self::rows(), config).unwrap()
    }
}

/// ".610" style, as standings tables show it.
pub fn format_pct(pct: f64) -> String {
    let text = format!("{:.3}", pct);
    match text.strip_prefix('0') {
        Some(rest) => rest.to_string(),
        None => text,
    }
}

// ============================================================================
// PLAYER STATS
// ============================================================================

/// Player table with a career block and a best-season block that share
/// column titles.
pub struct PlayerStatsFixture;

impl PlayerStatsFixture {
    pub const CATALOG_JSON: &'static str = r#"{
        "Name": { "title": "Name", "sortType": "string", "width": "25%" },
        "Pos":  { "title": "Pos", "sortSequence": [] },
        "GP":   { "title": "GP", "sortType": "number", "desc": "Games Played" },
        "PTS":  { "title": "PTS", "sortType": "number", "sortSequence": ["desc", "asc"], "desc": "Points" }
    }"#;

    pub fn column_ids() -> Vec<&'static str> {
        vec!["Name", "Pos", "GP", "PTS", "GP", "PTS"]
    }

    pub fn catalog() -> ColumnCatalog {
        ColumnCatalog::from_json(Self::CATALOG_JSON).unwrap()
    }

    pub fn columns() -> Vec<ColumnSpec> {
        Self::catalog().resolve(Self::column_ids().as_slice()).unwrap()
    }

    pub fn super_columns() -> Vec<SuperColumnGroup> {
        vec![
            SuperColumnGroup::new("", 2),
            SuperColumnGroup::new("Career", 2),
            SuperColumnGroup::new("Best Season", 2),
        ]
    }

    /// (name, pos, career gp, career pts, best gp, best pts); `None` where
    /// a player has no qualifying season yet.
    pub fn data() -> Vec<(&'static str, &'static str, i64, f64, Option<i64>, Option<f64>)> {
        vec![
            ("Ann Lee", "G", 410, 18.2, Some(82), Some(24.1)),
            ("Bo Park", "F", 122, 9.7, Some(80), Some(12.0)),
            ("Cy Dunn", "C", 655, 18.2, Some(79), Some(27.5)),
            ("Di Moss", "G", 12, 3.1, None, None),
            ("Ed Vale", "F", 300, 14.4, Some(82), Some(17.9)),
        ]
    }

    pub fn rows() -> Vec<RowDescriptor> {
        Self::data()
            .into_iter()
            .map(|(name, pos, gp, pts, best_gp, best_pts)| {
                RowDescriptor::new(
                    name,
                    vec![
                        CellValue::from(name),
                        CellValue::from(pos),
                        CellValue::from(gp),
                        CellValue::from(pts),
                        CellValue::Scalar(Scalar::from(best_gp)),
                        CellValue::Scalar(Scalar::from(best_pts)),
                    ],
                )
            })
            .collect()
    }

    pub fn config() -> TableConfig {
        TableConfig::new("player_stats").with_super_columns(Self::super_columns())
    }

    pub fn engine() -> TableEngine {
        TableEngine::new(Self::columns(), Self::rows(), Self::config()).unwrap()
    }
}

// ============================================================================
// GENERATED ROWS
// ============================================================================

/// `count` rows over columns `[Id, Score]` where scores repeat every 7
/// rows and every 5th score is missing.
pub fn scored_rows(count: usize) -> Vec<RowDescriptor> {
    (0..count)
        .map(|i| {
            let score = if i % 5 == 4 {
                CellValue::default()
            } else {
                CellValue::from(((i * 3) % 7) as i64)
            };
            RowDescriptor::new(i as i64, vec![CellValue::from(i as i64), score])
        })
        .collect()
}

pub fn scored_columns() -> Vec<ColumnSpec> {
    vec![
        ColumnSpec::new("Id").with_sort_type(SortType::Number),
        ColumnSpec::new("Score").with_sort_type(SortType::Number),
    ]
}

pub fn keys<'a>(rows: impl IntoIterator<Item = &'a RowDescriptor>) -> Vec<String> {
    rows.into_iter().map(|r| r.key.to_string()).collect()
}
