//! FILENAME: core/table-engine/src/filter.rs
//! Search box and per-column filter expressions.
//!
//! Column filter syntax:
//! - `text`        case-insensitive substring of the displayed value
//! - `>N`, `>=N`, `<N`, `<=N`, `=N`   numeric comparison against the sort key
//! - leading `!`   negates either form

use serde::{Deserialize, Serialize};

use crate::row::{CellValue, RowDescriptor};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CompareOp {
    Greater,
    GreaterOrEqual,
    Less,
    LessOrEqual,
    Equal,
}

impl CompareOp {
    fn holds(self, lhs: f64, rhs: f64) -> bool {
        match self {
            CompareOp::Greater => lhs > rhs,
            CompareOp::GreaterOrEqual => lhs >= rhs,
            CompareOp::Less => lhs < rhs,
            CompareOp::LessOrEqual => lhs <= rhs,
            CompareOp::Equal => lhs == rhs,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FilterOp {
    /// Lowercased needle.
    Contains(String),
    Compare(CompareOp, f64),
}

/// A parsed column filter, keeping the text the user typed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnFilter {
    pub source: String,
    pub negate: bool,
    pub op: FilterOp,
}

impl ColumnFilter {
    /// `None` for input that filters nothing (blank, or a lone `!`).
    pub fn parse(expression: &str) -> Option<Self> {
        let trimmed = expression.trim();
        let (negate, body) = match trimmed.strip_prefix('!') {
            Some(rest) => (true, rest.trim_start()),
            None => (false, trimmed),
        };
        if body.is_empty() {
            return None;
        }

        // Two-character operators first so ">=" isn't read as ">" + "=5".
        const OPERATORS: [(&str, CompareOp); 5] = [
            (">=", CompareOp::GreaterOrEqual),
            ("<=", CompareOp::LessOrEqual),
            (">", CompareOp::Greater),
            ("<", CompareOp::Less),
            ("=", CompareOp::Equal),
        ];
        let compare = OPERATORS.iter().find_map(|(prefix, op)| {
            let number = body.strip_prefix(*prefix)?.trim().parse::<f64>().ok()?;
            number.is_finite().then_some(FilterOp::Compare(*op, number))
        });

        Some(ColumnFilter {
            source: expression.to_string(),
            negate,
            op: compare.unwrap_or_else(|| FilterOp::Contains(body.to_lowercase())),
        })
    }

    /// Numeric comparisons never match a cell without a numeric sort key;
    /// negation is applied afterwards.
    pub fn matches(&self, cell: Option<&CellValue>) -> bool {
        let hit = match &self.op {
            FilterOp::Contains(needle) => cell
                .map(|c| c.display().display_text().to_lowercase().contains(needle.as_str()))
                .unwrap_or(false),
            FilterOp::Compare(op, rhs) => cell
                .and_then(|c| c.sort_value().as_number())
                .map(|lhs| op.holds(lhs, *rhs))
                .unwrap_or(false),
        };
        hit != self.negate
    }
}

/// True when any of `columns` displays text containing `needle_lower`.
/// An empty needle matches every row.
pub fn matches_search(row: &RowDescriptor, columns: &[usize], needle_lower: &str) -> bool {
    if needle_lower.is_empty() {
        return true;
    }
    columns.iter().any(|&c| {
        row.cell(c)
            .map(|cell| cell.display().display_text().to_lowercase().contains(needle_lower))
            .unwrap_or(false)
    })
}
