//! Single-column sorting
//!
//! Two numeric cells compare numerically. Every other pairing, including a
//! number against text, compares the text forms: case-insensitively first,
//! with lowercase ahead of uppercase on case-only ties.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::labels::format_label;
use crate::{CatalogError, Dataset, Record, Value, HEIGHT};

/// Sort direction
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl FromStr for SortOrder {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" => Ok(SortOrder::Asc),
            "desc" => Ok(SortOrder::Desc),
            _ => Err(CatalogError::InvalidSortOrder(s.to_string())),
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortOrder::Asc => f.write_str("asc"),
            SortOrder::Desc => f.write_str("desc"),
        }
    }
}

/// Column and direction to order the view by
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SortSpec {
    pub column: String,
    pub order: SortOrder,
}

impl SortSpec {
    pub fn new(column: impl Into<String>, order: SortOrder) -> Self {
        Self {
            column: column.into(),
            order,
        }
    }
}

impl Default for SortSpec {
    fn default() -> Self {
        Self::new(HEIGHT, SortOrder::Asc)
    }
}

/// Entry of the sort-column control
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SortColumnOption {
    pub column: String,
    pub label: String,
    pub selected: bool,
}

fn collate(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| b.cmp(a))
}

fn cell_text(value: Option<&Value>) -> String {
    value.map(Value::to_text).unwrap_or_default()
}

/// Compare two records on `column` in the given direction
pub fn compare(a: &Record, b: &Record, column: &str, order: SortOrder) -> Ordering {
    let (left, right) = (a.get(column), b.get(column));
    let ordering = match (left, right) {
        (Some(Value::Number(x)), Some(Value::Number(y))) => {
            x.partial_cmp(y).unwrap_or_else(|| x.total_cmp(y))
        }
        _ => collate(&cell_text(left), &cell_text(right)),
    };

    match order {
        SortOrder::Asc => ordering,
        SortOrder::Desc => ordering.reverse(),
    }
}

/// Stable in-place sort
pub fn sort(records: &mut [&Record], spec: &SortSpec) {
    records.sort_by(|a, b| compare(a, b, &spec.column, spec.order));
}

/// Every dataset column as a sort option, in header order
pub fn sort_columns(dataset: &Dataset, spec: &SortSpec) -> Vec<SortColumnOption> {
    dataset
        .columns()
        .iter()
        .map(|column| SortColumnOption {
            column: column.clone(),
            label: format_label(column),
            selected: *column == spec.column,
        })
        .collect()
}
