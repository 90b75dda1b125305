use ahash::AHashSet;
use dc_core::{Dataset, Value};

/// Value kind observed in one column across all records
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    /// Every value coerced to a number
    Numeric,
    /// Every value stayed text
    Text,
    /// Numbers and text in the same column; sorting falls back to text
    Mixed,
    /// No records
    Empty,
}

/// Statistics about a column
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnSummary {
    pub name: String,
    pub kind: ColumnKind,
    pub distinct_count: usize,
}

/// Summarize every column of the dataset, in header order
pub fn summarize(dataset: &Dataset) -> Vec<ColumnSummary> {
    dataset
        .columns()
        .iter()
        .map(|name| analyze_column(dataset, name))
        .collect()
}

fn analyze_column(dataset: &Dataset, name: &str) -> ColumnSummary {
    let mut numeric = 0usize;
    let mut text = 0usize;
    let mut distinct = AHashSet::new();

    for value in dataset.records().iter().filter_map(|r| r.get(name)) {
        match value {
            Value::Number(_) => numeric += 1,
            Value::Text(_) => text += 1,
        }
        distinct.insert(value.to_text());
    }

    let kind = match (numeric, text) {
        (0, 0) => ColumnKind::Empty,
        (_, 0) => ColumnKind::Numeric,
        (0, _) => ColumnKind::Text,
        _ => ColumnKind::Mixed,
    };

    ColumnSummary {
        name: name.to_string(),
        kind,
        distinct_count: distinct.len(),
    }
}
