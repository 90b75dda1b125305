//! Record model and dataset extrema

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Required numeric column holding the device height
pub const HEIGHT: &str = "height";
/// Required numeric column holding the device width
pub const WIDTH: &str = "width";

/// Errors raised while assembling a dataset from parsed rows
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DatasetError {
    #[error("Duplicate column '{0}' in header")]
    DuplicateColumn(String),

    #[error("Required column '{0}' is missing")]
    MissingColumn(String),

    #[error("Record {record}: column '{column}' must be numeric, found '{found}'")]
    NonNumeric {
        record: usize,
        column: String,
        found: String,
    },

    #[error("Record {record}: expected {expected} fields, found {found}")]
    FieldMismatch {
        record: usize,
        expected: usize,
        found: usize,
    },
}

/// A single cell value, typed once at load time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Number(f64),
    Text(String),
}

impl Value {
    /// Numeric payload, if this value was coerced to a number
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            Value::Text(_) => None,
        }
    }

    pub fn is_number(&self) -> bool {
        matches!(self, Value::Number(_))
    }

    /// Text form used for facet matching and display.
    ///
    /// Integral numbers print without a fractional part (`2020`, not `2020.0`).
    pub fn to_text(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // -0 prints as 0
            Value::Number(n) if *n == 0.0 => f.write_str("0"),
            Value::Number(n) => write!(f, "{}", n),
            Value::Text(s) => f.write_str(s),
        }
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

/// Coerce raw cell text into a [`Value`].
///
/// The cell is numeric when its trimmed text is a finite base-10 number
/// (optional sign, integer and/or fractional digits, optional exponent).
/// Anything else, including the empty string, `NaN`, `inf` and hex, is
/// kept verbatim as text.
pub fn coerce(raw: &str) -> Value {
    let trimmed = raw.trim();
    if is_decimal_number(trimmed) {
        if let Ok(n) = trimmed.parse::<f64>() {
            if n.is_finite() {
                return Value::Number(n);
            }
        }
    }
    Value::Text(raw.to_string())
}

fn is_decimal_number(s: &str) -> bool {
    let bytes = s.as_bytes();
    let mut i = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        i += 1;
    }

    let int_start = i;
    while i < bytes.len() && bytes[i].is_ascii_digit() {
        i += 1;
    }
    let mut digits = i - int_start;

    if i < bytes.len() && bytes[i] == b'.' {
        i += 1;
        let frac_start = i;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        digits += i - frac_start;
    }

    if digits == 0 {
        return false;
    }

    if i < bytes.len() && matches!(bytes[i], b'e' | b'E') {
        i += 1;
        if matches!(bytes.get(i), Some(b'+' | b'-')) {
            i += 1;
        }
        let exp_start = i;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        if i == exp_start {
            return false;
        }
    }

    i == bytes.len()
}

/// One catalog entry: field name to value, in header order
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Record {
    fields: IndexMap<String, Value>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a field (builder style, used by loaders and tests)
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: Value) {
        self.fields.insert(key.into(), value);
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// Field value converted to text, if the field exists
    pub fn text(&self, key: &str) -> Option<String> {
        self.get(key).map(Value::to_text)
    }

    pub fn number(&self, key: &str) -> Option<f64> {
        self.get(key).and_then(Value::as_number)
    }

    /// Height in source units; 0 when the field is absent
    pub fn height(&self) -> f64 {
        self.number(HEIGHT).unwrap_or(0.0)
    }

    /// Width in source units; 0 when the field is absent
    pub fn width(&self) -> f64 {
        self.number(WIDTH).unwrap_or(0.0)
    }

    /// Iterate fields in header order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, Value)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

/// Immutable, ordered collection of records plus derived extrema
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    columns: Vec<String>,
    records: Vec<Record>,
    max_height: f64,
    max_width: f64,
}

impl Dataset {
    /// Build a dataset, validating the schema and computing extrema.
    ///
    /// Every record must carry exactly the declared columns, and `height`
    /// and `width` must be numeric everywhere.
    pub fn new(columns: Vec<String>, records: Vec<Record>) -> Result<Self, DatasetError> {
        for (idx, column) in columns.iter().enumerate() {
            if columns[..idx].contains(column) {
                return Err(DatasetError::DuplicateColumn(column.clone()));
            }
        }

        for required in [HEIGHT, WIDTH] {
            if !columns.iter().any(|c| c == required) {
                return Err(DatasetError::MissingColumn(required.to_string()));
            }
        }

        for (idx, record) in records.iter().enumerate() {
            if record.len() != columns.len() {
                return Err(DatasetError::FieldMismatch {
                    record: idx,
                    expected: columns.len(),
                    found: record.len(),
                });
            }
            for required in [HEIGHT, WIDTH] {
                match record.get(required) {
                    Some(Value::Number(_)) => {}
                    Some(other) => {
                        return Err(DatasetError::NonNumeric {
                            record: idx,
                            column: required.to_string(),
                            found: other.to_text(),
                        })
                    }
                    None => return Err(DatasetError::MissingColumn(required.to_string())),
                }
            }
        }

        let max_height = records.iter().map(Record::height).reduce(f64::max).unwrap_or(0.0);
        let max_width = records.iter().map(Record::width).reduce(f64::max).unwrap_or(0.0);

        Ok(Self {
            columns,
            records,
            max_height,
            max_width,
        })
    }

    /// Build a dataset whose columns are taken from the first record
    pub fn from_records(records: Vec<Record>) -> Result<Self, DatasetError> {
        let columns = records
            .first()
            .map(|r| r.iter().map(|(k, _)| k.to_string()).collect())
            .unwrap_or_else(|| vec![HEIGHT.to_string(), WIDTH.to_string()]);
        Self::new(columns, records)
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.columns.iter().any(|c| c == column)
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn max_height(&self) -> f64 {
        self.max_height
    }

    pub fn max_width(&self) -> f64 {
        self.max_width
    }
}
