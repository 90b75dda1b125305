use std::path::{Path, PathBuf};

use async_trait::async_trait;
use csv::{ReaderBuilder, Trim};
use dc_core::{coerce, Dataset, Record};
use tracing::{debug, info, warn};

use crate::config::LoadConfig;
use crate::schema::{summarize, ColumnKind};
use crate::ParseError;

/// Parse catalog text into a dataset.
///
/// The first non-blank line names the fields; each following line is one
/// record with exactly as many fields. Header names are trimmed, values are
/// kept verbatim and typed by [`coerce`]. Either the whole text loads or an
/// error is returned.
pub fn parse_catalog(text: &str, config: &LoadConfig) -> Result<Dataset, ParseError> {
    let mut csv_reader = ReaderBuilder::new()
        .has_headers(true)
        .delimiter(config.delimiter_byte()?)
        .quoting(config.quoting)
        .trim(Trim::Headers)
        .from_reader(text.trim().as_bytes());

    let headers = csv_reader.headers()?.clone();
    if headers.iter().all(str::is_empty) {
        return Err(ParseError::MissingHeader);
    }
    let columns: Vec<String> = headers.iter().map(str::to_string).collect();

    let mut records = Vec::new();
    for result in csv_reader.records() {
        let row = result?;
        let record: Record = columns
            .iter()
            .zip(row.iter())
            .map(|(name, raw)| (name.as_str(), coerce(raw)))
            .collect();
        records.push(record);
    }

    let dataset = Dataset::new(columns, records)?;

    for column in summarize(&dataset) {
        if column.kind == ColumnKind::Mixed {
            warn!(
                "Column '{}' mixes numbers and text; it will sort as text",
                column.name
            );
        }
    }

    debug!(
        "Parsed {} records (max height {}, max width {})",
        dataset.len(),
        dataset.max_height(),
        dataset.max_width()
    );
    Ok(dataset)
}

/// CSV file data source
pub struct CsvSource {
    /// Path to the CSV file
    path: PathBuf,
    /// Display name (file name)
    name: String,
    config: LoadConfig,
}

impl CsvSource {
    pub fn new(path: impl Into<PathBuf>, config: LoadConfig) -> Self {
        let path = path.into();
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("unknown.csv")
            .to_string();
        Self { path, name, config }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read and parse the file on the calling thread
    pub fn load_blocking(&self) -> Result<Dataset, ParseError> {
        let text = std::fs::read_to_string(&self.path)?;
        parse_catalog(&text, &self.config)
    }

    /// Read and parse the file on the blocking thread pool
    pub async fn load_dataset(&self) -> Result<Dataset, ParseError> {
        info!("Loading catalog from {:?}", self.path);
        let path = self.path.clone();
        let config = self.config.clone();

        tokio::task::spawn_blocking(move || {
            let text = std::fs::read_to_string(&path)?;
            parse_catalog(&text, &config)
        })
        .await?
    }
}

#[async_trait]
impl dc_core::CatalogSource for CsvSource {
    async fn load(&self) -> anyhow::Result<Dataset> {
        Ok(self.load_dataset().await?)
    }

    fn source_name(&self) -> &str {
        &self.name
    }
}
