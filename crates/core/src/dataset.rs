//! In-memory dataset and the CSV loader that builds it
//!
//! The dataset is read once at startup and never mutated afterwards; callers
//! share it behind an [`Arc`](std::sync::Arc).

use crate::record::{Record, Schema};
use crate::{EdudirError, Result};
use std::io::Read;
use std::path::Path;

/// Ordered, immutable collection of records
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    records: Vec<Record>,
    schema: Schema,
}

impl Dataset {
    /// Create a dataset from already parsed records
    pub fn new(records: Vec<Record>, schema: Schema) -> Self {
        Self { records, schema }
    }

    /// Load a dataset from a CSV file with a header row
    ///
    /// # Errors
    ///
    /// Returns `EdudirError::Load` if the file cannot be opened,
    /// `EdudirError::MissingColumn` if the header lacks a schema column and
    /// `EdudirError::Csv` if a row is malformed.
    pub fn load_csv<P: AsRef<Path>>(path: P, schema: Schema) -> Result<Self> {
        let path = path.as_ref();
        let label = path.display().to_string();
        tracing::info!("Loading dataset from: {}", label);

        let file = std::fs::File::open(path)
            .map_err(|e| EdudirError::load(label.clone(), e.to_string()))?;
        let dataset = Self::from_reader(file, schema, &label)?;

        tracing::info!(
            records = dataset.len(),
            "Loaded {} records from {}",
            dataset.len(),
            label
        );
        Ok(dataset)
    }

    /// Parse CSV content from any reader
    ///
    /// `source` only labels errors and log lines.
    pub fn from_reader<R: Read>(reader: R, schema: Schema, source: &str) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::Headers)
            .from_reader(reader);

        let headers: Vec<String> = reader
            .headers()?
            .iter()
            .map(|h| h.trim_start_matches('\u{feff}').to_string())
            .collect();

        for column in schema.required_columns() {
            if !headers.iter().any(|h| h == column) {
                return Err(EdudirError::missing_column(source, column));
            }
        }

        let mut records = Vec::new();
        for row in reader.records() {
            let row = row?;
            records.push(Record::from_pairs(
                headers.iter().map(String::as_str).zip(row.iter()),
            ));
        }

        tracing::debug!("Parsed {} CSV rows from {}", records.len(), source);
        Ok(Self { records, schema })
    }

    /// All records in source order
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Columns the query engine reads
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Number of records
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset holds no records
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
