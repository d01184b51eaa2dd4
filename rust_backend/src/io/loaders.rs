use anyhow::{Context, Result};
use log::info;
use std::path::Path;

use crate::core::Dataset;
use crate::parsing::csv_parser;

/// Represents the delimiter flavour of a dataset file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatasetSourceType {
    Csv,
    Tsv,
    /// Any other single-byte separator, usually from the config file.
    Delimited(u8),
}

impl DatasetSourceType {
    pub fn separator(&self) -> u8 {
        match self {
            DatasetSourceType::Csv => b',',
            DatasetSourceType::Tsv => b'\t',
            DatasetSourceType::Delimited(separator) => *separator,
        }
    }
}

/// Result of loading a dataset
#[derive(Debug)]
pub struct DatasetLoadResult {
    pub dataset: Dataset,
    pub source_type: DatasetSourceType,
    pub num_records: usize,
}

impl DatasetLoadResult {
    pub fn new(dataset: Dataset, source_type: DatasetSourceType) -> Self {
        let num_records = dataset.len();
        Self {
            dataset,
            source_type,
            num_records,
        }
    }
}

/// Unified interface for loading the flight dataset
pub struct DatasetLoader;

impl DatasetLoader {
    /// Load the dataset from a file (detects the delimiter from the extension)
    pub fn load_from_file(path: &Path) -> Result<DatasetLoadResult> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .context("File has no extension")?;

        let source_type = match extension.to_lowercase().as_str() {
            "csv" => DatasetSourceType::Csv,
            "tsv" | "tab" => DatasetSourceType::Tsv,
            _ => anyhow::bail!("Unsupported file format: {}", extension),
        };

        Self::load_with_separator(path, source_type)
    }

    /// Load the dataset from a file with an explicit delimiter flavour
    pub fn load_with_separator(
        path: &Path,
        source_type: DatasetSourceType,
    ) -> Result<DatasetLoadResult> {
        let records = csv_parser::parse_flights_csv_to_records(path, source_type.separator())
            .with_context(|| format!("Failed to load dataset from {}", path.display()))?;

        info!("Loaded {} flight records from {}", records.len(), path.display());

        Ok(DatasetLoadResult::new(Dataset::new(records), source_type))
    }

    /// Load the dataset from in-memory CSV text
    pub fn load_from_csv_str(content: &str) -> Result<DatasetLoadResult> {
        let df = csv_parser::parse_flights_csv_str(content, b',')
            .context("Failed to parse CSV string")?;
        let records =
            csv_parser::dataframe_to_records(&df).context("Failed to convert rows to records")?;

        Ok(DatasetLoadResult::new(
            Dataset::new(records),
            DatasetSourceType::Csv,
        ))
    }
}
