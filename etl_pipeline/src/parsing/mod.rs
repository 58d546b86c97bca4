//! Extractors for the supported source formats.
//!
//! Every extractor reads a file into a [`crate::core::Dataset`] and reports
//! failures (missing file, corrupt content, wrong JSON shape) as
//! [`crate::error::EtlError::Extraction`].
//!
//! # Extractors
//!
//! - [`csv_parser`]: delimited text with a header row
//! - [`parquet_parser`]: columnar binary files
//! - [`json_parser`]: a JSON object keyed by row id
//!
//! # Example
//!
//! ```no_run
//! use etl_pipeline::parsing::{extract, SourceFormat};
//! use std::path::Path;
//!
//! let path = Path::new("data-sources/scores.parquet");
//! let format = SourceFormat::from_path(path).expect("Unknown extension");
//! let dataset = extract(path, format).expect("Failed to extract");
//! println!("{:?}", dataset.shape());
//! ```

pub mod csv_parser;
pub mod json_parser;
pub mod parquet_parser;

#[cfg(test)]
mod csv_parser_tests;
#[cfg(test)]
mod json_parser_tests;
#[cfg(test)]
mod parquet_parser_tests;

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::core::Dataset;
use crate::error::{EtlError, EtlResult};

pub use csv_parser::extract_from_csv;
pub use json_parser::{extract_from_json, extract_from_json_str};
pub use parquet_parser::extract_from_parquet;

/// Format of a pipeline source file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceFormat {
    Csv,
    Parquet,
    Json,
}

impl SourceFormat {
    /// Infer the format from the file extension.
    pub fn from_path(path: &Path) -> EtlResult<Self> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .ok_or_else(|| {
                EtlError::Extraction(format!("File has no extension: {}", path.display()))
            })?;

        match extension.to_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "parquet" | "pq" => Ok(Self::Parquet),
            "json" => Ok(Self::Json),
            _ => Err(EtlError::Extraction(format!(
                "Unsupported source format: {}",
                extension
            ))),
        }
    }
}

/// Extract a dataset using the extractor for `format`.
pub fn extract(path: &Path, format: SourceFormat) -> EtlResult<Dataset> {
    match format {
        SourceFormat::Csv => extract_from_csv(path),
        SourceFormat::Parquet => extract_from_parquet(path),
        SourceFormat::Json => extract_from_json(path),
    }
}
