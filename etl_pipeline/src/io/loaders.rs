use anyhow::{Context, Result};
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::path::{Path, PathBuf};

use crate::core::Dataset;
use crate::error::{EtlError, EtlResult};
use crate::parsing::parquet_parser::PARQUET_INDEX_COLUMN;

/// Format of a pipeline destination file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SinkFormat {
    Csv,
    Parquet,
}

impl SinkFormat {
    /// Infer the format from the file extension
    pub fn from_path(path: &Path) -> EtlResult<Self> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .ok_or_else(|| EtlError::Load(format!("File has no extension: {}", path.display())))?;

        match extension.to_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "parquet" | "pq" => Ok(Self::Parquet),
            _ => Err(EtlError::Load(format!(
                "Unsupported destination format: {}",
                extension
            ))),
        }
    }
}

/// Write a dataset to CSV, overwriting `destination`.
///
/// The row index is written as the first column under an empty header.
pub fn load_to_csv(dataset: &Dataset, destination: &Path) -> EtlResult<()> {
    write_csv(dataset, destination).map_err(|e| EtlError::Load(format!("{:#}", e)))
}

/// Write a dataset to Parquet, overwriting `destination`.
///
/// A labelled index is stored as the `__index_level_0__` column; a positional
/// index is not written.
pub fn load_to_parquet(dataset: &Dataset, destination: &Path) -> EtlResult<()> {
    write_parquet(dataset, destination).map_err(|e| EtlError::Load(format!("{:#}", e)))
}

/// Write a dataset with the loader for `format`.
pub fn load(dataset: &Dataset, destination: &Path, format: SinkFormat) -> EtlResult<()> {
    match format {
        SinkFormat::Csv => load_to_csv(dataset, destination),
        SinkFormat::Parquet => load_to_parquet(dataset, destination),
    }
}

/// `dir/name.ext` becomes `dir/name_v{version}.ext`.
pub fn versioned_path(destination: &Path, version: u32) -> PathBuf {
    let stem = destination
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();

    let file_name = match destination.extension() {
        Some(ext) => format!("{}_v{}.{}", stem, version, ext.to_string_lossy()),
        None => format!("{}_v{}", stem, version),
    };

    destination.with_file_name(file_name)
}

fn write_csv(dataset: &Dataset, destination: &Path) -> Result<()> {
    let mut df = dataset.frame().clone();
    df.insert_column(0, dataset.index_values().with_name(PlSmallStr::EMPTY))
        .context("Failed to prepend index column")?;

    let mut file = File::create(destination)
        .with_context(|| format!("Failed to create CSV file: {}", destination.display()))?;

    CsvWriter::new(&mut file)
        .include_header(true)
        .with_separator(b',')
        .finish(&mut df)
        .with_context(|| format!("Failed to write CSV file: {}", destination.display()))
}

fn write_parquet(dataset: &Dataset, destination: &Path) -> Result<()> {
    let mut df = dataset.frame().clone();
    if !dataset.has_positional_index() {
        df.with_column(
            dataset
                .index_values()
                .with_name(PARQUET_INDEX_COLUMN.into()),
        )
        .context("Failed to append index column")?;
    }

    let file = File::create(destination)
        .with_context(|| format!("Failed to create Parquet file: {}", destination.display()))?;

    ParquetWriter::new(file)
        .finish(&mut df)
        .with_context(|| format!("Failed to write Parquet file: {}", destination.display()))?;

    Ok(())
}
