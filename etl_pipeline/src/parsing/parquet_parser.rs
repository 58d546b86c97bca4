use anyhow::{Context, Result};
use polars::prelude::*;
use std::fs::File;
use std::path::Path;

use crate::core::Dataset;
use crate::error::{EtlError, EtlResult};

/// Column name under which a labelled row index is stored in Parquet files.
pub const PARQUET_INDEX_COLUMN: &str = "__index_level_0__";

/// Read a Parquet file into a [`Dataset`].
///
/// A `__index_level_0__` column is restored as the row index.
pub fn extract_from_parquet(parquet_path: &Path) -> EtlResult<Dataset> {
    parse_parquet(parquet_path).map_err(|e| EtlError::Extraction(format!("{:#}", e)))
}

fn parse_parquet(parquet_path: &Path) -> Result<Dataset> {
    let file = File::open(parquet_path)
        .with_context(|| format!("Failed to open Parquet file: {}", parquet_path.display()))?;

    let df = ParquetReader::new(file)
        .finish()
        .context("Failed to decode Parquet into DataFrame")?;

    let Ok(index) = df.column(PARQUET_INDEX_COLUMN) else {
        return Ok(Dataset::from_frame(df));
    };

    let labels = index.clone().with_name(PlSmallStr::EMPTY);
    let df = df
        .drop(PARQUET_INDEX_COLUMN)
        .context("Failed to detach Parquet index column")?;

    Dataset::with_labels(df, labels).context("Failed to attach Parquet row index")
}
