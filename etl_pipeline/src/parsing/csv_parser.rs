use anyhow::{Context, Result};
use polars::prelude::*;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::core::Dataset;
use crate::error::{EtlError, EtlResult};

/// Read a CSV file with a header row into a [`Dataset`].
///
/// A leading column with an empty header (the index column written by
/// [`crate::io::load_to_csv`]) is restored as the row index.
pub fn extract_from_csv(csv_path: &Path) -> EtlResult<Dataset> {
    parse_csv(csv_path).map_err(|e| EtlError::Extraction(format!("{:#}", e)))
}

fn parse_csv(csv_path: &Path) -> Result<Dataset> {
    let has_index_column = header_starts_with_empty_field(csv_path)?;

    let df = CsvReadOptions::default()
        .with_has_header(true)
        .try_into_reader_with_file_path(Some(csv_path.into()))
        .with_context(|| format!("Failed to open CSV file: {}", csv_path.display()))?
        .finish()
        .context("Failed to parse CSV into DataFrame")?;

    if !has_index_column || df.width() == 0 {
        return Ok(Dataset::from_frame(df));
    }

    let labels = df.get_columns()[0].clone().with_name(PlSmallStr::EMPTY);
    let index_name = df.get_column_names()[0].to_string();
    let df = df
        .drop(&index_name)
        .context("Failed to detach CSV index column")?;

    Dataset::with_labels(df, labels).context("Failed to attach CSV row index")
}

/// Whether the header line begins with an empty field (`,a,b`).
fn header_starts_with_empty_field(csv_path: &Path) -> Result<bool> {
    let file = File::open(csv_path)
        .with_context(|| format!("Failed to read CSV file: {}", csv_path.display()))?;

    let mut header = String::new();
    BufReader::new(file)
        .read_line(&mut header)
        .context("Failed to read CSV header")?;

    Ok(header.starts_with(',') || header.starts_with("\"\","))
}
