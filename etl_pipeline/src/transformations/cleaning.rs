use polars::prelude::*;
use serde::{Deserialize, Serialize};

use crate::core::Dataset;
use crate::error::{EtlError, EtlResult};

/// Columns used by the percentage transform
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PercentageSettings {
    #[serde(default = "default_name_column")]
    pub name_column: String,
    #[serde(default = "default_enrollment_column")]
    pub enrollment_column: String,
    #[serde(default = "default_percentage_columns")]
    pub columns: Vec<String>,
}

fn default_name_column() -> String {
    "School Name".to_string()
}

fn default_enrollment_column() -> String {
    "Student Enrollment".to_string()
}

fn default_percentage_columns() -> Vec<String> {
    vec![
        "Percent Black".to_string(),
        "Percent Hispanic".to_string(),
        "Percent Asian".to_string(),
        "Percent Tested".to_string(),
    ]
}

impl Default for PercentageSettings {
    fn default() -> Self {
        Self {
            name_column: default_name_column(),
            enrollment_column: default_enrollment_column(),
            columns: default_percentage_columns(),
        }
    }
}

impl PercentageSettings {
    /// Output column order: name, enrollment, then the percentage columns.
    pub fn projection(&self) -> Vec<&str> {
        let mut names = vec![self.name_column.as_str(), self.enrollment_column.as_str()];
        names.extend(self.columns.iter().map(String::as_str));
        names
    }
}

/// Parse a percentage string such as `"12.5%"` into `12.5`.
///
/// `%` signs are stripped from both ends first, then surrounding whitespace.
/// A `%` shielded by outer whitespace (`" 7 % "`) is not stripped, so the
/// value does not parse. Anything left that is not a float yields `None`.
pub fn parse_percentage(raw: &str) -> Option<f64> {
    raw.trim_matches('%').trim().parse::<f64>().ok()
}

/// Convert percentage columns to floats, zero-fill absent values and project
/// to the fixed output columns.
///
/// Fails when a percentage column is missing, is not textual, or holds a value
/// that does not parse once the `%` is stripped. Unparsable values are never
/// treated as absent.
pub fn transform(dataset: &Dataset, settings: &PercentageSettings) -> EtlResult<Dataset> {
    let mut cleaned = dataset.clone();

    for name in &settings.columns {
        let converted = convert_percentage_column(&cleaned, name)?;
        cleaned
            .set_column(converted)
            .map_err(|e| EtlError::Transformation(format!("Failed to replace '{}': {}", name, e)))?;
    }

    cleaned.fill_nulls_with_zero().map_err(|e| {
        EtlError::Transformation(format!("Failed to fill absent values: {}", e))
    })?;

    cleaned
        .select(&settings.projection())
        .map_err(|e| EtlError::Transformation(format!("Failed to project output columns: {}", e)))
}

fn convert_percentage_column(dataset: &Dataset, name: &str) -> EtlResult<Column> {
    let column = dataset
        .column(name)
        .map_err(|_| EtlError::Transformation(format!("Missing percentage column '{}'", name)))?;

    // An all-null column may come back untyped from Parquet
    if column.dtype() == &DataType::Null {
        let values: Vec<Option<f64>> = vec![None; column.len()];
        return Ok(Column::new(name.into(), values));
    }

    let text = column.str().map_err(|_| {
        EtlError::Transformation(format!(
            "Column '{}' is not textual (found {})",
            name,
            column.dtype()
        ))
    })?;

    let values = text
        .into_iter()
        .enumerate()
        .map(|(row, value)| match value {
            None => Ok(None),
            // NaN counts as absent so the zero-fill covers it
            Some(raw) => parse_percentage(raw)
                .map(|v| if v.is_nan() { None } else { Some(v) })
                .ok_or_else(|| {
                    EtlError::Transformation(format!(
                        "Invalid percentage '{}' in column '{}' at row {}",
                        raw, name, row
                    ))
                }),
        })
        .collect::<EtlResult<Vec<Option<f64>>>>()?;

    Ok(Column::new(name.into(), values))
}
