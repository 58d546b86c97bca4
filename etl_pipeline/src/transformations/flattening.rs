use polars::prelude::*;
use serde::{Deserialize, Serialize};

use crate::core::Dataset;
use crate::error::{EtlError, EtlResult};

/// Fill value for a score column with no values to average.
pub const ALL_NULL_SCORE_FILL: f64 = 0.0;

/// Columns used by the record-flattening transform
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlattenSettings {
    #[serde(default = "default_nested_column")]
    pub nested_column: String,
    #[serde(default = "default_index_name")]
    pub index_name: String,
    #[serde(default = "default_score_columns")]
    pub score_columns: Vec<String>,
}

fn default_nested_column() -> String {
    "scores".to_string()
}

fn default_index_name() -> String {
    "scores_id".to_string()
}

fn default_score_columns() -> Vec<String> {
    vec![
        "math".to_string(),
        "reading".to_string(),
        "writing".to_string(),
    ]
}

impl Default for FlattenSettings {
    fn default() -> Self {
        Self {
            nested_column: default_nested_column(),
            index_name: default_index_name(),
            score_columns: default_score_columns(),
        }
    }
}

/// Expand the nested record column into one column per field, move the index
/// into a leading id column and mean-fill the score columns.
///
/// Row count is preserved: each input row yields exactly one output row.
pub fn transform_df_json_based(dataset: &Dataset, settings: &FlattenSettings) -> EtlResult<Dataset> {
    let mut flattened = dataset.clone();
    let nested = &settings.nested_column;

    let fields = expand_nested_column(&flattened, nested)?;

    flattened
        .drop_column(nested)
        .map_err(|e| EtlError::Transformation(format!("Failed to drop '{}': {}", nested, e)))?;
    flattened.hstack(&fields).map_err(|e| {
        EtlError::Transformation(format!("Failed to append fields of '{}': {}", nested, e))
    })?;

    flattened.rename_index(&settings.index_name);
    flattened
        .reset_index()
        .map_err(|e| EtlError::Transformation(format!("Failed to materialise index: {}", e)))?;

    for score in &settings.score_columns {
        let fill = rounded_mean(&flattened, score)?;
        flattened.fill_column_nulls(score, fill).map_err(|e| {
            EtlError::Transformation(format!("Failed to fill score column '{}': {}", score, e))
        })?;
    }

    Ok(flattened)
}

/// One column per field of the struct column `name`, in field order.
fn expand_nested_column(dataset: &Dataset, name: &str) -> EtlResult<Vec<Column>> {
    let column = dataset
        .column(name)
        .map_err(|_| EtlError::Transformation(format!("Missing nested column '{}'", name)))?;

    let records = column.as_materialized_series().struct_().map_err(|_| {
        EtlError::Transformation(format!(
            "Column '{}' does not hold nested records (found {})",
            name,
            column.dtype()
        ))
    })?;

    Ok(records
        .fields_as_series()
        .into_iter()
        .map(Column::from)
        .collect())
}

/// Mean of the present values rounded half-to-even, or the all-null fallback.
///
/// Only numeric (or untyped all-null) columns are averaged; text scores are an
/// error rather than absent values.
fn rounded_mean(dataset: &Dataset, name: &str) -> EtlResult<f64> {
    let column = dataset
        .column(name)
        .map_err(|_| EtlError::Transformation(format!("Missing score column '{}'", name)))?;
    let dtype = column.dtype();
    if !dtype.is_primitive_numeric() && dtype != &DataType::Null {
        return Err(EtlError::Transformation(format!(
            "Score column '{}' is not numeric (found {})",
            name, dtype
        )));
    }

    let mean = dataset.column_mean(name).map_err(|e| {
        EtlError::Transformation(format!("Cannot average score column '{}': {}", name, e))
    })?;

    Ok(mean.map(f64::round_ties_even).unwrap_or(ALL_NULL_SCORE_FILL))
}
