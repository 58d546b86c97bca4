use anyhow::{Context, Result};
use polars::prelude::*;
use serde_json::{Map, Value};
use std::io::Cursor;
use std::path::Path;

use crate::core::Dataset;
use crate::error::{EtlError, EtlResult};

/// Read an index-oriented JSON file into a [`Dataset`].
///
/// The file must hold a single object whose keys are row identifiers and whose
/// values are objects of field → value. Keys become the row index.
pub fn extract_from_json(json_path: &Path) -> EtlResult<Dataset> {
    std::fs::read_to_string(json_path)
        .with_context(|| format!("Failed to read JSON file: {}", json_path.display()))
        .and_then(|content| parse_records_json_str(&content))
        .map_err(|e| EtlError::Extraction(format!("{:#}", e)))
}

/// Parse index-oriented JSON from a string
pub fn extract_from_json_str(json_str: &str) -> EtlResult<Dataset> {
    parse_records_json_str(json_str).map_err(|e| EtlError::Extraction(format!("{:#}", e)))
}

fn parse_records_json_str(json_str: &str) -> Result<Dataset> {
    let json_value: Value = serde_json::from_str(json_str).with_context(|| {
        let preview: String = json_str.chars().take(200).collect();
        format!("Invalid JSON syntax. First 200 chars: {}", preview)
    })?;

    let rows = match json_value {
        Value::Object(rows) => rows,
        Value::Array(_) => anyhow::bail!(
            "Expected a JSON object keyed by row id, found an array of records"
        ),
        other => anyhow::bail!(
            "Expected a JSON object keyed by row id, found {}",
            json_type_name(&other)
        ),
    };

    let column_names = collect_column_names(&rows)?;
    let labels = index_labels(rows.keys());

    // No fields at all (no rows, or only empty rows): zero columns, one row per key
    if column_names.is_empty() {
        return Dataset::with_labels(DataFrame::empty_with_height(labels.len()), labels)
            .context("Failed to build dataset without columns");
    }

    let records: Vec<Value> = rows.into_iter().map(|(_, record)| record).collect();
    let frame = records_to_dataframe(&records)?;
    let frame = frame
        .select(column_names.iter().map(String::as_str))
        .context("Failed to order JSON columns")?;

    Dataset::with_labels(frame, labels).context("Failed to attach JSON row index")
}

/// Union of record fields in first-seen order; rejects non-object rows.
fn collect_column_names(rows: &Map<String, Value>) -> Result<Vec<String>> {
    let mut names: Vec<String> = Vec::new();

    for (key, record) in rows {
        let fields = record.as_object().with_context(|| {
            format!(
                "Row '{}' must be an object of fields, found {}",
                key,
                json_type_name(record)
            )
        })?;

        for field in fields.keys() {
            if !names.iter().any(|name| name == field) {
                names.push(field.clone());
            }
        }
    }

    Ok(names)
}

/// Row labels from the object keys: integers when every key is one, text otherwise.
fn index_labels<'a>(keys: impl Iterator<Item = &'a String>) -> Column {
    let keys: Vec<&str> = keys.map(String::as_str).collect();
    let numeric: Option<Vec<i64>> = keys.iter().map(|key| key.parse::<i64>().ok()).collect();

    match numeric {
        Some(values) => Column::new(PlSmallStr::EMPTY, values),
        None => Column::new(PlSmallStr::EMPTY, keys),
    }
}

/// Let polars infer column types (including nested structs) from the records.
fn records_to_dataframe(records: &[Value]) -> Result<DataFrame> {
    let bytes = serde_json::to_vec(records).context("Failed to re-encode JSON records")?;

    JsonReader::new(Cursor::new(bytes))
        .with_json_format(JsonFormat::Json)
        .infer_schema_len(None)
        .finish()
        .context("Failed to convert JSON records to DataFrame")
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
