//! Tabular dataset with a row index.
//!
//! Polars frames have no notion of a row index, while the sources this crate
//! reads do: JSON files keyed by row id and CSV output that carries the index
//! as its first, unlabeled column. A [`Dataset`] keeps the index next to the
//! frame until a transform materialises it as an ordinary column.

use polars::prelude::*;

/// Name given to a materialised index that was never renamed.
pub const DEFAULT_INDEX_NAME: &str = "index";

/// An ordered set of named columns aligned by row, plus a row index.
///
/// The index is either positional (rows are labelled `0..n`) or an explicit
/// column of labels with one entry per row.
///
/// # Examples
///
/// ```
/// use etl_pipeline::core::Dataset;
/// use polars::prelude::*;
///
/// let frame = df!("name" => ["A", "B"], "math" => [Some(80.0), None]).unwrap();
/// let dataset = Dataset::from_frame(frame);
///
/// assert_eq!(dataset.shape(), (2, 2));
/// assert_eq!(dataset.null_count(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct Dataset {
    frame: DataFrame,
    labels: Option<Column>,
    index_name: Option<String>,
}

impl Dataset {
    /// Wrap a frame with a positional index.
    pub fn from_frame(frame: DataFrame) -> Self {
        Self {
            frame,
            labels: None,
            index_name: None,
        }
    }

    /// Wrap a frame with explicit row labels.
    ///
    /// Fails when the number of labels differs from the number of rows.
    pub fn with_labels(frame: DataFrame, labels: Column) -> PolarsResult<Self> {
        if labels.len() != frame.height() {
            return Err(PolarsError::ShapeMismatch(
                format!(
                    "index has {} labels but the frame has {} rows",
                    labels.len(),
                    frame.height()
                )
                .into(),
            ));
        }

        let index_name = Some(labels.name().to_string()).filter(|name| !name.is_empty());
        Ok(Self {
            frame,
            labels: Some(labels),
            index_name,
        })
    }

    pub fn frame(&self) -> &DataFrame {
        &self.frame
    }

    pub fn into_frame(self) -> DataFrame {
        self.frame
    }

    pub fn height(&self) -> usize {
        self.frame.height()
    }

    pub fn width(&self) -> usize {
        self.frame.width()
    }

    /// `(rows, columns)`; the index is not counted as a column.
    pub fn shape(&self) -> (usize, usize) {
        self.frame.shape()
    }

    /// True when rows are labelled by position only.
    pub fn has_positional_index(&self) -> bool {
        self.labels.is_none()
    }

    pub fn index_name(&self) -> Option<&str> {
        self.index_name.as_deref()
    }

    pub fn column_names(&self) -> Vec<String> {
        self.frame
            .get_column_names()
            .iter()
            .map(|name| name.to_string())
            .collect()
    }

    pub fn column(&self, name: &str) -> PolarsResult<&Column> {
        self.frame.column(name)
    }

    /// Total number of absent values across all columns.
    pub fn null_count(&self) -> usize {
        self.frame
            .get_columns()
            .iter()
            .map(|column| column.null_count())
            .sum()
    }

    /// The index as a column, named after the index (or empty when unnamed).
    ///
    /// Positional indices are materialised as `Int64` values `0..n`.
    pub fn index_values(&self) -> Column {
        let name: PlSmallStr = self.index_name.as_deref().unwrap_or("").into();
        match &self.labels {
            Some(labels) => labels.clone().with_name(name),
            None => {
                let positions: Vec<i64> = (0..self.frame.height() as i64).collect();
                Column::new(name, positions)
            }
        }
    }

    /// Keep only the named columns, in the given order.
    pub fn select(&self, names: &[&str]) -> PolarsResult<Self> {
        let frame = self.frame.select(names.iter().copied())?;
        Ok(Self {
            frame,
            labels: self.labels.clone(),
            index_name: self.index_name.clone(),
        })
    }

    pub fn drop_column(&mut self, name: &str) -> PolarsResult<()> {
        self.frame = self.frame.drop(name)?;
        Ok(())
    }

    /// Append columns positionally. Row counts must match; there is no join key.
    pub fn hstack(&mut self, columns: &[Column]) -> PolarsResult<()> {
        self.frame = self.frame.hstack(columns)?;
        Ok(())
    }

    /// Replace a column of the same name, or append it when absent.
    pub fn set_column(&mut self, column: Column) -> PolarsResult<()> {
        self.frame.with_column(column)?;
        Ok(())
    }

    /// Mean of a column, ignoring absent values.
    ///
    /// Returns `None` when the column holds no values at all. Fails when a
    /// present value cannot be read as a float.
    pub fn column_mean(&self, name: &str) -> PolarsResult<Option<f64>> {
        let values = self.frame.column(name)?.strict_cast(&DataType::Float64)?;
        Ok(values.f64()?.mean())
    }

    /// Cast a column to `Float64` and replace its absent values with `value`.
    pub fn fill_column_nulls(&mut self, name: &str, value: f64) -> PolarsResult<()> {
        let column = self.frame.column(name)?.strict_cast(&DataType::Float64)?;
        let filled: Vec<f64> = column
            .f64()?
            .into_iter()
            .map(|v| v.unwrap_or(value))
            .collect();
        self.frame
            .with_column(Column::new(name.into(), filled))?;
        Ok(())
    }

    /// Replace every absent value in the dataset with zero.
    ///
    /// Numeric columns get `0`, text columns `"0"` and boolean columns
    /// `false`. Columns of other types (nested, temporal) are left as is.
    pub fn fill_nulls_with_zero(&mut self) -> PolarsResult<()> {
        let mut filled = Vec::with_capacity(self.frame.width());

        for column in self.frame.get_columns() {
            if column.null_count() == 0 {
                filled.push(column.clone());
                continue;
            }

            let dtype = column.dtype();
            let column = if dtype.is_primitive_numeric() {
                column
                    .as_materialized_series()
                    .fill_null(FillNullStrategy::Zero)?
                    .into_column()
            } else if dtype == &DataType::String {
                let values: Vec<&str> = column
                    .str()?
                    .into_iter()
                    .map(|v| v.unwrap_or("0"))
                    .collect();
                Column::new(column.name().clone(), values)
            } else if dtype == &DataType::Boolean {
                let values: Vec<bool> = column
                    .bool()?
                    .into_iter()
                    .map(|v| v.unwrap_or(false))
                    .collect();
                Column::new(column.name().clone(), values)
            } else {
                column.clone()
            };
            filled.push(column);
        }

        self.frame = DataFrame::new(filled)?;
        Ok(())
    }

    /// Name the row index; the name is used when the index is materialised.
    pub fn rename_index(&mut self, name: &str) {
        self.index_name = Some(name.to_string());
    }

    /// Move the index into the frame as its leading column and switch to a
    /// positional index.
    pub fn reset_index(&mut self) -> PolarsResult<()> {
        let name = self
            .index_name
            .take()
            .unwrap_or_else(|| DEFAULT_INDEX_NAME.to_string());
        let index = self.index_values().with_name(name.as_str().into());

        self.frame.insert_column(0, index)?;
        self.labels = None;
        Ok(())
    }
}
