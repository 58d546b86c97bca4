//! Column-level cleaning transforms.
//!
//! Two independent transforms are provided and the caller picks one per
//! pipeline through [`TransformKind`]:
//!
//! - [`cleaning`]: percentage strings to floats, zero-fill, fixed projection
//! - [`flattening`]: nested records to columns, index materialisation and
//!   mean-fill of score columns
//!
//! # Example
//!
//! ```no_run
//! use etl_pipeline::parsing::extract_from_json;
//! use etl_pipeline::transformations::{transform_df_json_based, FlattenSettings};
//! use std::path::Path;
//!
//! let raw = extract_from_json(Path::new("data-sources/testing_scores.json")).unwrap();
//! let clean = transform_df_json_based(&raw, &FlattenSettings::default()).unwrap();
//! assert_eq!(clean.height(), raw.height());
//! ```

pub mod cleaning;
pub mod flattening;

use serde::{Deserialize, Serialize};

use crate::core::Dataset;
use crate::error::EtlResult;

pub use cleaning::{parse_percentage, transform, PercentageSettings};
pub use flattening::{transform_df_json_based, FlattenSettings, ALL_NULL_SCORE_FILL};

/// Transform applied between extraction and loading
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransformKind {
    /// Percentage strings to floats, see [`transform`]
    Percentage,
    /// Nested score records to columns, see [`transform_df_json_based`]
    FlattenScores,
    /// Load the extracted data unchanged
    Passthrough,
}

/// Settings for every transform kind
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TransformSettings {
    #[serde(default)]
    pub percentage: PercentageSettings,
    #[serde(default)]
    pub flatten: FlattenSettings,
}

/// Apply the transform selected by `kind`.
pub fn apply(kind: TransformKind, dataset: &Dataset, settings: &TransformSettings) -> EtlResult<Dataset> {
    match kind {
        TransformKind::Percentage => transform(dataset, &settings.percentage),
        TransformKind::FlattenScores => transform_df_json_based(dataset, &settings.flatten),
        TransformKind::Passthrough => Ok(dataset.clone()),
    }
}
