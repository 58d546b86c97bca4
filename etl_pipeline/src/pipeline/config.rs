//! Pipeline configuration file support.
//!
//! Every path, column name and scheduling constant used by the driver lives in
//! [`PipelineConfig`]. The defaults reproduce the historical hardcoded values;
//! a `pipeline.toml` file can override any of them.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{EtlError, EtlResult};
use crate::io::SinkFormat;
use crate::parsing::SourceFormat;
use crate::transformations::{TransformKind, TransformSettings};

/// Top-level pipeline configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineConfig {
    #[serde(default = "default_log_file")]
    pub log_file: PathBuf,
    #[serde(default = "default_pipelines")]
    pub pipelines: Vec<PipelineSpec>,
    #[serde(default)]
    pub transforms: TransformSettings,
    #[serde(default)]
    pub schedule: ScheduleSettings,
}

/// One (source, transform, destination) triple run as a unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineSpec {
    pub name: String,
    pub source: PathBuf,
    /// Inferred from the source extension when absent
    #[serde(default)]
    pub source_format: Option<SourceFormat>,
    pub transform: TransformKind,
    pub destination: PathBuf,
    /// Inferred from the destination extension when absent
    #[serde(default)]
    pub destination_format: Option<SinkFormat>,
}

impl PipelineSpec {
    pub fn new(
        name: impl Into<String>,
        source: impl Into<PathBuf>,
        transform: TransformKind,
        destination: impl Into<PathBuf>,
    ) -> Self {
        Self {
            name: name.into(),
            source: source.into(),
            source_format: None,
            transform,
            destination: destination.into(),
            destination_format: None,
        }
    }

    pub fn resolved_source_format(&self) -> EtlResult<SourceFormat> {
        match self.source_format {
            Some(format) => Ok(format),
            None => SourceFormat::from_path(&self.source),
        }
    }

    pub fn resolved_destination_format(&self) -> EtlResult<SinkFormat> {
        match self.destination_format {
            Some(format) => Ok(format),
            None => SinkFormat::from_path(&self.destination),
        }
    }
}

/// How the driver schedules pipelines.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunMode {
    /// Every configured pipeline once, in order
    #[default]
    OneShot,
    /// One pipeline repeatedly with versioned destinations
    Loop,
}

/// Scheduling settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleSettings {
    #[serde(default)]
    pub mode: RunMode,
    /// Pause between loop iterations
    #[serde(default = "default_sleep_secs")]
    pub sleep_secs: u64,
    /// The loop stops once the version counter reaches this value
    #[serde(default = "default_version_limit")]
    pub version_limit: u32,
    /// Pipeline run in loop mode; the first configured pipeline when absent
    #[serde(default)]
    pub loop_pipeline: Option<String>,
    /// Pause after each successful pipeline but the last in one-shot mode
    #[serde(default = "default_pause_after_each_secs")]
    pub pause_after_each_secs: u64,
}

fn default_log_file() -> PathBuf {
    PathBuf::from("pipeline.log")
}

fn default_pipelines() -> Vec<PipelineSpec> {
    vec![
        PipelineSpec::new(
            "first",
            "data-sources/scores.parquet",
            TransformKind::Percentage,
            "data-sources/scores_cleaned.csv",
        ),
        PipelineSpec::new(
            "second",
            "data-sources/testing_scores.json",
            TransformKind::FlattenScores,
            "data-sources/testing_scores.csv",
        ),
    ]
}

fn default_sleep_secs() -> u64 {
    10
}

fn default_version_limit() -> u32 {
    5
}

fn default_pause_after_each_secs() -> u64 {
    10
}

impl Default for ScheduleSettings {
    fn default() -> Self {
        Self {
            mode: RunMode::default(),
            sleep_secs: default_sleep_secs(),
            version_limit: default_version_limit(),
            loop_pipeline: None,
            pause_after_each_secs: default_pause_after_each_secs(),
        }
    }
}

impl ScheduleSettings {
    pub fn sleep(&self) -> Duration {
        Duration::from_secs(self.sleep_secs)
    }

    pub fn pause_after_each(&self) -> Duration {
        Duration::from_secs(self.pause_after_each_secs)
    }
}

fn default_search_paths() -> [PathBuf; 3] {
    [
        PathBuf::from("pipeline.toml"),
        PathBuf::from("etl_pipeline/pipeline.toml"),
        PathBuf::from("../pipeline.toml"),
    ]
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            log_file: default_log_file(),
            pipelines: default_pipelines(),
            transforms: TransformSettings::default(),
            schedule: ScheduleSettings::default(),
        }
    }
}

impl PipelineConfig {
    /// Load pipeline configuration from a TOML file.
    ///
    /// # Arguments
    /// * `path` - Path to the configuration file
    ///
    /// # Returns
    /// * `Ok(PipelineConfig)` if the file was read and parsed
    /// * `Err(EtlError::Configuration)` otherwise
    pub fn from_file<P: AsRef<Path>>(path: P) -> EtlResult<Self> {
        let content = fs::read_to_string(path.as_ref()).map_err(|e| {
            EtlError::Configuration(format!(
                "Failed to read config file {}: {}",
                path.as_ref().display(),
                e
            ))
        })?;

        Self::from_toml_str(&content)
    }

    /// Parse pipeline configuration from TOML text.
    pub fn from_toml_str(content: &str) -> EtlResult<Self> {
        toml::from_str(content)
            .map_err(|e| EtlError::Configuration(format!("Failed to parse config file: {}", e)))
    }

    /// Load pipeline configuration from the default location.
    ///
    /// Searches for `pipeline.toml` in:
    /// 1. Current directory
    /// 2. `etl_pipeline/` directory
    /// 3. Parent directory
    pub fn from_default_location() -> EtlResult<Self> {
        Self::from_search_paths(&default_search_paths())?.ok_or_else(|| {
            EtlError::Configuration("No pipeline.toml found in standard locations".to_string())
        })
    }

    /// Like [`from_default_location`](Self::from_default_location), but falls
    /// back to the built-in defaults when no file exists. A file that exists
    /// and fails to load is still an error.
    pub fn from_default_location_or_default() -> EtlResult<Self> {
        Ok(Self::from_search_paths(&default_search_paths())?.unwrap_or_default())
    }

    /// Load the first existing file among `paths`, or `None` when none exists.
    pub fn from_search_paths(paths: &[PathBuf]) -> EtlResult<Option<Self>> {
        match paths.iter().find(|path| path.exists()) {
            Some(path) => Self::from_file(path).map(Some),
            None => Ok(None),
        }
    }

    /// Check the configuration before any pipeline runs.
    pub fn validate(&self) -> EtlResult<()> {
        if self.pipelines.is_empty() {
            return Err(EtlError::Configuration(
                "At least one pipeline must be configured".to_string(),
            ));
        }

        if self.schedule.version_limit == 0 {
            return Err(EtlError::Configuration(
                "schedule.version_limit must be at least 1".to_string(),
            ));
        }

        let mut seen = HashSet::new();
        for spec in &self.pipelines {
            if !seen.insert(spec.name.as_str()) {
                return Err(EtlError::Configuration(format!(
                    "Duplicate pipeline name: {}",
                    spec.name
                )));
            }
        }

        if self.schedule.mode == RunMode::Loop {
            self.loop_pipeline()?;
        }

        Ok(())
    }

    /// The pipeline run in loop mode.
    pub fn loop_pipeline(&self) -> EtlResult<&PipelineSpec> {
        match &self.schedule.loop_pipeline {
            Some(name) => self
                .pipelines
                .iter()
                .find(|spec| &spec.name == name)
                .ok_or_else(|| {
                    EtlError::Configuration(format!("Unknown loop pipeline: {}", name))
                }),
            None => self.pipelines.first().ok_or_else(|| {
                EtlError::Configuration("No pipeline configured for loop mode".to_string())
            }),
        }
    }
}
