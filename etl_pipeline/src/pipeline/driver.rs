use log::{debug, error, info, warn};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::EtlResult;
use crate::io::{load, versioned_path};
use crate::parsing::extract;
use crate::pipeline::config::{PipelineConfig, PipelineSpec, RunMode};
use crate::transformations;

/// Pause between pipeline runs
pub trait Sleeper {
    fn sleep(&mut self, duration: Duration);
}

/// Blocks the current thread
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadSleeper;

impl Sleeper for ThreadSleeper {
    fn sleep(&mut self, duration: Duration) {
        if !duration.is_zero() {
            std::thread::sleep(duration);
        }
    }
}

/// Result of one pipeline run
#[derive(Debug)]
pub struct PipelineOutcome {
    pub name: String,
    /// Loop iteration, `None` in one-shot mode
    pub version: Option<u32>,
    pub destination: PathBuf,
    pub shape_before: Option<(usize, usize)>,
    pub shape_after: Option<(usize, usize)>,
    pub null_count_after: Option<usize>,
    pub result: EtlResult<()>,
}

impl PipelineOutcome {
    fn pending(name: &str, version: Option<u32>, destination: &Path) -> Self {
        Self {
            name: name.to_string(),
            version,
            destination: destination.to_path_buf(),
            shape_before: None,
            shape_after: None,
            null_count_after: None,
            result: Ok(()),
        }
    }

    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }
}

/// Outcomes of a driver run, in execution order
#[derive(Debug, Default)]
pub struct RunReport {
    pub outcomes: Vec<PipelineOutcome>,
}

impl RunReport {
    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_success()).count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.succeeded()
    }
}

/// Runs configured pipelines, each inside its own failure boundary
pub struct PipelineDriver<S: Sleeper = ThreadSleeper> {
    config: PipelineConfig,
    sleeper: S,
}

impl PipelineDriver<ThreadSleeper> {
    /// Create a driver that sleeps on the current thread
    pub fn new(config: PipelineConfig) -> Self {
        Self::with_sleeper(config, ThreadSleeper)
    }
}

impl<S: Sleeper> PipelineDriver<S> {
    /// Create a driver with a custom sleeper
    pub fn with_sleeper(config: PipelineConfig, sleeper: S) -> Self {
        Self { config, sleeper }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub fn sleeper(&self) -> &S {
        &self.sleeper
    }

    /// Validate the configuration and run it in the configured mode.
    ///
    /// Only configuration problems are returned as errors; pipeline failures
    /// are logged and recorded in the report.
    pub fn run(&mut self) -> EtlResult<RunReport> {
        self.config.validate()?;

        match self.config.schedule.mode {
            RunMode::OneShot => Ok(self.run_once()),
            RunMode::Loop => self.run_loop(),
        }
    }

    /// Run every configured pipeline once, in order.
    ///
    /// A failing pipeline does not prevent the next one from running.
    pub fn run_once(&mut self) -> RunReport {
        let mut report = RunReport::default();
        let pause = self.config.schedule.pause_after_each();
        let pipelines = self.config.pipelines.clone();

        for (position, spec) in pipelines.iter().enumerate() {
            let outcome = self.run_pipeline(spec, &spec.destination, None);
            let is_last = position + 1 == pipelines.len();
            if outcome.is_success() && !is_last {
                self.sleeper.sleep(pause);
            }
            report.outcomes.push(outcome);
        }

        info!(
            "One-shot run finished: {} succeeded, {} failed",
            report.succeeded(),
            report.failed()
        );
        report
    }

    /// Run the loop pipeline repeatedly, writing versioned destinations.
    ///
    /// Versions start at 1; the loop ends when the counter reaches
    /// `version_limit` or on the first failure.
    pub fn run_loop(&mut self) -> EtlResult<RunReport> {
        let spec = self.config.loop_pipeline()?.clone();
        let limit = self.config.schedule.version_limit;
        let pause = self.config.schedule.sleep();
        let mut report = RunReport::default();

        let mut version = 1;
        while version < limit {
            let destination = versioned_path(&spec.destination, version);
            let outcome = self.run_pipeline(&spec, &destination, Some(version));
            let failed = !outcome.is_success();
            report.outcomes.push(outcome);

            if failed {
                warn!(
                    "Stopping loop for pipeline '{}' after failure at version {}",
                    spec.name, version
                );
                break;
            }

            self.sleeper.sleep(pause);
            version += 1;
        }

        info!(
            "Loop run of pipeline '{}' finished after {} iteration(s)",
            spec.name,
            report.outcomes.len()
        );
        Ok(report)
    }

    /// Extract, transform and load one pipeline, logging the outcome.
    pub fn run_pipeline(
        &self,
        spec: &PipelineSpec,
        destination: &Path,
        version: Option<u32>,
    ) -> PipelineOutcome {
        let mut outcome = PipelineOutcome::pending(&spec.name, version, destination);

        let result = self.execute(spec, destination, &mut outcome);
        if let Err(e) = &result {
            error!(
                "{} arose in execution in pipeline '{}' ({} stage)",
                e,
                spec.name,
                e.stage()
            );
        }

        outcome.result = result;
        outcome
    }

    fn execute(
        &self,
        spec: &PipelineSpec,
        destination: &Path,
        outcome: &mut PipelineOutcome,
    ) -> EtlResult<()> {
        let source_format = spec.resolved_source_format()?;
        let sink_format = spec.resolved_destination_format()?;

        let extracted = extract(&spec.source, source_format)?;
        outcome.shape_before = Some(extracted.shape());

        let cleaned = transformations::apply(spec.transform, &extracted, &self.config.transforms)?;
        outcome.shape_after = Some(cleaned.shape());
        outcome.null_count_after = Some(cleaned.null_count());

        load(&cleaned, destination, sink_format)?;

        info!(
            "Pipeline '{}' ran successfully and data are loaded into {}",
            spec.name,
            destination.display()
        );
        debug!(
            "Shape of the dataset before transformation: {:?}",
            extracted.shape()
        );
        debug!(
            "Shape of the dataset after transformation: {:?}",
            cleaned.shape()
        );
        debug!(
            "Total null values after running pipeline '{}': {}",
            spec.name,
            cleaned.null_count()
        );

        Ok(())
    }
}
