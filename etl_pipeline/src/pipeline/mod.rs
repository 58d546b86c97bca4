//! Pipeline driver and its configuration.
//!
//! A pipeline is one configured (source, transform, destination) triple. The
//! [`PipelineDriver`] runs pipelines either once each ([`RunMode::OneShot`])
//! or one pipeline repeatedly with versioned destinations ([`RunMode::Loop`]).
//! Every run is its own failure boundary: errors are logged and recorded in
//! the [`RunReport`], never propagated.
//!
//! # Example
//!
//! ```no_run
//! use etl_pipeline::pipeline::{PipelineConfig, PipelineDriver};
//!
//! let config = PipelineConfig::from_default_location_or_default().expect("Invalid pipeline.toml");
//! let report = PipelineDriver::new(config).run().expect("Invalid configuration");
//! println!("{} pipeline(s) failed", report.failed());
//! ```

pub mod config;
pub mod driver;


pub use config::{PipelineConfig, PipelineSpec, RunMode, ScheduleSettings};
pub use driver::{PipelineDriver, PipelineOutcome, RunReport, Sleeper, ThreadSleeper};
