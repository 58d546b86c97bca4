//! Batch ETL over tabular score files.
//!
//! Data flows through three stages:
//!
//! - [`parsing`]: extract CSV, Parquet or index-oriented JSON into a [`core::Dataset`]
//! - [`transformations`]: clean percentage columns or flatten nested score records
//! - [`io`]: load the result to CSV or Parquet
//!
//! The [`pipeline`] module sequences the stages for each configured pipeline,
//! one-shot or in a versioned loop, logging progress through the `log` facade.

pub mod core;
pub mod error;
pub mod io;
pub mod logging;
pub mod parsing;
pub mod pipeline;
pub mod transformations;

pub use error::{EtlError, EtlResult, Stage};
