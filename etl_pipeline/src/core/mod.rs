//! Core data structures shared by every pipeline stage.
//!
//! The [`dataset::Dataset`] type pairs a polars `DataFrame` with a row index so
//! that index-oriented sources (JSON keyed by row id) survive the trip from
//! extraction to loading.

pub mod dataset;

pub use dataset::Dataset;
