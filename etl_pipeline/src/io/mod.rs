//! Loaders that write datasets to their destination.
//!
//! Destinations are always overwritten. A failed write may leave a partial
//! file behind; nothing is cleaned up.
//!
//! # Example
//!
//! ```no_run
//! use etl_pipeline::io::{load, versioned_path, SinkFormat};
//! use etl_pipeline::parsing::extract_from_csv;
//! use std::path::Path;
//!
//! let dataset = extract_from_csv(Path::new("data-sources/scores.csv")).unwrap();
//! let destination = versioned_path(Path::new("data-sources/scores.parquet"), 1);
//! load(&dataset, &destination, SinkFormat::Parquet).expect("Failed to load");
//! ```

pub mod loaders;


pub use loaders::{load, load_to_csv, load_to_parquet, versioned_path, SinkFormat};
