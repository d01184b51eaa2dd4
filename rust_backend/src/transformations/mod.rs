//! Query and filter engine over the flight dataset.
//!
//! This module derives working subsets of the immutable [`Dataset`] by airport
//! pair, flight code, or ticket class, and keeps the Economy/Business
//! partitions of the current subset up to date.
//!
//! # Example
//!
//! ```no_run
//! use flight_explorer::io::loaders::DatasetLoader;
//! use flight_explorer::transformations::QueryEngine;
//! use std::path::Path;
//!
//! let loaded = DatasetLoader::load_from_file(Path::new("flights.csv")).unwrap();
//! let mut engine = QueryEngine::new(loaded.dataset);
//! let subset = engine.filter_by_pair("Delhi", "Mumbai");
//! println!("{} flights", subset.len());
//! ```
//!
//! [`Dataset`]: crate::core::Dataset

pub mod filtering;

pub use filtering::{QueryEngine, RoutePair, WorkingSubset};
