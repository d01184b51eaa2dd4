//! High-level data loading utilities.
//!
//! This module provides convenient loaders that combine parsing logic with
//! domain model construction. These loaders handle format detection and error
//! context, and produce a ready-to-use [`Dataset`](crate::core::Dataset).
//!
//! # Example
//!
//! ```no_run
//! use flight_explorer::io::loaders::DatasetLoader;
//! use std::path::Path;
//!
//! let result = DatasetLoader::load_from_file(Path::new("flights.csv"))
//!     .expect("Failed to load");
//! println!("Loaded {} records", result.num_records);
//! ```

pub mod loaders;


pub use loaders::{DatasetLoadResult, DatasetLoader, DatasetSourceType};
