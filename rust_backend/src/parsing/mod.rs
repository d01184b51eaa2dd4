//! Parsers for flight dataset files.
//!
//! # Parsers
//!
//! - [`csv_parser`]: Parse delimited flight tables into DataFrames and [`Record`]s
//!
//! # Example
//!
//! ```no_run
//! use flight_explorer::parsing::csv_parser::parse_flights_csv_to_records;
//! use std::path::Path;
//!
//! let records = parse_flights_csv_to_records(Path::new("flights.csv"), b',')
//!     .expect("Failed to parse flights");
//! ```
//!
//! [`Record`]: crate::core::domain::Record

pub mod csv_parser;

#[cfg(test)]
mod csv_parser_tests;
