//! Flight Explorer - exploration of a flight-pricing table
//!
//! The dataset is loaded once from a delimited file. Selection events derive
//! working subsets, analysis functions turn them into text reports, and
//! display subscribers receive chart specifications for their page.
//!
//! # Layout
//!
//! - [`core`]: records, attributes and the immutable dataset
//! - [`parsing`] / [`io`]: reading the flight table through polars
//! - [`transformations`]: the query engine and working subsets
//! - [`algorithms`]: statistics, per-mode reports and the summary pages
//! - [`api`]: display modes, chart specifications, analysis context
//! - [`services`]: the explorer state and its subscribers
//! - [`controller`]: flight search flow and planner mode dispatch
//! - [`app`]: the terminal session

pub mod algorithms;
pub mod api;
pub mod app;
pub mod config;
pub mod controller;
pub mod core;
pub mod error;
pub mod io;
pub mod parsing;
pub mod services;
pub mod transformations;

#[cfg(test)]
pub(crate) mod fixtures;

pub use error::{ExplorerError, ExplorerResult};
