//! # API Module
//!
//! The boundary between the explorer and its display surface.
//!
//! - [`types`]: display modes, chart specifications and the analysis context
//!   passed to subscribers

pub mod types;

pub use types::*;
