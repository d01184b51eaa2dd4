//! Core domain models for flight price exploration.
//!
//! This module defines the fundamental data structures used throughout the explorer,
//! representing flight records, their attributes, and the immutable dataset.

pub mod dataset;
pub mod domain;

pub use dataset::Dataset;
pub use domain::{Attribute, FieldValue, Record, TicketClass};
