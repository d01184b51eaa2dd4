//! Controllers translating selection events into explorer calls.
//!
//! - [`modes`]: planner modes and their input fields
//! - [`planner`]: the mode dispatcher of the planner page
//! - [`search`]: the From/To/Flight flow of the flight search page

pub mod modes;
pub mod planner;
pub mod search;

pub use modes::{InputConfig, InputField, PlannerMode};
pub use planner::ModeDispatcher;
pub use search::SearchController;
