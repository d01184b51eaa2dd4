//! Statistics and text reports over flight subsets.
//!
//! # Components
//!
//! - [`statistics`]: Descriptive statistics, grouping and Pearson correlation
//! - [`analysis`]: Per-mode statistics blocks and the flight price report
//! - [`summary`]: Narrative pages of the data summary view
//!
//! # Example
//!
//! ```
//! use flight_explorer::algorithms::compute_stats;
//!
//! let stats = compute_stats(&[5000.0, 9000.0]).unwrap();
//! assert_eq!(format!("{:.2}", stats.mean), "7000.00");
//! ```

pub mod analysis;
pub mod statistics;
pub mod summary;

pub use analysis::{
    comparative_percentage, correlation_description, price_analysis, CorrelationStrength,
    PriceComparison, PriceDirection, FLIGHT_NOT_FOUND, NO_STATISTICS,
};
pub use statistics::{compute_stats, describe_by_group, pearson_correlation, SummaryStats};
pub use summary::{summary_text, SUMMARY_PAGE_COUNT};
