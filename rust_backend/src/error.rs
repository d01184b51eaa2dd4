//! Error types for explorer operations.

use polars::prelude::PolarsError;

/// Result type for explorer operations
pub type ExplorerResult<T> = Result<T, ExplorerError>;

/// Error type for explorer operations
#[derive(Debug, thiserror::Error)]
pub enum ExplorerError {
    /// A user-chosen value is not among the offered candidates.
    #[error("Invalid selection for {field}: {value}")]
    InvalidSelection { field: String, value: String },

    #[error("Invalid attribute: {0}")]
    InvalidAttribute(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Schema error: {0}")]
    SchemaError(String),

    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    #[error("Render error: {0}")]
    RenderError(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("DataFrame error: {0}")]
    DataFrame(#[from] PolarsError),
}

impl ExplorerError {
    pub fn invalid_selection(field: impl Into<String>, value: impl Into<String>) -> Self {
        ExplorerError::InvalidSelection {
            field: field.into(),
            value: value.into(),
        }
    }

    /// Whether the error is recoverable at the point of a user event.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            ExplorerError::InvalidSelection { .. }
                | ExplorerError::InvalidAttribute(_)
                | ExplorerError::NotFound(_)
                | ExplorerError::RenderError(_)
        )
    }
}
