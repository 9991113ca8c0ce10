use thiserror::Error;

/// Error types for the model crate
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ModelError {
    /// The record source is missing, unreadable, malformed or lacks required columns.
    /// The dashboard cannot render without data, so callers treat this as fatal.
    #[error("Data unavailable from '{source_name}': {reason}")]
    DataUnavailable { source_name: String, reason: String },
}

impl ModelError {
    pub fn unavailable(source_name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::DataUnavailable {
            source_name: source_name.into(),
            reason: reason.into(),
        }
    }
}

/// Type alias for Result with ModelError
pub type Result<T> = std::result::Result<T, ModelError>;
