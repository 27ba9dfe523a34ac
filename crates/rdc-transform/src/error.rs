//! Error types for batch cleaning.

use polars::prelude::PolarsError;
use rdc_model::ModelError;
use thiserror::Error;

/// Errors that abort cleaning of a whole batch.
///
/// Bad individual values never surface here; they become null cells or
/// dropped rows and are counted in the report.
#[derive(Debug, Error)]
pub enum TransformError {
    /// Table identifier outside the known set.
    #[error("unknown table '{0}'")]
    UnknownTable(String),

    /// Options rejected before any batch was touched.
    #[error("invalid cleaning options: {0}")]
    InvalidOptions(String),

    /// Failed DataFrame operation.
    #[error("DataFrame operation failed: {0}")]
    Polars(#[from] PolarsError),
}

impl From<ModelError> for TransformError {
    fn from(err: ModelError) -> Self {
        match err {
            ModelError::UnknownTable(name) => Self::UnknownTable(name),
            ModelError::InvalidOptions(message) => Self::InvalidOptions(message),
        }
    }
}

/// Result type for transform operations.
pub type Result<T> = std::result::Result<T, TransformError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_table_passes_through() {
        let err: TransformError = ModelError::UnknownTable("nope".into()).into();
        assert!(matches!(err, TransformError::UnknownTable(ref name) if name == "nope"));
        assert_eq!(err.to_string(), "unknown table 'nope'");
    }

    #[test]
    fn test_error_from_polars() {
        let polars_err = PolarsError::ColumnNotFound("weight".into());
        let err: TransformError = polars_err.into();
        assert!(matches!(err, TransformError::Polars(_)));
    }
}
