use thiserror::Error;

/// Every way a construction, training or inference call can be rejected.
///
/// All checks run before any weight is touched, so an `Err` never leaves an
/// engine half-trained.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum NnError {
    // Construction errors
    #[error("{name} must be at least 1")]
    ZeroDimension { name: &'static str },

    #[error("epoch count must be at least 1")]
    ZeroEpochs,

    #[error("learning rate must be finite and positive, got {0}")]
    InvalidLearningRate(f64),

    #[error("layer shape mismatch: expected {expected}, got {actual}")]
    LayerShapeMismatch { expected: String, actual: String },

    // Dimension errors
    #[error("input width mismatch: engine expects {expected} features, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    // Dataset errors
    #[error("dataset contains no samples")]
    EmptyDataset,

    #[error("row {row} has {actual} features, expected {expected}")]
    RaggedRow { row: usize, expected: usize, actual: usize },

    #[error("sample count mismatch: expected {expected}, got {actual}")]
    SampleCountMismatch { expected: usize, actual: usize },

    #[error("flat feature buffer has {actual} values, expected {expected}")]
    FlatBufferLength { expected: usize, actual: usize },

    #[error("label {value} in row {row} is not -1 or +1")]
    InvalidLabel { row: usize, value: f64 },

    #[error("feature at row {row}, column {column} is not finite")]
    NonFiniteFeature { row: usize, column: usize },
}

pub type Result<T> = std::result::Result<T, NnError>;

/// Shared guard used by both engines before the first epoch runs.
pub(crate) fn check_learning_rate(learning_rate: f64) -> Result<()> {
    if learning_rate.is_finite() && learning_rate > 0.0 {
        Ok(())
    } else {
        Err(NnError::InvalidLearningRate(learning_rate))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn learning_rate_guard() {
        assert!(check_learning_rate(0.1).is_ok());
        assert_eq!(check_learning_rate(0.0), Err(NnError::InvalidLearningRate(0.0)));
        assert!(check_learning_rate(-0.5).is_err());
        assert!(check_learning_rate(f64::NAN).is_err());
        assert!(check_learning_rate(f64::INFINITY).is_err());
    }

    #[test]
    fn messages_name_the_offending_values() {
        let err = NnError::DimensionMismatch { expected: 2, actual: 3 };
        assert_eq!(
            err.to_string(),
            "input width mismatch: engine expects 2 features, got 3"
        );
        let err = NnError::InvalidLabel { row: 4, value: 0.5 };
        assert_eq!(err.to_string(), "label 0.5 in row 4 is not -1 or +1");
    }
}
