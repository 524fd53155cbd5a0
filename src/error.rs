//! Error types for gridsdr.
//!
//! Every failure in this crate is fail-fast and synchronous: a caller either
//! passed a bad configuration, a pattern of the wrong width, or asked for a
//! score that is undefined for its input.

use thiserror::Error;

/// The main error type for gridsdr operations.
#[derive(Error, Debug)]
pub enum SdrError {
    /// Encoder range is inverted
    #[error("Invalid range: min {min} is greater than max {max}")]
    InvalidRange {
        /// Lower bound supplied
        min: f64,
        /// Upper bound supplied
        max: f64,
    },

    /// Category id outside `0..num_categories`
    #[error("Invalid category: {category} is not in 0..{num_categories}")]
    InvalidCategory {
        /// The rejected category id
        category: usize,
        /// Number of valid categories
        num_categories: usize,
    },

    /// Pattern width does not match the declared width
    #[error("Shape mismatch: expected {expected} bits, got {actual}")]
    ShapeMismatch {
        /// Expected width
        expected: usize,
        /// Width received
        actual: usize,
    },

    /// A score was requested for an input where it is undefined
    #[error("Degenerate input: {0}")]
    DegenerateInput(String),

    /// Invalid parameter value
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Configuration (de)serialization failed
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// A specialized `Result` type for gridsdr operations.
pub type Result<T> = std::result::Result<T, SdrError>;

/// Fail with `ShapeMismatch` unless `actual == expected`.
#[inline]
pub(crate) fn check_width(expected: usize, actual: usize) -> Result<()> {
    if expected == actual {
        Ok(())
    } else {
        Err(SdrError::ShapeMismatch { expected, actual })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = SdrError::ShapeMismatch {
            expected: 512,
            actual: 256,
        };
        assert_eq!(err.to_string(), "Shape mismatch: expected 512 bits, got 256");

        let err = SdrError::InvalidCategory {
            category: 4,
            num_categories: 4,
        };
        assert_eq!(err.to_string(), "Invalid category: 4 is not in 0..4");

        let err = SdrError::InvalidRange { min: 2.0, max: 1.0 };
        assert_eq!(err.to_string(), "Invalid range: min 2 is greater than max 1");
    }

    #[test]
    fn test_check_width() {
        assert!(check_width(16, 16).is_ok());
        assert!(matches!(
            check_width(16, 15),
            Err(SdrError::ShapeMismatch {
                expected: 16,
                actual: 15
            })
        ));
    }

    #[test]
    fn test_from_serde_error() {
        let parse: std::result::Result<u32, _> = serde_json::from_str("not json");
        let err: SdrError = parse.unwrap_err().into();
        assert!(matches!(err, SdrError::Serialization(_)));
    }
}
