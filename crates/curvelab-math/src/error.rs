//! Error types for the numeric kernel.

use thiserror::Error;

/// A specialized Result type for numeric operations.
pub type MathResult<T> = Result<T, MathError>;

/// Errors raised by the dual kernel, the dense solvers and the splines.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MathError {
    /// Inputs are structurally inconsistent (lengths, knot multiplicity, duplicate tags).
    #[error("Configuration error: {reason}")]
    Configuration {
        /// What was inconsistent.
        reason: String,
    },

    /// A function was evaluated outside its mathematical domain.
    #[error("Domain error in {operation}: argument {value} {reason}")]
    Domain {
        /// The function being evaluated.
        operation: &'static str,
        /// Real part of the offending argument.
        value: f64,
        /// Description of the violated condition.
        reason: &'static str,
    },

    /// A spline was evaluated outside its knot span.
    #[error("Point {x} is outside the domain [{min}, {max}]")]
    OutOfDomain {
        /// The query point.
        x: f64,
        /// Lower bound of the domain.
        min: f64,
        /// Upper bound of the domain.
        max: f64,
    },

    /// A linear system is singular or too ill-conditioned to solve.
    #[error("Singular system ({rows}x{cols}): {reason}")]
    SingularSystem {
        /// Rows of the system matrix.
        rows: usize,
        /// Columns of the system matrix.
        cols: usize,
        /// Pivot or condition diagnostic.
        reason: String,
    },
}

impl MathError {
    /// Creates a configuration error.
    #[must_use]
    pub fn configuration(reason: impl Into<String>) -> Self {
        Self::Configuration {
            reason: reason.into(),
        }
    }

    /// Creates a domain error.
    #[must_use]
    pub fn domain(operation: &'static str, value: f64, reason: &'static str) -> Self {
        Self::Domain {
            operation,
            value,
            reason,
        }
    }

    /// Creates an out-of-domain error.
    #[must_use]
    pub fn out_of_domain(x: f64, min: f64, max: f64) -> Self {
        Self::OutOfDomain { x, min, max }
    }

    /// Creates a singular system error.
    #[must_use]
    pub fn singular(rows: usize, cols: usize, reason: impl Into<String>) -> Self {
        Self::SingularSystem {
            rows,
            cols,
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = MathError::domain("ln", -1.0, "must be positive");
        assert_eq!(err.to_string(), "Domain error in ln: argument -1 must be positive");

        let err = MathError::out_of_domain(5.0, 0.0, 4.0);
        assert!(err.to_string().contains("[0, 4]"));

        let err = MathError::singular(3, 3, "zero pivot in column 2");
        assert!(err.to_string().starts_with("Singular system (3x3)"));
    }
}
