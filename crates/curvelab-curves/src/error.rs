//! Error types for curve construction, queries and transforms.

use curvelab_core::types::Date;
use curvelab_core::CoreError;
use curvelab_math::MathError;
use thiserror::Error;

/// A specialized Result type for curve operations.
pub type CurveResult<T> = Result<T, CurveError>;

/// Coarse classification of every error the engine can raise.
///
/// Callers branch on the kind to decide whether to fix inputs, narrow the
/// query range, or add nodes and regularisation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Invalid inputs or settings.
    Configuration,
    /// A function evaluated outside its mathematical domain.
    Domain,
    /// A query outside the curve or spline range.
    OutOfDomain,
    /// A linear system that cannot be solved.
    SingularSystem,
    /// Curves that cannot be combined.
    Consistency,
    /// An operation the curve does not support.
    UnsupportedOperation,
}

/// Error types for curve operations.
#[derive(Error, Debug, Clone)]
pub enum CurveError {
    /// Invalid nodes, knots or settings.
    #[error("Curve configuration error: {reason}")]
    Configuration {
        /// Description of the problem.
        reason: String,
    },

    /// Query date outside the node range without extrapolation.
    #[error("Date {date} outside curve range [{first}, {last}]")]
    OutOfDomain {
        /// Requested date.
        date: Date,
        /// First node date.
        first: Date,
        /// Last node date.
        last: Date,
    },

    /// Curves that cannot be composed.
    #[error("Inconsistent curves: {reason}")]
    Consistency {
        /// What differs between the curves.
        reason: String,
    },

    /// Operation not available for this curve.
    #[error("Unsupported operation '{operation}': {reason}")]
    UnsupportedOperation {
        /// Operation name.
        operation: &'static str,
        /// Why it is not available.
        reason: String,
    },

    /// Error from the numeric kernel.
    #[error(transparent)]
    Math(#[from] MathError),

    /// Error from dates, tenors or conventions.
    #[error(transparent)]
    Core(#[from] CoreError),
}

impl CurveError {
    /// Creates a configuration error.
    #[must_use]
    pub fn configuration(reason: impl Into<String>) -> Self {
        Self::Configuration {
            reason: reason.into(),
        }
    }

    /// Creates an out of domain error.
    #[must_use]
    pub fn out_of_domain(date: Date, first: Date, last: Date) -> Self {
        Self::OutOfDomain { date, first, last }
    }

    /// Creates a consistency error.
    #[must_use]
    pub fn consistency(reason: impl Into<String>) -> Self {
        Self::Consistency {
            reason: reason.into(),
        }
    }

    /// Creates an unsupported operation error.
    #[must_use]
    pub fn unsupported(operation: &'static str, reason: impl Into<String>) -> Self {
        Self::UnsupportedOperation {
            operation,
            reason: reason.into(),
        }
    }

    /// Classifies the error, looking through wrapped kernel errors.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Configuration { .. } | Self::Core(_) => ErrorKind::Configuration,
            Self::OutOfDomain { .. } => ErrorKind::OutOfDomain,
            Self::Consistency { .. } => ErrorKind::Consistency,
            Self::UnsupportedOperation { .. } => ErrorKind::UnsupportedOperation,
            Self::Math(e) => match e {
                MathError::Configuration { .. } => ErrorKind::Configuration,
                MathError::Domain { .. } => ErrorKind::Domain,
                MathError::OutOfDomain { .. } => ErrorKind::OutOfDomain,
                MathError::SingularSystem { .. } => ErrorKind::SingularSystem,
            },
        }
    }
}
