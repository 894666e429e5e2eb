//! Unified error type for blackout trace generation
//!
//! Every failure in the generation pipeline is a configuration or input
//! problem detected up front. There is no retry path: errors propagate to
//! the caller as soon as they are found.
//!
//! # Example
//!
//! ```
//! use blackout_core::{BlackoutError, BlackoutResult};
//!
//! fn require_days(days: Option<u32>) -> BlackoutResult<u32> {
//!     days.ok_or(BlackoutError::MissingTimeSpecification)
//! }
//!
//! assert!(require_days(None).is_err());
//! ```

use thiserror::Error;

/// Error type for all blackout generation operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BlackoutError {
    /// A likelihood range reaches outside the 24-hour day or is empty
    #[error("hour range [{start}, {end}) must satisfy 0 <= start < end <= 24")]
    RangeOutOfBounds { start: i32, end: i32 },

    /// Two likelihood ranges claim the same hour
    #[error("hour {hour} is assigned by more than one likelihood range")]
    DuplicateHourAssignment { hour: u32 },

    /// Likelihood ranges leave part of the day uncovered
    #[error("hours {hours:?} are not covered by any likelihood range")]
    MissingHourCoverage { hours: Vec<u32> },

    /// Likelihood weight is negative, NaN or infinite
    #[error("weight {weight} for {context} must be finite and nonnegative")]
    InvalidWeight { context: String, weight: f64 },

    /// Neither a time index nor an evaluated day count was supplied
    #[error("either a time index or an evaluated day count is required")]
    MissingTimeSpecification,

    /// Both a time index and an evaluated day count were supplied
    #[error("a time index and an evaluated day count are mutually exclusive")]
    AmbiguousTimeSpecification,

    /// More distinct event starts requested than timestamps can supply
    #[error("cannot draw {requested} distinct event starts from {available} candidate timestamps")]
    InsufficientPopulation { requested: usize, available: usize },

    /// Statistical or time-axis parameter outside its domain
    #[error("invalid parameter `{name}`: {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    /// Failure reported by the random sampling backend
    #[error("sampling error: {0}")]
    Sampling(String),
}

impl BlackoutError {
    /// Shorthand for [`BlackoutError::InvalidParameter`]
    pub fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        BlackoutError::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }
}

/// Convenience type alias for Results using BlackoutError.
pub type BlackoutResult<T> = Result<T, BlackoutError>;
