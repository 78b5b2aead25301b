//! # Error Types
//!
//! This module defines the error type shared by every part of the optimization
//! engine. There are two kinds of failure a caller has to deal with:
//!
//! - an invalid configuration, detected before the first iteration runs, and
//! - an objective evaluation that fails or produces a non-finite value.
//!
//! ## Examples
//!
//! Using the `Result` type:
//!
//! ```rust
//! use swarmopt::error::{OptimizationError, Result};
//!
//! fn check_size(size: usize) -> Result<usize> {
//!     if size == 0 {
//!         return Err(OptimizationError::InvalidConfiguration(
//!             "population_size must be positive".to_string(),
//!         ));
//!     }
//!     Ok(size)
//! }
//!
//! assert!(check_size(0).is_err());
//! ```
//!
//! Using the `OptionExt` trait to convert `Option` to `Result`:
//!
//! ```rust
//! use swarmopt::error::{OptimizationError, OptionExt};
//!
//! fn first_value(values: &[f64]) -> swarmopt::error::Result<f64> {
//!     values.first().copied().ok_or_else_opt(|| OptimizationError::EmptyPopulation)
//! }
//!
//! assert!(first_value(&[]).is_err());
//! ```

use thiserror::Error;

/// Represents errors that can occur while setting up or running an optimization.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum OptimizationError {
    /// The run was configured with invalid sizes, bounds, algorithm name or parameters.
    ///
    /// The message names the offending parameter, bound index or agent index.
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// The objective function failed or returned a non-finite value.
    #[error("Evaluation error at position {position:?}: {reason}")]
    Evaluation {
        /// The position that was being evaluated.
        position: Vec<f64>,
        /// Why the evaluation was rejected.
        reason: String,
    },

    /// An operation needed at least one agent but the population was empty.
    #[error("Empty population error: Cannot operate on an empty population")]
    EmptyPopulation,
}

impl OptimizationError {
    /// Shorthand for building an `InvalidConfiguration` error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::InvalidConfiguration(message.into())
    }

    /// Returns `true` for configuration errors.
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::InvalidConfiguration(_))
    }
}

/// A specialized Result type for optimization operations.
pub type Result<T> = std::result::Result<T, OptimizationError>;

/// Extension trait for Option to convert to Result with a custom error.
pub trait OptionExt<T> {
    /// Converts an `Option<T>` to a `Result<T>` using a closure to build the error.
    fn ok_or_else_opt<F>(self, err_fn: F) -> Result<T>
    where
        F: FnOnce() -> OptimizationError;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_else_opt<F>(self, err_fn: F) -> Result<T>
    where
        F: FnOnce() -> OptimizationError,
    {
        self.ok_or_else(err_fn)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configuration_message() {
        let err = OptimizationError::config("bound 1 has lower >= upper");
        assert!(err.is_configuration());
        assert_eq!(
            err.to_string(),
            "Invalid configuration: bound 1 has lower >= upper"
        );
    }

    #[test]
    fn test_evaluation_message_contains_position() {
        let err = OptimizationError::Evaluation {
            position: vec![1.0, 2.0],
            reason: "non-finite value NaN".to_string(),
        };
        assert!(!err.is_configuration());
        let message = err.to_string();
        assert!(message.contains("[1.0, 2.0]"));
        assert!(message.contains("NaN"));
    }

    #[test]
    fn test_option_ext() {
        let some: Option<i32> = Some(3);
        assert_eq!(some.ok_or_else_opt(|| OptimizationError::EmptyPopulation), Ok(3));

        let none: Option<i32> = None;
        assert_eq!(
            none.ok_or_else_opt(|| OptimizationError::EmptyPopulation),
            Err(OptimizationError::EmptyPopulation)
        );
    }
}
