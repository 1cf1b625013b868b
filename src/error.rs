//! # Error Types
//!
//! This module defines the error type shared by every part of the engine.
//! Each failure the generation loop can surface to its caller has its own
//! variant, so callers can match on the condition instead of parsing text.
//!
//! ## Examples
//!
//! Using the `Result` type:
//!
//! ```rust
//! use bitga::error::{GeneticError, Result};
//!
//! fn check_rate(rate: f64) -> Result<f64> {
//!     if !(0.0..=1.0).contains(&rate) {
//!         return Err(GeneticError::Configuration(format!(
//!             "rate {} is outside [0, 1]",
//!             rate
//!         )));
//!     }
//!     Ok(rate)
//! }
//!
//! assert!(check_rate(0.5).is_ok());
//! assert!(check_rate(1.5).is_err());
//! ```
//!
//! Using the `ResultExt` trait to wrap a foreign error, for instance inside an
//! oracle that parses an external score:
//!
//! ```rust
//! use bitga::error::{Result, ResultExt};
//!
//! fn parse_score(raw: &str) -> Result<i64> {
//!     raw.trim().parse::<i64>().context("oracle returned a malformed score")
//! }
//!
//! assert_eq!(parse_score(" 42 ").unwrap(), 42);
//! assert!(parse_score("n/a").is_err());
//! ```
//!
//! Using the `OptionExt` trait to convert `Option` to `Result`:
//!
//! ```rust
//! use bitga::error::{GeneticError, OptionExt};
//!
//! fn best_score(scores: &[i64]) -> bitga::error::Result<i64> {
//!     scores.iter().max().cloned().ok_or_else_genetic(||
//!         GeneticError::EmptyPopulation
//!     )
//! }
//!
//! assert_eq!(best_score(&[3, 9, 4]).unwrap(), 9);
//! assert!(best_score(&[]).is_err());
//! ```

use std::error::Error as StdError;
use std::fmt;

use thiserror::Error;

/// Represents errors that can occur while configuring or running the engine.
#[derive(Error, Debug)]
pub enum GeneticError {
    /// An invalid run configuration. Raised before any population is built.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The total selection weight of a generation is zero or negative, so
    /// fitness-proportionate selection has no distribution to sample from.
    #[error("Degenerate selection: total selection weight is {total}")]
    DegenerateSelection {
        /// The offending weight total.
        total: i64,
    },

    /// The fitness oracle failed while scoring an individual.
    #[error("Fitness oracle failed in generation {generation} at index {index}: {source}")]
    OracleFailure {
        /// Generation being evaluated when the oracle failed.
        generation: usize,
        /// Population index of the individual being scored.
        index: usize,
        /// The oracle's own error.
        #[source]
        source: Box<GeneticError>,
    },

    /// Two bit vectors that must have equal length do not.
    #[error("Length mismatch: expected {expected} bits, found {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    /// An operation needed at least one individual.
    #[error("Empty population error: Cannot operate on an empty population")]
    EmptyPopulation,

    /// A fitness oracle could not score a hypothesis.
    #[error("Fitness calculation error: {0}")]
    FitnessCalculation(String),

    /// Summing a generation's scores does not fit in a `Fitness`.
    #[error("Fitness overflow: summing scores overflowed at index {index}")]
    FitnessOverflow {
        /// Population index whose score pushed the sum out of range.
        index: usize,
    },

    /// A statistics sink rejected a record.
    #[error("Stats sink error: {0}")]
    Sink(String),

    /// A generic error with a custom message.
    #[error("{0}")]
    Other(String),
}

/// A specialized Result type for engine operations.
pub type Result<T> = std::result::Result<T, GeneticError>;

/// Extension trait for Result to add context to errors.
///
/// Converts any foreign error into `GeneticError::Other`, prefixed with the
/// given context.
pub trait ResultExt<T, E> {
    /// Adds context to an error.
    fn context<C>(self, context: C) -> Result<T>
    where
        C: fmt::Display + Send + Sync + 'static;
}

impl<T, E> ResultExt<T, E> for std::result::Result<T, E>
where
    E: StdError + Send + Sync + 'static,
{
    fn context<C>(self, context: C) -> Result<T>
    where
        C: fmt::Display + Send + Sync + 'static,
    {
        self.map_err(|e| GeneticError::Other(format!("{}: {}", context, e)))
    }
}

/// Extension trait for Option to convert to Result with a custom error.
///
/// ## Examples
///
/// ```rust
/// use bitga::error::{GeneticError, OptionExt};
///
/// let none: Option<usize> = None;
/// let result = none.ok_or_else_genetic(|| GeneticError::EmptyPopulation);
/// assert!(matches!(result, Err(GeneticError::EmptyPopulation)));
/// ```
pub trait OptionExt<T> {
    /// Converts an `Option<T>` to a `Result<T, GeneticError>` using
    /// a closure to generate the error.
    fn ok_or_else_genetic<F>(self, err_fn: F) -> Result<T>
    where
        F: FnOnce() -> GeneticError;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_else_genetic<F>(self, err_fn: F) -> Result<T>
    where
        F: FnOnce() -> GeneticError,
    {
        self.ok_or_else(err_fn)
    }
}
