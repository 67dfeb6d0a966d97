//! # Error Types
//!
//! This module defines the error type used across the optimizer. It provides
//! specific variants for the failure scenarios that can occur while building a
//! run configuration, evolving island populations, or synchronizing islands
//! through the barrier collectives.
//!
//! ## Examples
//!
//! Using the `Result` type:
//!
//! ```rust
//! use archipelago::error::{GaError, Result};
//!
//! fn some_function() -> Result<()> {
//!     // Function implementation
//!     Ok(())
//! }
//!
//! fn caller() {
//!     match some_function() {
//!         Ok(_) => println!("Success!"),
//!         Err(e) => println!("Error: {}", e),
//!     }
//! }
//! ```

use thiserror::Error;

/// Represents errors that can occur while running the distributed optimizer.
///
/// Note that fitness evaluation never produces an error: malformed routes and
/// forbidden edges are scored with the fixed infeasibility penalty instead, so
/// evaluation cannot fail mid-batch.
#[derive(Error, Debug)]
pub enum GaError {
    /// Error that occurs when an invalid configuration is provided.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Error that occurs when an empty population is encountered.
    #[error("Empty population error: Cannot operate on an empty population")]
    EmptyPopulation,

    /// Error that occurs when the uniqueness repair loop exhausts its attempt
    /// budget before reaching the target population size.
    #[error(
        "Uniqueness exhausted: produced {produced} of {target} unique routes in {attempts} attempts"
    )]
    UniquenessExhausted {
        /// Unique routes produced before the budget ran out.
        produced: usize,
        /// Target population size.
        target: usize,
        /// Attempt budget that was spent.
        attempts: usize,
    },

    /// Error that occurs when an island worker crashes or disconnects from the
    /// barrier collectives. Fatal to the run; no partial results are kept.
    #[error("Island failure: {0}")]
    IslandFailure(String),

    /// A generic error with a custom message.
    #[error("{0}")]
    Other(String),
}

/// A specialized Result type for optimizer operations.
pub type Result<T> = std::result::Result<T, GaError>;
