//! A genetic algorithm over fixed-length bitstrings.
//!
//! The [`evolution::GeneticEngine`] evolves a population of
//! [`hypothesis::Hypothesis`] values using fitness-proportionate selection,
//! masked crossover and single-bit mutation, maximizing the score of a
//! pluggable [`evolution::FitnessOracle`].
pub mod caching;
pub mod crossover;
pub mod error;
pub mod evolution;
pub mod fitness;
pub mod hypothesis;
pub mod population;
pub mod rng;
pub mod selection;

// Re-export commonly used types for convenience
pub use error::{GeneticError, OptionExt, Result, ResultExt};
pub use evolution::{FitnessOracle, GeneticEngine, GeneticEngineBuilder, RunConfiguration};
pub use hypothesis::Hypothesis;
