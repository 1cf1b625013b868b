//! # Selection
//!
//! Fitness-proportionate selection policies. Each one maps a generation's
//! `FitnessRecord` to a single population index.
//!
//! - [`RouletteWheelSelection`] walks the cumulative weight distribution once.
//! - [`RetryRouletteSelection`] re-tests a fresh draw against one candidate's
//!   share at a time, with a bounded number of attempts.
//! - [`UniformSelection`] ignores fitness; the engine falls back to it when a
//!   generation has no positive weight.
pub mod retry;
pub mod roulette;
pub mod selection_strategy;
pub mod uniform;

pub use retry::RetryRouletteSelection;
pub use roulette::RouletteWheelSelection;
pub use selection_strategy::SelectionStrategy;
pub use uniform::UniformSelection;
