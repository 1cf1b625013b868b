//! # RunConfiguration
//!
//! The `RunConfiguration` struct holds every parameter of a run. It is fixed
//! for the whole run and checked by [`RunConfiguration::validate`] before the
//! engine builds its first population.
//!
//! ## Example
//!
//! ```rust
//! use bitga::evolution::options::{LogLevel, RunConfiguration};
//!
//! // Create a new RunConfiguration instance with custom parameters
//! let config = RunConfiguration::builder()
//!     .population_size(50)
//!     .hypothesis_length(42)
//!     .num_generations(200)
//!     .crossover_rate(0.7)
//!     .mutation_rate(0.1)
//!     .elitist(true)
//!     .log_level(LogLevel::Minimal)
//!     .seed(7)
//!     .build();
//!
//! assert!(config.validate().is_ok());
//!
//! // The defaults describe a 20 x 42-bit population evolved for 1000 generations
//! let default_config = RunConfiguration::default();
//! assert_eq!(default_config.population_size(), 20);
//! ```
//!
//! ## Enums
//!
//! ### `LogLevel`
//!
//! - `Verbose`: one event per generation plus events for every score,
//!   recombination, elite pick and mutation.
//! - `Minimal`: one event per generation.
//! - `None`: no per-generation events. Warnings are still emitted.
//!
//! ### `DegeneratePolicy`
//!
//! What to do when a generation has no positive selection weight.

use crate::crossover::MaskPolicy;
use crate::error::{GeneticError, Result};

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogLevel {
    Verbose,
    Minimal,
    #[default]
    None,
}

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DegeneratePolicy {
    /// Select uniformly at random for that generation and keep going.
    #[default]
    UniformFallback,
    /// Stop the run with `GeneticError::DegenerateSelection`.
    Abort,
}

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct RunConfiguration {
    population_size: usize,
    hypothesis_length: usize,
    num_generations: usize,
    /// Fraction of the population regenerated through crossover each generation.
    crossover_rate: f64,
    /// Fraction of the population receiving one mutation each generation.
    mutation_rate: f64,
    elitist: bool,
    mask_policy: MaskPolicy,
    degenerate_policy: DegeneratePolicy,
    /// Minimum population size scored in parallel.
    parallel_threshold: usize,
    seed: Option<u64>,
    log_level: LogLevel,
}

impl RunConfiguration {
    /// Creates a configuration with the core parameters; every other field
    /// takes its default.
    pub fn new(
        population_size: usize,
        hypothesis_length: usize,
        num_generations: usize,
        crossover_rate: f64,
        mutation_rate: f64,
        elitist: bool,
    ) -> Self {
        Self {
            population_size,
            hypothesis_length,
            num_generations,
            crossover_rate,
            mutation_rate,
            elitist,
            ..Self::default()
        }
    }

    /// Checks the configuration, failing fast instead of clamping.
    ///
    /// # Errors
    ///
    /// Returns `GeneticError::Configuration` if the population size or
    /// hypothesis length is zero, or if either rate is outside `[0, 1]`.
    pub fn validate(&self) -> Result<()> {
        if self.population_size == 0 {
            return Err(GeneticError::Configuration(
                "Population size cannot be zero".to_string(),
            ));
        }

        if self.hypothesis_length == 0 {
            return Err(GeneticError::Configuration(
                "Hypothesis length cannot be zero".to_string(),
            ));
        }

        for (name, rate) in [
            ("Crossover rate", self.crossover_rate),
            ("Mutation rate", self.mutation_rate),
        ] {
            if !(0.0..=1.0).contains(&rate) {
                return Err(GeneticError::Configuration(format!(
                    "{} must be within [0, 1], got {}",
                    name, rate
                )));
            }
        }

        Ok(())
    }

    pub fn population_size(&self) -> usize {
        self.population_size
    }

    pub fn hypothesis_length(&self) -> usize {
        self.hypothesis_length
    }

    pub fn num_generations(&self) -> usize {
        self.num_generations
    }

    pub fn crossover_rate(&self) -> f64 {
        self.crossover_rate
    }

    pub fn mutation_rate(&self) -> f64 {
        self.mutation_rate
    }

    pub fn elitist(&self) -> bool {
        self.elitist
    }

    pub fn mask_policy(&self) -> MaskPolicy {
        self.mask_policy
    }

    pub fn degenerate_policy(&self) -> DegeneratePolicy {
        self.degenerate_policy
    }

    pub fn parallel_threshold(&self) -> usize {
        self.parallel_threshold
    }

    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    pub fn log_level(&self) -> LogLevel {
        self.log_level
    }

    /// Slots filled by crossover each generation: `floor(crossover_rate * N)`.
    pub fn crossover_slots(&self) -> usize {
        (self.crossover_rate * self.population_size as f64) as usize
    }

    /// Mutation events each generation: `floor(mutation_rate * N)`.
    pub fn mutation_events(&self) -> usize {
        (self.mutation_rate * self.population_size as f64) as usize
    }

    pub fn set_num_generations(&mut self, num_generations: usize) {
        self.num_generations = num_generations;
    }

    pub fn set_log_level(&mut self, log_level: LogLevel) {
        self.log_level = log_level;
    }

    pub fn set_seed(&mut self, seed: Option<u64>) {
        self.seed = seed;
    }

    /// Returns a builder for creating a `RunConfiguration` instance.
    pub fn builder() -> RunConfigurationBuilder {
        RunConfigurationBuilder::default()
    }
}

impl Default for RunConfiguration {
    fn default() -> Self {
        Self {
            population_size: 20,
            hypothesis_length: 42,
            num_generations: 1000,
            crossover_rate: 0.8,
            mutation_rate: 0.2,
            elitist: false,
            mask_policy: MaskPolicy::Retained,
            degenerate_policy: DegeneratePolicy::UniformFallback,
            parallel_threshold: 1000,
            seed: None,
            log_level: LogLevel::None,
        }
    }
}

/// Builder for `RunConfiguration`.
///
/// Unset fields fall back to `RunConfiguration::default()`. The builder does
/// not validate; the engine does.
#[derive(Debug, Clone, Default)]
pub struct RunConfigurationBuilder {
    population_size: Option<usize>,
    hypothesis_length: Option<usize>,
    num_generations: Option<usize>,
    crossover_rate: Option<f64>,
    mutation_rate: Option<f64>,
    elitist: Option<bool>,
    mask_policy: Option<MaskPolicy>,
    degenerate_policy: Option<DegeneratePolicy>,
    parallel_threshold: Option<usize>,
    seed: Option<u64>,
    log_level: Option<LogLevel>,
}

impl RunConfigurationBuilder {
    pub fn population_size(mut self, value: usize) -> Self {
        self.population_size = Some(value);
        self
    }

    pub fn hypothesis_length(mut self, value: usize) -> Self {
        self.hypothesis_length = Some(value);
        self
    }

    pub fn num_generations(mut self, value: usize) -> Self {
        self.num_generations = Some(value);
        self
    }

    pub fn crossover_rate(mut self, value: f64) -> Self {
        self.crossover_rate = Some(value);
        self
    }

    pub fn mutation_rate(mut self, value: f64) -> Self {
        self.mutation_rate = Some(value);
        self
    }

    pub fn elitist(mut self, value: bool) -> Self {
        self.elitist = Some(value);
        self
    }

    pub fn mask_policy(mut self, value: MaskPolicy) -> Self {
        self.mask_policy = Some(value);
        self
    }

    pub fn degenerate_policy(mut self, value: DegeneratePolicy) -> Self {
        self.degenerate_policy = Some(value);
        self
    }

    pub fn parallel_threshold(mut self, value: usize) -> Self {
        self.parallel_threshold = Some(value);
        self
    }

    pub fn seed(mut self, value: u64) -> Self {
        self.seed = Some(value);
        self
    }

    pub fn log_level(mut self, value: LogLevel) -> Self {
        self.log_level = Some(value);
        self
    }

    /// Builds the `RunConfiguration` instance.
    pub fn build(self) -> RunConfiguration {
        let defaults = RunConfiguration::default();
        RunConfiguration {
            population_size: self.population_size.unwrap_or(defaults.population_size),
            hypothesis_length: self.hypothesis_length.unwrap_or(defaults.hypothesis_length),
            num_generations: self.num_generations.unwrap_or(defaults.num_generations),
            crossover_rate: self.crossover_rate.unwrap_or(defaults.crossover_rate),
            mutation_rate: self.mutation_rate.unwrap_or(defaults.mutation_rate),
            elitist: self.elitist.unwrap_or(defaults.elitist),
            mask_policy: self.mask_policy.unwrap_or(defaults.mask_policy),
            degenerate_policy: self.degenerate_policy.unwrap_or(defaults.degenerate_policy),
            parallel_threshold: self
                .parallel_threshold
                .unwrap_or(defaults.parallel_threshold),
            seed: self.seed.or(defaults.seed),
            log_level: self.log_level.unwrap_or(defaults.log_level),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(RunConfiguration::default().validate().is_ok());
    }

    #[test]
    fn test_builder_overrides_defaults() {
        let config = RunConfiguration::builder()
            .population_size(4)
            .hypothesis_length(4)
            .num_generations(0)
            .elitist(true)
            .mask_policy(MaskPolicy::FreshPerCall)
            .build();

        assert_eq!(config.population_size(), 4);
        assert_eq!(config.hypothesis_length(), 4);
        assert_eq!(config.num_generations(), 0);
        assert!(config.elitist());
        assert_eq!(config.mask_policy(), MaskPolicy::FreshPerCall);
        assert_eq!(config.crossover_rate(), 0.8);
        assert_eq!(config.seed(), None);
    }

    #[test]
    fn test_rejects_zero_sizes() {
        let config = RunConfiguration::builder().population_size(0).build();
        match config.validate() {
            Err(GeneticError::Configuration(msg)) => {
                assert!(msg.contains("Population size cannot be zero"))
            }
            other => panic!("Expected Configuration error, got {:?}", other),
        }

        let config = RunConfiguration::builder().hypothesis_length(0).build();
        assert!(matches!(
            config.validate(),
            Err(GeneticError::Configuration(_))
        ));
    }

    #[test]
    fn test_rejects_rates_outside_unit_interval() {
        for (crossover, mutation) in [(1.2, 0.2), (-0.1, 0.2), (0.8, 1.5), (0.8, f64::NAN)] {
            let config = RunConfiguration::builder()
                .crossover_rate(crossover)
                .mutation_rate(mutation)
                .build();
            assert!(
                matches!(config.validate(), Err(GeneticError::Configuration(_))),
                "rates ({}, {}) should be rejected",
                crossover,
                mutation
            );
        }

        let edges = RunConfiguration::builder()
            .crossover_rate(0.0)
            .mutation_rate(1.0)
            .build();
        assert!(edges.validate().is_ok());
    }

    #[test]
    fn test_slot_counts_floor() {
        let config = RunConfiguration::new(20, 42, 10, 0.8, 0.2, false);
        assert_eq!(config.crossover_slots(), 16);
        assert_eq!(config.mutation_events(), 4);

        let config = RunConfiguration::new(7, 8, 10, 0.5, 0.3, false);
        assert_eq!(config.crossover_slots(), 3);
        assert_eq!(config.mutation_events(), 2);
    }
}
