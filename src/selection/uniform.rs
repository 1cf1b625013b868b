use crate::error::{GeneticError, Result};
use crate::population::FitnessRecord;
use crate::rng::RandomNumberGenerator;
use crate::selection::selection_strategy::SelectionStrategy;

/// Selects every index with equal probability, ignoring scores.
///
/// This is the documented fallback for generations whose selection weight
/// total is zero or negative.
#[derive(Debug, Clone, Default)]
pub struct UniformSelection;

impl UniformSelection {
    pub fn new() -> Self {
        Self
    }
}

impl SelectionStrategy for UniformSelection {
    fn select(&self, fitness: &FitnessRecord, rng: &mut RandomNumberGenerator) -> Result<usize> {
        if fitness.is_empty() {
            return Err(GeneticError::EmptyPopulation);
        }
        Ok(rng.gen_index(fitness.len()))
    }
}
