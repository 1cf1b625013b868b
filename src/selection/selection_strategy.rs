use std::fmt::Debug;

use crate::error::Result;
use crate::population::FitnessRecord;
use crate::rng::RandomNumberGenerator;

/// Trait for selection strategies in the generation loop.
///
/// A strategy reads a frozen `FitnessRecord` and returns the index of one
/// individual. Draws are independent, so the same index may come back twice.
///
/// # Examples
///
/// ```
/// use bitga::population::FitnessRecord;
/// use bitga::rng::RandomNumberGenerator;
/// use bitga::selection::{RouletteWheelSelection, SelectionStrategy};
///
/// let record = FitnessRecord::from_scores(vec![0, 0, 7]).unwrap();
/// let mut rng = RandomNumberGenerator::from_seed(1);
///
/// let index = RouletteWheelSelection::new().select(&record, &mut rng).unwrap();
/// assert_eq!(index, 2);
/// ```
pub trait SelectionStrategy: Debug + Send + Sync {
    /// Selects one index from the record.
    ///
    /// # Errors
    ///
    /// Fitness-proportionate strategies return `DegenerateSelection` when the
    /// record carries no positive weight.
    fn select(&self, fitness: &FitnessRecord, rng: &mut RandomNumberGenerator) -> Result<usize>;

    /// Performs `count` independent draws.
    fn select_many(
        &self,
        fitness: &FitnessRecord,
        count: usize,
        rng: &mut RandomNumberGenerator,
    ) -> Result<Vec<usize>> {
        (0..count).map(|_| self.select(fitness, rng)).collect()
    }
}
