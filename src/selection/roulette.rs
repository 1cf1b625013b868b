use crate::error::{GeneticError, Result};
use crate::population::FitnessRecord;
use crate::rng::RandomNumberGenerator;
use crate::selection::selection_strategy::SelectionStrategy;

/// A selection strategy that selects individuals through roulette wheel selection.
///
/// Roulette wheel selection (also known as fitness proportionate selection) selects
/// individuals with probability proportional to their fitness. A single draw in
/// `[0, total)` is located on the cumulative weight distribution, so an individual
/// with weight `w` is returned with probability exactly `w / total`.
///
/// Negative scores carry zero weight and are never selected.
///
/// # Examples
///
/// ```
/// use bitga::population::FitnessRecord;
/// use bitga::rng::RandomNumberGenerator;
/// use bitga::selection::{RouletteWheelSelection, SelectionStrategy};
///
/// let record = FitnessRecord::from_scores(vec![5, 80, 30, 90, 10]).unwrap();
/// let mut rng = RandomNumberGenerator::from_seed(42);
///
/// let selection = RouletteWheelSelection::new();
/// let picks = selection.select_many(&record, 3, &mut rng).unwrap();
///
/// assert_eq!(picks.len(), 3);
/// assert!(picks.iter().all(|&i| i < 5));
/// ```
#[derive(Debug, Clone, Default)]
pub struct RouletteWheelSelection;

impl RouletteWheelSelection {
    pub fn new() -> Self {
        Self
    }

    /// Locates `target` on the cumulative distribution of `fitness` weights.
    ///
    /// `target` must lie in `[0, selection_total)`.
    fn locate(fitness: &FitnessRecord, target: i64) -> usize {
        let mut cumulative = 0;
        for index in 0..fitness.len() {
            cumulative += fitness.weight(index);
            if target < cumulative {
                return index;
            }
        }

        // Unreachable for a target inside the total; land on the last weighted entry.
        (0..fitness.len())
            .rev()
            .find(|&i| fitness.weight(i) > 0)
            .unwrap_or(0)
    }

    /// Samples one index from the cumulative distribution.
    pub(crate) fn sample(fitness: &FitnessRecord, rng: &mut RandomNumberGenerator) -> Result<usize> {
        if fitness.is_empty() {
            return Err(GeneticError::EmptyPopulation);
        }
        let total = fitness.selection_total();
        if total <= 0 {
            return Err(GeneticError::DegenerateSelection { total });
        }

        let target = rng.gen_index(total as usize) as i64;
        Ok(Self::locate(fitness, target))
    }
}

impl SelectionStrategy for RouletteWheelSelection {
    fn select(&self, fitness: &FitnessRecord, rng: &mut RandomNumberGenerator) -> Result<usize> {
        Self::sample(fitness, rng)
    }
}
