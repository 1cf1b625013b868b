use tracing::debug;

use crate::error::{GeneticError, Result};
use crate::population::FitnessRecord;
use crate::rng::RandomNumberGenerator;
use crate::selection::roulette::RouletteWheelSelection;
use crate::selection::selection_strategy::SelectionStrategy;

/// Default cap on retry attempts before falling back to cumulative sampling.
pub const DEFAULT_MAX_ATTEMPTS: usize = 10_000;

/// Retry-per-candidate proportional selection.
///
/// Starting at index 0, each attempt draws a fresh `r` in `[0, 1)` and accepts
/// the current candidate when `r <= weight / total`; otherwise it moves to the
/// next index, wrapping after the last. This is not the cumulative roulette:
/// the acceptance chance per candidate is its share, but earlier indices get
/// tested first, so low indices are favoured. With four equal weights index 0
/// is returned about 37% of the time and index 3 about 15%.
///
/// After `max_attempts` rejected attempts the strategy stops retrying and
/// samples the cumulative distribution instead, which always terminates.
///
/// # Examples
///
/// ```
/// use bitga::population::FitnessRecord;
/// use bitga::rng::RandomNumberGenerator;
/// use bitga::selection::{RetryRouletteSelection, SelectionStrategy};
///
/// let record = FitnessRecord::from_scores(vec![0, 0, 0, 10]).unwrap();
/// let mut rng = RandomNumberGenerator::from_seed(9);
///
/// let selection = RetryRouletteSelection::new();
/// assert_eq!(selection.select(&record, &mut rng).unwrap(), 3);
/// ```
#[derive(Debug, Clone)]
pub struct RetryRouletteSelection {
    max_attempts: usize,
}

impl RetryRouletteSelection {
    pub fn new() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }

    /// Creates the strategy with a custom attempt cap. A cap of zero always
    /// samples the cumulative distribution directly.
    pub fn with_max_attempts(max_attempts: usize) -> Self {
        Self { max_attempts }
    }

    pub fn max_attempts(&self) -> usize {
        self.max_attempts
    }
}

impl Default for RetryRouletteSelection {
    fn default() -> Self {
        Self::new()
    }
}

impl SelectionStrategy for RetryRouletteSelection {
    fn select(&self, fitness: &FitnessRecord, rng: &mut RandomNumberGenerator) -> Result<usize> {
        if fitness.is_empty() {
            return Err(GeneticError::EmptyPopulation);
        }
        let total = fitness.selection_total();
        if total <= 0 {
            return Err(GeneticError::DegenerateSelection { total });
        }

        let total = total as f64;
        let mut index = 0;
        for _ in 0..self.max_attempts {
            let share = fitness.weight(index) as f64 / total;
            let r = rng.gen_probability();
            if share > 0.0 && r <= share {
                return Ok(index);
            }
            index = (index + 1) % fitness.len();
        }

        debug!(
            max_attempts = self.max_attempts,
            "retry selection exhausted its attempts, sampling cumulatively"
        );
        RouletteWheelSelection::sample(fitness, rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_weighted_candidate() {
        let record = FitnessRecord::from_scores(vec![0, 0, 0, 10]).unwrap();
        let mut rng = RandomNumberGenerator::from_seed(1);
        let selection = RetryRouletteSelection::new();

        for _ in 0..500 {
            assert_eq!(selection.select(&record, &mut rng).unwrap(), 3);
        }
    }

    #[test]
    fn test_low_indices_are_favoured() {
        let record = FitnessRecord::from_scores(vec![10, 10, 10, 10]).unwrap();
        let mut rng = RandomNumberGenerator::from_seed(42);
        let selection = RetryRouletteSelection::new();

        let mut counts = [0usize; 4];
        for _ in 0..20_000 {
            counts[selection.select(&record, &mut rng).unwrap()] += 1;
        }

        // Expected shares are roughly 36.6%, 27.4%, 20.6% and 15.4%.
        assert!(counts[0] > counts[1]);
        assert!(counts[1] > counts[2]);
        assert!(counts[2] > counts[3]);
        assert!((6_800..7_800).contains(&counts[0]));
        assert!((2_700..3_500).contains(&counts[3]));
    }

    #[test]
    fn test_zero_attempts_falls_back_to_cumulative() {
        let record = FitnessRecord::from_scores(vec![0, 5]).unwrap();
        let mut rng = RandomNumberGenerator::from_seed(5);
        let selection = RetryRouletteSelection::with_max_attempts(0);

        for _ in 0..200 {
            assert_eq!(selection.select(&record, &mut rng).unwrap(), 1);
        }
    }

    #[test]
    fn test_degenerate_record() {
        let record = FitnessRecord::from_scores(vec![0, 0]).unwrap();
        let mut rng = RandomNumberGenerator::from_seed(5);

        let result = RetryRouletteSelection::new().select(&record, &mut rng);
        assert!(matches!(
            result,
            Err(GeneticError::DegenerateSelection { .. })
        ));
    }
}
