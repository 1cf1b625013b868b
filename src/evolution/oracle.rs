use crate::error::Result;
use crate::hypothesis::Hypothesis;
use crate::population::Fitness;

/// Scores a hypothesis. Higher is better.
///
/// The engine treats the value as opaque apart from comparing and summing it;
/// fitness-proportionate selection additionally expects scores to be
/// non-negative and gives negative ones zero weight.
///
/// Oracles are scored through `&self`, possibly from several rayon workers at
/// once when the population is large, so implementations should be pure.
///
/// # Example
///
/// ```rust
/// use bitga::error::Result;
/// use bitga::evolution::FitnessOracle;
/// use bitga::hypothesis::Hypothesis;
/// use bitga::population::Fitness;
///
/// struct OneMax;
///
/// impl FitnessOracle for OneMax {
///     fn score(&self, hypothesis: &Hypothesis) -> Result<Fitness> {
///         Ok(hypothesis.count_ones() as Fitness)
///     }
/// }
///
/// let h: Hypothesis = "10110".parse().unwrap();
/// assert_eq!(OneMax.score(&h).unwrap(), 3);
/// ```
pub trait FitnessOracle {
    /// Scores `hypothesis`.
    ///
    /// # Errors
    ///
    /// An error aborts the generation being evaluated; the engine reports it
    /// as `OracleFailure` with this error attached.
    fn score(&self, hypothesis: &Hypothesis) -> Result<Fitness>;
}

impl<O: FitnessOracle + ?Sized> FitnessOracle for &O {
    fn score(&self, hypothesis: &Hypothesis) -> Result<Fitness> {
        (**self).score(hypothesis)
    }
}
