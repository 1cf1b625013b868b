use crate::error::{GeneticError, OptionExt, Result};
use crate::evolution::FitnessOracle;
use crate::hypothesis::Hypothesis;
use crate::population::Fitness;
use crate::rng::{RandomNumberGenerator, ThreadLocalRng};

/// Bits per encoded parameter.
pub const BLOCK_WIDTH: usize = 7;

/// Targets used by [`TargetOracle::default`]; six parameters, 42 bits.
pub const DEFAULT_TARGETS: [u64; 6] = [5, 125, 64, 101, 9, 113];

const BLOCK_RANGE: f64 = 128.0;

/// Scores how close the decoded parameters of a hypothesis are to fixed targets.
///
/// The bitstring is read as consecutive 7-bit big-endian integers, one per
/// target. Each parameter scores `100 - |value - target| / 128 * 100` and the
/// hypothesis scores the truncated mean of those percentages, so a perfect
/// match scores 100.
///
/// # Example
///
/// ```rust
/// use bitga::evolution::FitnessOracle;
/// use bitga::fitness::TargetOracle;
///
/// let oracle = TargetOracle::default();
/// assert_eq!(oracle.required_length(), 42);
/// assert_eq!(oracle.score(&oracle.solution()).unwrap(), 100);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct TargetOracle {
    targets: Vec<u64>,
    noise: bool,
}

impl TargetOracle {
    /// Creates an oracle for the given targets. Targets above 127 cannot be
    /// reached by a 7-bit parameter.
    pub fn new(targets: Vec<u64>) -> Self {
        Self {
            targets,
            noise: false,
        }
    }

    /// Creates an oracle with `count` targets drawn uniformly from `[0, 128)`.
    pub fn random_targets(count: usize, rng: &mut RandomNumberGenerator) -> Self {
        Self::new(
            (0..count)
                .map(|_| rng.gen_index(BLOCK_RANGE as usize) as u64)
                .collect(),
        )
    }

    /// Adds uniform noise in `[-5, 5)` to every parameter percentage, clamped
    /// to `[0, 100]`. Noisy scores are drawn from the thread-local generator.
    pub fn with_noise(mut self, noise: bool) -> Self {
        self.noise = noise;
        self
    }

    pub fn targets(&self) -> &[u64] {
        &self.targets
    }

    /// Bits a hypothesis needs to encode every target.
    pub fn required_length(&self) -> usize {
        self.targets.len() * BLOCK_WIDTH
    }

    /// The hypothesis encoding every target exactly.
    pub fn solution(&self) -> Hypothesis {
        Hypothesis::from_bits(
            self.targets
                .iter()
                .flat_map(|&t| (0..BLOCK_WIDTH).rev().map(move |shift| (t >> shift) & 1 == 1))
                .collect(),
        )
    }

    /// Per-parameter closeness of `hypothesis`, each truncated to an integer
    /// percentage.
    pub fn parameter_scores(&self, hypothesis: &Hypothesis) -> Result<Vec<Fitness>> {
        Ok(self
            .percentages(hypothesis)?
            .into_iter()
            .map(|p| p as Fitness)
            .collect())
    }

    fn percentages(&self, hypothesis: &Hypothesis) -> Result<Vec<f64>> {
        if self.targets.is_empty() {
            return Err(GeneticError::FitnessCalculation(
                "target oracle has no targets".to_string(),
            ));
        }

        self.targets
            .iter()
            .enumerate()
            .map(|(i, &target)| {
                let value = hypothesis
                    .decode_block(i * BLOCK_WIDTH, BLOCK_WIDTH)
                    .ok_or_else_genetic(|| {
                        GeneticError::FitnessCalculation(format!(
                            "hypothesis of {} bits is too short for {} parameters of {} bits",
                            hypothesis.len(),
                            self.targets.len(),
                            BLOCK_WIDTH
                        ))
                    })?;

                let diff = value.abs_diff(target) as f64;
                let mut perc = 100.0 - diff / BLOCK_RANGE * 100.0;
                if self.noise {
                    perc += ThreadLocalRng::gen_range::<f64, _>(-5.0..5.0);
                    perc = perc.clamp(0.0, 100.0);
                }
                Ok(perc)
            })
            .collect()
    }
}

impl Default for TargetOracle {
    fn default() -> Self {
        Self::new(DEFAULT_TARGETS.to_vec())
    }
}

impl FitnessOracle for TargetOracle {
    fn score(&self, hypothesis: &Hypothesis) -> Result<Fitness> {
        let percentages = self.percentages(hypothesis)?;
        let mean = percentages.iter().sum::<f64>() / percentages.len() as f64;
        Ok(mean as Fitness)
    }
}
