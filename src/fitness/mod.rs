//! # Placeholder fitness oracles
//!
//! Stand-ins for a real problem: a target-matching oracle that decodes the
//! bitstring into integer parameters, a random oracle and a constant one.
//! Swap in any other [`FitnessOracle`](crate::evolution::FitnessOracle) to
//! solve a real problem.
pub mod target;

pub use target::{TargetOracle, BLOCK_WIDTH, DEFAULT_TARGETS};

use crate::error::Result;
use crate::evolution::FitnessOracle;
use crate::hypothesis::Hypothesis;
use crate::population::Fitness;
use crate::rng::ThreadLocalRng;

/// Scores every hypothesis with the same value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConstantOracle {
    value: Fitness,
}

impl ConstantOracle {
    pub fn new(value: Fitness) -> Self {
        Self { value }
    }
}

impl FitnessOracle for ConstantOracle {
    fn score(&self, _hypothesis: &Hypothesis) -> Result<Fitness> {
        Ok(self.value)
    }
}

/// Scores every hypothesis with a fresh uniform draw from `[0, 100)`.
///
/// Draws come from the thread-local generator, so runs using this oracle are
/// not reproducible even with a seeded configuration.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomOracle;

impl FitnessOracle for RandomOracle {
    fn score(&self, _hypothesis: &Hypothesis) -> Result<Fitness> {
        Ok(ThreadLocalRng::gen_range(0..100))
    }
}
