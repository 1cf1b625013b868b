//! # Run statistics
//!
//! After each evaluation pass the engine reports a `GenerationStats` to a
//! `StatsSink`, then hands the sink the best hypothesis of that generation as
//! a per-individual diagnostic. Reporting never feeds back into the search:
//! a sink that fails is logged and the run carries on.

use tracing::info;

use crate::error::Result;
use crate::hypothesis::Hypothesis;
use crate::population::{Fitness, FitnessRecord};

/// Aggregate fitness of one generation.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerationStats {
    pub generation: usize,
    pub worst: Fitness,
    /// Sum of scores divided by population size, truncated.
    pub average: Fitness,
    pub best: Fitness,
    pub best_index: usize,
}

impl GenerationStats {
    pub fn from_record(generation: usize, record: &FitnessRecord) -> Self {
        Self {
            generation,
            worst: record.worst(),
            average: record.average(),
            best: record.best(),
            best_index: record.best_index(),
        }
    }
}

/// Receives per-generation statistics.
pub trait StatsSink {
    /// Records the aggregate statistics of one generation.
    fn record(&mut self, stats: &GenerationStats) -> Result<()>;

    /// Records a diagnostic for a single individual, by default nothing.
    fn record_diagnostic(&mut self, _generation: usize, _hypothesis: &Hypothesis) -> Result<()> {
        Ok(())
    }
}

impl<S: StatsSink + ?Sized> StatsSink for &mut S {
    fn record(&mut self, stats: &GenerationStats) -> Result<()> {
        (**self).record(stats)
    }

    fn record_diagnostic(&mut self, generation: usize, hypothesis: &Hypothesis) -> Result<()> {
        (**self).record_diagnostic(generation, hypothesis)
    }
}

/// Discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl StatsSink for NullSink {
    fn record(&mut self, _stats: &GenerationStats) -> Result<()> {
        Ok(())
    }
}

/// Keeps every record in memory.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    stats: Vec<GenerationStats>,
    diagnostics: Vec<(usize, Hypothesis)>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stats(&self) -> &[GenerationStats] {
        &self.stats
    }

    /// Best hypothesis of each generation, in recording order.
    pub fn diagnostics(&self) -> &[(usize, Hypothesis)] {
        &self.diagnostics
    }
}

impl StatsSink for MemorySink {
    fn record(&mut self, stats: &GenerationStats) -> Result<()> {
        self.stats.push(*stats);
        Ok(())
    }

    fn record_diagnostic(&mut self, generation: usize, hypothesis: &Hypothesis) -> Result<()> {
        self.diagnostics.push((generation, hypothesis.clone()));
        Ok(())
    }
}

/// Emits each record as a structured `info` event.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl StatsSink for TracingSink {
    fn record(&mut self, stats: &GenerationStats) -> Result<()> {
        info!(
            generation = stats.generation,
            worst = stats.worst,
            average = stats.average,
            best = stats.best,
            "generation stats"
        );
        Ok(())
    }

    fn record_diagnostic(&mut self, generation: usize, hypothesis: &Hypothesis) -> Result<()> {
        info!(generation, best = %hypothesis, "best hypothesis");
        Ok(())
    }
}
