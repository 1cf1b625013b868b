//! # GeneticEngine
//!
//! The engine owns the population and drives the generation loop:
//!
//! 1. evaluate every individual with the fitness oracle,
//! 2. report statistics to the sink,
//! 3. build the next population through crossover, elitism, selection fill
//!    and mutation,
//! 4. swap the new population in.
//!
//! Evaluation of large populations is spread over rayon workers; everything
//! after evaluation runs sequentially on the frozen fitness record.

use rayon::prelude::*;
use tracing::{debug, info, warn};

use super::{
    cancel::CancellationToken,
    options::{DegeneratePolicy, LogLevel, RunConfiguration},
    oracle::FitnessOracle,
    stats::{GenerationStats, StatsSink},
};
use crate::{
    crossover::CrossoverOperator,
    error::{GeneticError, Result},
    hypothesis::Hypothesis,
    population::{Fitness, FitnessRecord, Population},
    rng::RandomNumberGenerator,
    selection::{SelectionStrategy, UniformSelection},
};

/// A hypothesis together with the score it received.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoredHypothesis {
    pub hypothesis: Hypothesis,
    pub fitness: Fitness,
    /// Generation in which the score was observed.
    pub generation: usize,
}

/// Outcome of [`GeneticEngine::run`].
#[derive(Debug, Clone)]
pub struct EvolutionResult {
    /// Best individual observed in any evaluated generation, `None` if no
    /// generation was evaluated.
    pub best: Option<ScoredHypothesis>,
    /// Generations fully completed.
    pub generations: usize,
    /// Whether the run stopped on a cancellation request.
    pub cancelled: bool,
    /// The population after the last completed generation.
    pub population: Population,
}

/// Genetic algorithm over fixed-length bitstrings.
///
/// # Example
///
/// ```rust
/// use bitga::evolution::{GeneticEngine, MemorySink, RunConfiguration};
/// use bitga::fitness::TargetOracle;
/// use bitga::selection::RouletteWheelSelection;
///
/// let config = RunConfiguration::builder()
///     .num_generations(25)
///     .elitist(true)
///     .seed(42)
///     .build();
///
/// let mut sink = MemorySink::new();
/// let mut engine = GeneticEngine::new(
///     config,
///     TargetOracle::default(),
///     RouletteWheelSelection::new(),
///     &mut sink,
/// )
/// .unwrap();
///
/// let result = engine.run().unwrap();
/// assert_eq!(result.generations, 25);
/// drop(engine);
/// assert_eq!(sink.stats().len(), 25);
/// ```
#[derive(Debug)]
pub struct GeneticEngine<O, S, K>
where
    O: FitnessOracle,
    S: SelectionStrategy,
    K: StatsSink,
{
    config: RunConfiguration,
    oracle: O,
    selection: S,
    sink: K,
    crossover: CrossoverOperator,
    population: Population,
    generation: usize,
    best: Option<ScoredHypothesis>,
    last_fitness: Option<FitnessRecord>,
    rng: RandomNumberGenerator,
    cancel: Option<CancellationToken>,
}

impl<O, S, K> GeneticEngine<O, S, K>
where
    O: FitnessOracle + Sync,
    S: SelectionStrategy,
    K: StatsSink,
{
    /// Validates `config`, then builds the initial random population and the
    /// crossover operator.
    ///
    /// # Errors
    ///
    /// Returns `GeneticError::Configuration` for an invalid configuration.
    /// Nothing is built in that case.
    pub fn new(config: RunConfiguration, oracle: O, selection: S, sink: K) -> Result<Self> {
        config.validate()?;

        let mut rng = match config.seed() {
            Some(seed) => RandomNumberGenerator::from_seed(seed),
            None => RandomNumberGenerator::new(),
        };

        let population = Population::random(
            config.population_size(),
            config.hypothesis_length(),
            &mut rng,
        );
        let crossover =
            CrossoverOperator::new(config.hypothesis_length(), config.mask_policy(), &mut rng);

        Ok(Self {
            config,
            oracle,
            selection,
            sink,
            crossover,
            population,
            generation: 0,
            best: None,
            last_fitness: None,
            rng,
            cancel: None,
        })
    }

    /// Attaches a cancellation token checked before every generation.
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = Some(token);
        self
    }

    /// Replaces the crossover operator, for instance to pin a specific mask.
    ///
    /// # Errors
    ///
    /// Returns `LengthMismatch` if the operator's mask does not match the
    /// configured hypothesis length.
    pub fn with_crossover(mut self, crossover: CrossoverOperator) -> Result<Self> {
        if crossover.mask().len() != self.config.hypothesis_length() {
            return Err(GeneticError::LengthMismatch {
                expected: self.config.hypothesis_length(),
                actual: crossover.mask().len(),
            });
        }
        self.crossover = crossover;
        Ok(self)
    }

    pub fn config(&self) -> &RunConfiguration {
        &self.config
    }

    pub fn population(&self) -> &Population {
        &self.population
    }

    /// Index of the next generation to run.
    pub fn generation(&self) -> usize {
        self.generation
    }

    pub fn best(&self) -> Option<&ScoredHypothesis> {
        self.best.as_ref()
    }

    /// Scores of the most recently completed generation. The record indexes
    /// the population that was evaluated, not the one that replaced it.
    pub fn last_fitness(&self) -> Option<&FitnessRecord> {
        self.last_fitness.as_ref()
    }

    pub fn crossover(&self) -> &CrossoverOperator {
        &self.crossover
    }

    pub fn sink(&self) -> &K {
        &self.sink
    }

    pub fn into_sink(self) -> K {
        self.sink
    }

    /// Runs generations until the configured count is reached or the
    /// cancellation token fires.
    ///
    /// # Errors
    ///
    /// Stops at the first oracle failure, or at a degenerate generation when
    /// the configuration asks to abort. The population is left as it was
    /// before the failing generation.
    pub fn run(&mut self) -> Result<EvolutionResult> {
        let mut cancelled = false;

        while self.generation < self.config.num_generations() {
            if self.cancel.as_ref().is_some_and(|t| t.is_cancelled()) {
                info!(generation = self.generation, "evolution cancelled");
                cancelled = true;
                break;
            }
            self.step()?;
        }

        Ok(EvolutionResult {
            best: self.best.clone(),
            generations: self.generation,
            cancelled,
            population: self.population.clone(),
        })
    }

    /// Runs one generation: evaluate, report, build and replace.
    ///
    /// # Errors
    ///
    /// Fails before anything is recorded when evaluation fails or when a
    /// degenerate generation meets `DegeneratePolicy::Abort`. Best tracking,
    /// the sink and the population are untouched in that case.
    pub fn step(&mut self) -> Result<GenerationStats> {
        let generation = self.generation;
        let record = self.evaluate()?;
        if record.is_degenerate() && self.config.degenerate_policy() == DegeneratePolicy::Abort {
            return Err(GeneticError::DegenerateSelection {
                total: record.selection_total(),
            });
        }
        let stats = GenerationStats::from_record(generation, &record);

        self.track_best(&record);
        self.report(&stats);

        let next = self.build_next_generation(&record)?;
        self.population = next;
        self.last_fitness = Some(record);
        self.generation += 1;

        Ok(stats)
    }

    /// Scores the current population.
    ///
    /// # Errors
    ///
    /// Returns `OracleFailure` for the first individual the oracle could not
    /// score; no partial record is produced.
    pub fn evaluate(&self) -> Result<FitnessRecord> {
        let generation = self.generation;
        let verbose = self.config.log_level() == LogLevel::Verbose;
        let oracle = &self.oracle;
        let members = self.population.as_slice();

        let scores: Result<Vec<Fitness>> = if members.len() >= self.config.parallel_threshold() {
            members
                .par_iter()
                .enumerate()
                .map(|(index, h)| score_one(oracle, generation, index, h, verbose))
                .collect()
        } else {
            members
                .iter()
                .enumerate()
                .map(|(index, h)| score_one(oracle, generation, index, h, verbose))
                .collect()
        };

        FitnessRecord::from_scores(scores?)
    }

    fn track_best(&mut self, record: &FitnessRecord) {
        let improved = self
            .best
            .as_ref()
            .map_or(true, |best| record.best() > best.fitness);
        if improved {
            self.best = Some(ScoredHypothesis {
                hypothesis: self.population[record.best_index()].clone(),
                fitness: record.best(),
                generation: self.generation,
            });
        }
    }

    fn report(&mut self, stats: &GenerationStats) {
        if self.config.log_level() != LogLevel::None {
            info!(
                generation = stats.generation,
                best = stats.best,
                average = stats.average,
                "Generation: {}, Best fitness: {}",
                stats.generation,
                stats.best
            );
        }

        if let Err(e) = self.sink.record(stats) {
            warn!(generation = stats.generation, error = %e, "stats sink failed to record generation");
        }
        let best = &self.population[stats.best_index];
        if let Err(e) = self.sink.record_diagnostic(stats.generation, best) {
            warn!(generation = stats.generation, error = %e, "stats sink failed to record diagnostic");
        }
    }

    fn build_next_generation(&mut self, record: &FitnessRecord) -> Result<Population> {
        let size = self.config.population_size();
        let generation = self.generation;
        let verbose = self.config.log_level() == LogLevel::Verbose;

        // Abort was already handled by `step`.
        let degenerate = record.is_degenerate();
        if degenerate {
            warn!(
                generation,
                total = record.selection_total(),
                "no positive selection weight, selecting uniformly"
            );
        }
        let uniform = UniformSelection::new();
        let selection: &dyn SelectionStrategy = if degenerate {
            &uniform
        } else {
            &self.selection
        };

        let mut next: Vec<Hypothesis> = Vec::with_capacity(size);

        // Crossover; an odd slot count leaves the last slot to selection.
        for _ in 0..self.config.crossover_slots() / 2 {
            let first = selection.select(record, &mut self.rng)?;
            let second = selection.select(record, &mut self.rng)?;
            let (h1, h2) = (&self.population[first], &self.population[second]);
            let (child1, child2) = self.crossover.recombine_next(h1, h2, &mut self.rng)?;
            if verbose {
                debug!(
                    generation,
                    mask = %self.crossover.mask(),
                    parents = %format!("{},{}", h1, h2),
                    children = %format!("{},{}", child1, child2),
                    "crossover"
                );
            }
            next.push(child1);
            next.push(child2);
        }

        // Elitism; the elite takes the last crossover slot if crossover filled them all.
        let mut elite_slot = None;
        if self.config.elitist() {
            next.truncate(size - 1);
            let elite = self.population[record.best_index()].clone();
            if verbose {
                debug!(generation, elite = %elite, fitness = record.best(), "keeping best hypothesis");
            }
            elite_slot = Some(next.len());
            next.push(elite);
        }

        // Selection fill.
        let missing = size.saturating_sub(next.len());
        for index in selection.select_many(record, missing, &mut self.rng)? {
            next.push(self.population[index].clone());
        }

        // Mutation, never touching the elite.
        let candidates = size - usize::from(elite_slot.is_some());
        if candidates > 0 {
            for _ in 0..self.config.mutation_events() {
                let mut target = self.rng.gen_index(candidates);
                if elite_slot.is_some_and(|slot| target >= slot) {
                    target += 1;
                }
                let before = verbose.then(|| next[target].to_string());
                next[target].mutate(&mut self.rng);
                if let Some(before) = before {
                    debug!(generation, index = target, before = %before, after = %next[target], "mutation");
                }
            }
        }

        Ok(Population::from_members(next))
    }
}

fn score_one<O: FitnessOracle>(
    oracle: &O,
    generation: usize,
    index: usize,
    hypothesis: &Hypothesis,
    verbose: bool,
) -> Result<Fitness> {
    let fitness = oracle
        .score(hypothesis)
        .map_err(|e| GeneticError::OracleFailure {
            generation,
            index,
            source: Box::new(e),
        })?;
    if verbose {
        debug!(generation, index, hypothesis = %hypothesis, fitness, "scored");
    }
    Ok(fitness)
}
