use crate::{
    error::Result,
    selection::{RouletteWheelSelection, SelectionStrategy},
};

use super::{
    CancellationToken, FitnessOracle, GeneticEngine, NullSink, RunConfiguration, StatsSink,
};

/// Fluent construction of a [`GeneticEngine`].
///
/// Starts from cumulative roulette selection, a sink that discards every
/// record and `RunConfiguration::default()`; each `with_*` call swaps one
/// piece.
///
/// # Example
///
/// ```rust
/// use bitga::evolution::{GeneticEngineBuilder, MemorySink, RunConfiguration};
/// use bitga::fitness::ConstantOracle;
/// use bitga::selection::RetryRouletteSelection;
///
/// let engine = GeneticEngineBuilder::new(ConstantOracle::new(50))
///     .with_selection(RetryRouletteSelection::new())
///     .with_sink(MemorySink::new())
///     .with_config(RunConfiguration::builder().num_generations(5).build())
///     .build()
///     .unwrap();
///
/// assert_eq!(engine.population().len(), 20);
/// ```
pub struct GeneticEngineBuilder<O, S, K>
where
    O: FitnessOracle,
    S: SelectionStrategy,
    K: StatsSink,
{
    oracle: O,
    selection: S,
    sink: K,
    config: RunConfiguration,
    cancel: Option<CancellationToken>,
}

impl<O> GeneticEngineBuilder<O, RouletteWheelSelection, NullSink>
where
    O: FitnessOracle + Sync,
{
    pub fn new(oracle: O) -> Self {
        Self {
            oracle,
            selection: RouletteWheelSelection::new(),
            sink: NullSink,
            config: RunConfiguration::default(),
            cancel: None,
        }
    }
}

impl<O, S, K> GeneticEngineBuilder<O, S, K>
where
    O: FitnessOracle + Sync,
    S: SelectionStrategy,
    K: StatsSink,
{
    pub fn with_selection<S2: SelectionStrategy>(self, selection: S2) -> GeneticEngineBuilder<O, S2, K> {
        GeneticEngineBuilder {
            oracle: self.oracle,
            selection,
            sink: self.sink,
            config: self.config,
            cancel: self.cancel,
        }
    }

    pub fn with_sink<K2: StatsSink>(self, sink: K2) -> GeneticEngineBuilder<O, S, K2> {
        GeneticEngineBuilder {
            oracle: self.oracle,
            selection: self.selection,
            sink,
            config: self.config,
            cancel: self.cancel,
        }
    }

    pub fn with_config(mut self, config: RunConfiguration) -> Self {
        self.config = config;
        self
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = Some(token);
        self
    }

    /// Validates the configuration and builds the engine.
    ///
    /// # Errors
    ///
    /// Returns `GeneticError::Configuration` for an invalid configuration.
    pub fn build(self) -> Result<GeneticEngine<O, S, K>> {
        let engine = GeneticEngine::new(self.config, self.oracle, self.selection, self.sink)?;
        Ok(match self.cancel {
            Some(token) => engine.with_cancellation(token),
            None => engine,
        })
    }
}
