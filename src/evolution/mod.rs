pub mod builder;
pub mod caching_oracle;
pub mod cancel;
pub mod engine;
pub mod options;
pub mod oracle;
pub mod stats;

pub use builder::GeneticEngineBuilder;
pub use caching_oracle::CachingOracle;
pub use cancel::CancellationToken;
pub use engine::{EvolutionResult, GeneticEngine, ScoredHypothesis};
pub use options::{DegeneratePolicy, LogLevel, RunConfiguration, RunConfigurationBuilder};
pub use oracle::FitnessOracle;
pub use stats::{GenerationStats, MemorySink, NullSink, StatsSink, TracingSink};
