use bitga::{
    evolution::{
        CachingOracle, FitnessOracle, GeneticEngine, MemorySink, NullSink, RunConfiguration,
    },
    fitness::TargetOracle,
    hypothesis::Hypothesis,
    population::Fitness,
    selection::RouletteWheelSelection,
    Result,
};
use std::collections::HashSet;
use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};

// Define an oracle that tracks the number of evaluations
#[derive(Debug, Clone)]
struct CostlyOracle {
    // Use Arc<AtomicUsize> to track evaluations across clones
    evaluations: Arc<AtomicUsize>,
    inner: TargetOracle,
}

impl CostlyOracle {
    fn new() -> Self {
        Self {
            evaluations: Arc::new(AtomicUsize::new(0)),
            inner: TargetOracle::default(),
        }
    }

    fn get_evaluations(&self) -> usize {
        self.evaluations.load(Ordering::SeqCst)
    }
}

impl FitnessOracle for CostlyOracle {
    fn score(&self, hypothesis: &Hypothesis) -> Result<Fitness> {
        self.evaluations.fetch_add(1, Ordering::SeqCst);
        self.inner.score(hypothesis)
    }
}

#[test]
fn test_selection_only_run_scores_each_bitstring_once() {
    // Without crossover or mutation no new bitstrings ever appear.
    let config = RunConfiguration::builder()
        .population_size(20)
        .num_generations(10)
        .crossover_rate(0.0)
        .mutation_rate(0.0)
        .seed(31)
        .build();

    let oracle = CostlyOracle::new();
    let cached = oracle.with_global_cache();
    let mut engine =
        GeneticEngine::new(config, cached.clone(), RouletteWheelSelection::new(), NullSink)
            .unwrap();

    let distinct: HashSet<Hypothesis> = engine.population().iter().cloned().collect();
    engine.run().unwrap();

    assert_eq!(oracle.get_evaluations(), distinct.len());
    assert_eq!(cached.cache_size(), distinct.len());
}

#[test]
fn test_cached_run_matches_uncached_run() {
    let config = RunConfiguration::builder()
        .population_size(24)
        .num_generations(40)
        .elitist(true)
        .seed(12)
        .build();

    let mut plain_sink = MemorySink::new();
    GeneticEngine::new(
        config.clone(),
        TargetOracle::default(),
        RouletteWheelSelection::new(),
        &mut plain_sink,
    )
    .unwrap()
    .run()
    .unwrap();

    let oracle = CostlyOracle::new();
    let mut cached_sink = MemorySink::new();
    GeneticEngine::new(
        config,
        oracle.with_global_cache(),
        RouletteWheelSelection::new(),
        &mut cached_sink,
    )
    .unwrap()
    .run()
    .unwrap();

    assert_eq!(plain_sink.stats(), cached_sink.stats());
    assert!(oracle.get_evaluations() < 24 * 40);
}

#[test]
fn test_thread_local_cache_with_parallel_evaluation() {
    let config = RunConfiguration::builder()
        .population_size(64)
        .num_generations(15)
        .parallel_threshold(1)
        .seed(3)
        .build();

    let mut plain_sink = MemorySink::new();
    GeneticEngine::new(
        config.clone(),
        TargetOracle::default(),
        RouletteWheelSelection::new(),
        &mut plain_sink,
    )
    .unwrap()
    .run()
    .unwrap();

    let oracle = CostlyOracle::new();
    let mut cached_sink = MemorySink::new();
    GeneticEngine::new(
        config,
        oracle.with_thread_local_cache(),
        RouletteWheelSelection::new(),
        &mut cached_sink,
    )
    .unwrap()
    .run()
    .unwrap();

    assert_eq!(plain_sink.stats(), cached_sink.stats());
    assert!(oracle.get_evaluations() <= 64 * 15);
}
