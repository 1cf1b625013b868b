use criterion::{black_box, criterion_group, criterion_main, Criterion};
use bitga::{
    crossover::{CrossoverOperator, MaskPolicy},
    evolution::{GeneticEngine, NullSink, RunConfiguration},
    fitness::TargetOracle,
    hypothesis::Hypothesis,
    population::FitnessRecord,
    rng::RandomNumberGenerator,
    selection::{RetryRouletteSelection, RouletteWheelSelection, SelectionStrategy},
};

fn bench_generation(c: &mut Criterion) {
    let mut group = c.benchmark_group("generation");
    for size in [20, 200, 2000].iter() {
        group.bench_function(&format!("step_{}", size), |b| {
            let config = RunConfiguration::builder()
                .population_size(*size)
                .elitist(true)
                .seed(1)
                .build();
            let mut engine = GeneticEngine::new(
                config,
                TargetOracle::default(),
                RouletteWheelSelection::new(),
                NullSink,
            )
            .unwrap();

            b.iter(|| black_box(engine.step().unwrap()))
        });
    }
    group.finish();
}

fn bench_selection(c: &mut Criterion) {
    let mut rng = RandomNumberGenerator::from_seed(3);
    let scores = (0..200).map(|i| (i % 17) as i64 + 40).collect();
    let record = FitnessRecord::from_scores(scores).unwrap();

    let mut group = c.benchmark_group("selection");
    group.bench_function("roulette_wheel", |b| {
        let strategy = RouletteWheelSelection::new();
        b.iter(|| strategy.select(black_box(&record), &mut rng).unwrap())
    });
    group.bench_function("retry_roulette", |b| {
        let strategy = RetryRouletteSelection::new();
        b.iter(|| strategy.select(black_box(&record), &mut rng).unwrap())
    });
    group.finish();
}

fn bench_crossover(c: &mut Criterion) {
    let mut rng = RandomNumberGenerator::from_seed(9);
    let h1 = Hypothesis::random(42, &mut rng);
    let h2 = Hypothesis::random(42, &mut rng);

    let mut group = c.benchmark_group("crossover");
    for policy in [MaskPolicy::Retained, MaskPolicy::FreshPerCall] {
        let mut operator = CrossoverOperator::new(42, policy, &mut rng);
        group.bench_function(&format!("{:?}", policy), |b| {
            b.iter(|| {
                operator
                    .recombine_next(black_box(&h1), black_box(&h2), &mut rng)
                    .unwrap()
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_generation, bench_selection, bench_crossover);
criterion_main!(benches);
