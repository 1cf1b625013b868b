use bitga::{
    crossover::{CrossoverMask, CrossoverOperator, MaskPolicy},
    error::GeneticError,
    hypothesis::Hypothesis,
    population::FitnessRecord,
    rng::RandomNumberGenerator,
    selection::{
        RetryRouletteSelection, RouletteWheelSelection, SelectionStrategy, UniformSelection,
    },
};

fn counts<S: SelectionStrategy>(strategy: &S, record: &FitnessRecord, draws: usize) -> Vec<usize> {
    let mut rng = RandomNumberGenerator::from_seed(1234);
    let mut counts = vec![0; record.len()];
    for index in strategy.select_many(record, draws, &mut rng).unwrap() {
        counts[index] += 1;
    }
    counts
}

#[test]
fn test_children_follow_the_mask() {
    let mut rng = RandomNumberGenerator::from_seed(17);

    for _ in 0..50 {
        let h1 = Hypothesis::random(42, &mut rng);
        let h2 = Hypothesis::random(42, &mut rng);
        let operator = CrossoverOperator::new(42, MaskPolicy::Retained, &mut rng);
        let (c1, c2) = operator.recombine(&h1, &h2).unwrap();

        for (i, &take_first) in operator.mask().bits().iter().enumerate() {
            let (a, b) = if take_first { (&h1, &h2) } else { (&h2, &h1) };
            assert_eq!(c1.bit(i), a.bit(i));
            assert_eq!(c2.bit(i), b.bit(i));
        }
    }
}

#[test]
fn test_documented_crossover_example() {
    let operator = CrossoverOperator::with_mask("1100".parse::<CrossoverMask>().unwrap());
    let h1: Hypothesis = "1010".parse().unwrap();
    let h2: Hypothesis = "0101".parse().unwrap();

    let (c1, c2) = operator.recombine(&h1, &h2).unwrap();
    assert_eq!(c1.to_string(), "1001");
    assert_eq!(c2.to_string(), "0110");
}

#[test]
fn test_crossover_rejects_mismatched_parents() {
    let operator = CrossoverOperator::with_mask(CrossoverMask::fixed(vec![true, false, true]));
    let h1: Hypothesis = "101".parse().unwrap();
    let h2: Hypothesis = "1010".parse().unwrap();

    assert!(matches!(
        operator.recombine(&h1, &h2),
        Err(GeneticError::LengthMismatch { .. })
    ));
}

#[test]
fn test_mutation_flips_exactly_one_bit() {
    let mut rng = RandomNumberGenerator::from_seed(5);
    let original = Hypothesis::random(42, &mut rng);

    for _ in 0..100 {
        let mut mutated = original.clone();
        mutated.mutate(&mut rng);
        let flipped = original
            .bits()
            .iter()
            .zip(mutated.bits())
            .filter(|(a, b)| a != b)
            .count();
        assert_eq!(flipped, 1);
    }
}

#[test]
fn test_equal_fitness_selects_uniformly() {
    let record = FitnessRecord::from_scores(vec![50, 50, 50, 50]).unwrap();
    for count in counts(&RouletteWheelSelection::new(), &record, 10_000) {
        assert!((2000..=3000).contains(&count), "count {} out of range", count);
    }
}

#[test]
fn test_selection_is_proportional_to_fitness() {
    let record = FitnessRecord::from_scores(vec![10, 30, 60]).unwrap();
    let counts = counts(&RouletteWheelSelection::new(), &record, 20_000);

    assert!((1600..=2400).contains(&counts[0]));
    assert!((5400..=6600).contains(&counts[1]));
    assert!((11_200..=12_800).contains(&counts[2]));
}

#[test]
fn test_zero_fitness_is_never_selected() {
    let record = FitnessRecord::from_scores(vec![0, 40, -3, 40]).unwrap();

    for strategy in [
        &RouletteWheelSelection::new() as &dyn SelectionStrategy,
        &RetryRouletteSelection::new(),
    ] {
        let mut rng = RandomNumberGenerator::from_seed(8);
        for index in strategy.select_many(&record, 2000, &mut rng).unwrap() {
            assert!(index == 1 || index == 3);
        }
    }
}

#[test]
fn test_retry_selection_with_single_candidate() {
    let record = FitnessRecord::from_scores(vec![0, 0, 7, 0]).unwrap();
    let counts = counts(&RetryRouletteSelection::with_max_attempts(3), &record, 500);
    assert_eq!(counts, vec![0, 0, 500, 0]);
}

#[test]
fn test_degenerate_record_is_rejected_by_roulette() {
    let record = FitnessRecord::from_scores(vec![0, -1, 0]).unwrap();
    let mut rng = RandomNumberGenerator::from_seed(1);

    assert!(record.is_degenerate());
    assert!(matches!(
        RouletteWheelSelection::new().select(&record, &mut rng),
        Err(GeneticError::DegenerateSelection { total: 0 })
    ));

    let index = UniformSelection::new().select(&record, &mut rng).unwrap();
    assert!(index < 3);
}
