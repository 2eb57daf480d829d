use gentour::data::Field;
use gentour::ga::{ga, Reporter};
use gentour::individual::Individual;
use gentour::param::Param;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

/// Four corners of a 10x10 square. The optimal closed tour is the
/// perimeter: distance 40, fitness -40.
fn create_square_field() -> Field {
    Field {
        points: vec![(0.0, 0.0), (0.0, 10.0), (10.0, 10.0), (10.0, 0.0)],
        names: vec![
            "A".to_string(),
            "B".to_string(),
            "C".to_string(),
            "D".to_string(),
        ],
        start: 0,
        point_len: 4,
    }
}

fn create_square_params() -> Param {
    let mut param = Param::default();
    param.general.seed = 42;
    param.ga.population_size = 50;
    param.ga.max_generations = 200;
    param.ga.mutation_rate = 0.3;
    param.ga.elite_fraction = 0.1;
    param.ga.report_interval = 100;
    param
}

#[derive(Default)]
struct CountingReporter {
    progress_calls: Vec<usize>,
    finished_calls: usize,
    final_trace_len: usize,
}

impl Reporter for CountingReporter {
    fn progress(&mut self, generation: usize, _best: &Individual) {
        self.progress_calls.push(generation);
    }

    fn finished(&mut self, _best: &Individual, best_by_generation: &[f64]) {
        self.finished_calls += 1;
        self.final_trace_len = best_by_generation.len();
    }
}

#[test]
fn test_square_converges_to_perimeter() {
    let field = create_square_field();
    let param = create_square_params();

    let result = ga(
        &field,
        &param,
        &mut CountingReporter::default(),
        Arc::new(AtomicBool::new(true)),
    );

    let best = &result.population.individuals[0];
    assert_eq!(best.fit, -40.0, "best tour must be the square perimeter");
    assert_eq!(best.total_distance(), 40.0);
    assert!(best.is_valid(&field));
}

#[test]
fn test_best_fitness_is_monotonic() {
    let field = create_square_field();
    let param = create_square_params();

    let result = ga(
        &field,
        &param,
        &mut CountingReporter::default(),
        Arc::new(AtomicBool::new(true)),
    );

    assert_eq!(result.best_by_generation.len(), 200);
    for pair in result.best_by_generation.windows(2) {
        assert!(pair[1] >= pair[0], "best fitness regressed: {:?}", pair);
    }
}

#[test]
fn test_runs_are_reproducible() {
    let field = create_square_field();
    let param = create_square_params();

    let result1 = ga(
        &field,
        &param,
        &mut CountingReporter::default(),
        Arc::new(AtomicBool::new(true)),
    );
    let result2 = ga(
        &field,
        &param,
        &mut CountingReporter::default(),
        Arc::new(AtomicBool::new(true)),
    );

    assert_eq!(result1.best_by_generation, result2.best_by_generation);
    assert_eq!(
        result1.population.individuals[0].chromosome,
        result2.population.individuals[0].chromosome
    );
}

#[test]
fn test_reporter_cadence() {
    let field = create_square_field();
    let param = create_square_params();

    let mut reporter = CountingReporter::default();
    let result = ga(
        &field,
        &param,
        &mut reporter,
        Arc::new(AtomicBool::new(true)),
    );

    // 200 generations, report_interval 100: generations 100 and 200
    assert_eq!(reporter.progress_calls, vec![100, 200]);
    assert_eq!(reporter.finished_calls, 1);
    assert_eq!(reporter.final_trace_len, result.generations);
    assert_eq!(result.generations, 200);
}

#[test]
fn test_population_stays_sized_and_valid() {
    let field = create_square_field();
    let param = create_square_params();

    let result = ga(
        &field,
        &param,
        &mut CountingReporter::default(),
        Arc::new(AtomicBool::new(true)),
    );

    assert_eq!(result.population.individuals.len(), 50);
    for individual in &result.population.individuals {
        assert!(individual.is_valid(&field));
    }
}

#[test]
fn test_stagnation_stops_early() {
    let field = create_square_field();
    let mut param = create_square_params();
    param.ga.max_generations = 10000;
    param.ga.max_stagnation = 20;

    let result = ga(
        &field,
        &param,
        &mut CountingReporter::default(),
        Arc::new(AtomicBool::new(true)),
    );

    assert!(result.generations < 10000);
    assert_eq!(result.population.individuals[0].fit, -40.0);
}

#[test]
fn test_cleared_running_flag_stops_after_one_generation() {
    let field = create_square_field();
    let param = create_square_params();

    let result = ga(
        &field,
        &param,
        &mut CountingReporter::default(),
        Arc::new(AtomicBool::new(false)),
    );

    assert_eq!(result.generations, 1);
    assert_eq!(result.best_by_generation.len(), 1);
    assert_eq!(result.population.individuals.len(), 50);
}
