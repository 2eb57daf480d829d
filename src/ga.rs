use crate::data::Field;
use crate::individual::Individual;
use crate::param::Param;
use crate::population::Population;
use crate::utils::{display_generation, display_route};
use log::{debug, info};
use rand::prelude::SliceRandom;
use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

//-----------------------------------------------------------------------------
// Genetic search core functions
//-----------------------------------------------------------------------------

/// Consumer of periodic progress and of the terminal result. This is the only
/// output surface the search exposes to rendering or printing collaborators.
pub trait Reporter {
    /// Called every `report_interval` generations with the current best tour
    fn progress(&mut self, generation: usize, best: &Individual);
    /// Called once at termination with the final best tour and the full
    /// best-per-generation fitness trace
    fn finished(&mut self, best: &Individual, best_by_generation: &[f64]);
}

/// Reporter that writes route summaries to the log
pub struct LogReporter<'a> {
    pub field: &'a Field,
}

impl Reporter for LogReporter<'_> {
    fn progress(&mut self, generation: usize, best: &Individual) {
        info!("{}", display_generation(generation, best));
    }

    fn finished(&mut self, best: &Individual, best_by_generation: &[f64]) {
        info!("Final route in {} generations", best_by_generation.len());
        info!("\n{}", display_route(best, self.field));
    }
}

/// Outcome of a run: the final ranked population plus the convergence trace
#[derive(Clone)]
pub struct GaResult {
    pub population: Population,
    /// Best fitness of each generation, in order
    pub best_by_generation: Vec<f64>,
    pub generations: usize,
}

/// Main function to run the genetic tour search
///
/// # Arguments
///
/// * `field` - The locations to tour, with their fixed start.
/// * `param` - Parameters for the genetic algorithm.
/// * `reporter` - Consumer of periodic progress and the terminal result.
/// * `running` - Atomic boolean to control the running state of the algorithm.
///
/// # Returns
///
/// The final population together with the best-per-generation fitness trace.
pub fn ga(
    field: &Field,
    param: &Param,
    reporter: &mut dyn Reporter,
    running: Arc<AtomicBool>,
) -> GaResult {
    let time = Instant::now();

    let mut rng = ChaCha8Rng::seed_from_u64(param.general.seed);

    let mut pop = generate_pop(field, param, &mut rng);

    info!(
        "Population size: {}, chromosome size: {}",
        pop.individuals.len(),
        field.chromosome_size()
    );

    let mut generation: usize = 0;
    let mut best_by_generation: Vec<f64> = Vec::new();
    let mut last_best_fit = f64::NEG_INFINITY;
    let mut stagnation: usize = 0;

    // Evolve!
    loop {
        generation += 1;

        pop = evolve(pop, field, param, generation, &mut rng);

        let best_fit = pop.individuals[0].fit;
        best_by_generation.push(best_fit);

        if generation % param.ga.report_interval == 0 {
            reporter.progress(generation, &pop.individuals[0]);
        }

        if best_fit == last_best_fit {
            stagnation += 1;
        } else {
            stagnation = 0;
        }
        last_best_fit = best_fit;

        // Stop criteria
        let mut need_to_break = false;

        if generation >= param.ga.max_generations {
            info!("Reached max generations");
            need_to_break = true;
        }

        if param.ga.max_stagnation > 0
            && generation >= param.ga.min_generations
            && stagnation >= param.ga.max_stagnation
        {
            info!("Best tour unchanged for {} generations, stopping early", stagnation);
            need_to_break = true;
        }

        if !running.load(Ordering::Relaxed) {
            info!("Signal received");
            need_to_break = true;
        }

        if need_to_break {
            break;
        }
    }

    let elapsed = time.elapsed();
    info!(
        "Genetic search computed {} generations in {:.2?}",
        generation, elapsed
    );

    reporter.finished(&pop.individuals[0], &best_by_generation);

    GaResult {
        population: pop,
        best_by_generation,
        generations: generation,
    }
}

/// Generate the initial population: random tours, scored and ranked
pub fn generate_pop(field: &Field, param: &Param, rng: &mut ChaCha8Rng) -> Population {
    debug!("generating initial population...");
    let mut pop = Population::new();
    pop.generate(param.ga.population_size, field, rng);
    pop.fit(field);
    pop.sort()
}

/// Run one evolution step: elite carry-over, selection, cross-over, mutation,
/// scoring, replacement
///
/// # Arguments
///
/// * `pop` - The current population, sorted by descending fitness.
/// * `field` - The locations to tour.
/// * `param` - Parameters for the genetic algorithm.
/// * `generation` - The current generation number, stamped on new children.
/// * `rng` - Random number generator.
///
/// # Returns
///
/// A new sorted population of exactly `population_size` individuals.
#[inline]
pub fn evolve(
    pop: Population,
    field: &Field,
    param: &Param,
    generation: usize,
    rng: &mut ChaCha8Rng,
) -> Population {
    let target_size = param.ga.population_size as usize;

    // Elite survivors are carried over unchanged and are the only breeding pool
    let (mut new_pop, n) = pop.select_elite(param.ga.elite_fraction);
    debug!("{} elite individuals carried over", n);

    let universe = field.tour_indices();

    let mut children = Population::new();
    while new_pop.individuals.len() + children.individuals.len() < target_size {
        let parent1 = new_pop
            .individuals
            .choose(rng)
            .expect("elite pool is never empty for a valid configuration");
        let parent2 = new_pop
            .individuals
            .choose(rng)
            .expect("elite pool is never empty for a valid configuration");

        let (mut child1, mut child2) = cross_over(parent1, parent2, &universe, rng);

        if rng.gen::<f64>() < param.ga.mutation_rate {
            mutate(&mut child1, rng);
        }
        if rng.gen::<f64>() < param.ga.mutation_rate {
            mutate(&mut child2, rng);
        }

        child1.generation = generation;
        child2.generation = generation;
        children.individuals.push(child1);
        children.individuals.push(child2);
    }

    children.fit(field);
    new_pop.add(children);

    // Breeding in pairs can overshoot by one; sort then keep exactly target_size
    let mut new_pop = new_pop.sort();
    new_pop.truncate(target_size);
    new_pop
}

/// Combine two parent tours into two children
///
/// Each child is seeded with one of four segments chosen at random (first or
/// second half of either parent); the remaining positions are filled with the
/// missing indices of the chromosome universe in shuffled order, which keeps
/// the permutation invariant whichever segment was chosen.
///
/// # Arguments
///
/// * `parent1` - First parent tour.
/// * `parent2` - Second parent tour.
/// * `universe` - The non-start indices a valid chromosome permutes.
/// * `rng` - Random number generator.
///
/// # Returns
///
/// Exactly two children, each a valid permutation of `universe`.
pub fn cross_over(
    parent1: &Individual,
    parent2: &Individual,
    universe: &[usize],
    rng: &mut ChaCha8Rng,
) -> (Individual, Individual) {
    let child1 = seed_and_fill(parent1, parent2, universe, rng);
    let child2 = seed_and_fill(parent1, parent2, universe, rng);
    (child1, child2)
}

fn seed_and_fill(
    parent1: &Individual,
    parent2: &Individual,
    universe: &[usize],
    rng: &mut ChaCha8Rng,
) -> Individual {
    let half = universe.len() / 2;

    let selection: u8 = rng.gen_range(0..4);
    let mut chromosome: Vec<usize> = match selection {
        0 => parent1.chromosome[..half].to_vec(),
        1 => parent1.chromosome[half..].to_vec(),
        2 => parent2.chromosome[..half].to_vec(),
        _ => parent2.chromosome[half..].to_vec(),
    };

    let present: HashSet<usize> = chromosome.iter().copied().collect();
    let mut filler: Vec<usize> = universe
        .iter()
        .copied()
        .filter(|index| !present.contains(index))
        .collect();
    filler.shuffle(rng);
    chromosome.extend(filler);

    Individual {
        chromosome,
        fit: 0.0,
        generation: 0,
    }
}

/// Swap the values at two positions chosen uniformly over the whole
/// chromosome. The positions may coincide, leaving the tour unchanged.
pub fn mutate(child: &mut Individual, rng: &mut ChaCha8Rng) {
    if child.chromosome.len() < 2 {
        return;
    }
    let a = rng.gen_range(0..child.chromosome.len());
    let b = rng.gen_range(0..child.chromosome.len());
    child.chromosome.swap(a, b);
}
