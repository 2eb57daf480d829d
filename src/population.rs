use crate::data::Field;
use crate::individual::Individual;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// Ranked collection of candidate tours. Kept sorted by descending fitness
/// after every modification; the size is fixed across generations by
/// truncation after sorting.
#[derive(Clone, Serialize, Deserialize, PartialEq)]
pub struct Population {
    pub individuals: Vec<Individual>,
}

impl Population {
    pub fn new() -> Population {
        Population {
            individuals: Vec::new(),
        }
    }

    /// populate the population with a set of random tours
    pub fn generate(&mut self, population_size: u32, field: &Field, rng: &mut ChaCha8Rng) {
        for _ in 0..population_size {
            self.individuals.push(Individual::random(field, rng));
        }
    }

    /// score every individual against the field
    pub fn fit(&mut self, field: &Field) {
        for individual in self.individuals.iter_mut() {
            individual.fit = individual.evaluate(field);
        }
    }

    pub fn sort(mut self) -> Self {
        self.individuals.sort_by(|i, j| j.fit.partial_cmp(&i.fit).unwrap());
        self
    }

    /// select the elite of a (sorted) population: the top
    /// `ceil(len * elite_fraction)` individuals, carried over unchanged
    pub fn select_elite(&self, elite_fraction: f64) -> (Population, usize) {
        let n = (self.individuals.len() as f64 * elite_fraction).ceil() as usize;

        (
            Population {
                individuals: self.individuals.iter().take(n).cloned().collect(),
            },
            n,
        )
    }

    /// add some individuals in the population
    pub fn add(&mut self, population: Population) {
        self.individuals.extend(population.individuals);
    }

    /// keep exactly the first `population_size` entries of a sorted population
    pub fn truncate(&mut self, population_size: usize) {
        self.individuals.truncate(population_size);
    }

    pub fn best(&self) -> Option<&Individual> {
        self.individuals.first()
    }
}
