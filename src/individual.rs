use crate::data::Field;
use rand::seq::SliceRandom;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Candidate tour: a permutation of every location index except the fixed
/// start, which is implicit at both ends of the closed route.
#[derive(Clone, Serialize, Deserialize, PartialEq)]
pub struct Individual {
    /// Ordering of the non-start location indices
    pub chromosome: Vec<usize>,
    /// Fitness: negated total closed-route distance, higher is better
    pub fit: f64,
    /// Generation that produced this tour
    pub generation: usize,
}

impl Individual {
    /// Generates a new empty Individual with default values
    pub fn new() -> Individual {
        Individual {
            chromosome: Vec::new(),
            fit: 0.0,
            generation: 0,
        }
    }

    /// Uniform random tour over the non-start indices of `field`
    pub fn random(field: &Field, rng: &mut ChaCha8Rng) -> Individual {
        let mut chromosome = field.tour_indices();
        chromosome.shuffle(rng);
        Individual {
            chromosome,
            fit: 0.0,
            generation: 0,
        }
    }

    /// Fitness of the closed route `start -> chromosome -> start`: the total
    /// straight-line distance, negated so that maximizing fitness minimizes
    /// distance. A zero-length route scores exactly 0, never -0.
    ///
    /// Pure function: does not touch `self.fit`.
    pub fn evaluate(&self, field: &Field) -> f64 {
        let mut total = 0.0;
        let mut previous = field.start;
        for &stop in &self.chromosome {
            total += field.distance(previous, stop);
            previous = stop;
        }
        total += field.distance(previous, field.start);

        if total == 0.0 {
            0.0
        } else {
            -total
        }
    }

    /// Total distance of the closed route, for display
    pub fn total_distance(&self) -> f64 {
        -self.fit
    }

    /// Checks the permutation invariant against the dataset: every non-start
    /// index exactly once, the start index never inside the chromosome.
    pub fn is_valid(&self, field: &Field) -> bool {
        if self.chromosome.len() != field.chromosome_size() {
            return false;
        }
        let mut seen = vec![false; field.point_len];
        for &index in &self.chromosome {
            if index >= field.point_len || index == field.start || seen[index] {
                return false;
            }
            seen[index] = true;
        }
        true
    }

    /// Numbered list of the stops of the closed route, start at both ends
    pub fn display(&self, field: &Field) -> String {
        let mut str = format!("Distance {:.3}\n", self.total_distance());
        let mut counter = 1;

        str = format!("{}{:2}. {}\n", str, counter, field.names[field.start]);
        counter += 1;

        for &index in &self.chromosome {
            str = format!("{}{:2}. {}\n", str, counter, field.names[index]);
            counter += 1;
        }

        format!("{}{:2}. {}", str, counter, field.names[field.start])
    }
}

impl fmt::Debug for Individual {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Individual [gen {}] fit {:.4}: {:?}",
            self.generation, self.fit, self.chromosome
        )
    }
}
