use crate::error::GentourError;
use log::warn;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fs::File;
use std::io::BufReader;

// Field definitions and associated default values

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Param {
    #[serde(default)]
    pub general: General,
    #[serde(default)]
    pub data: Data,
    #[serde(default)]
    pub ga: GA,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct General {
    #[serde(default = "seed_default")]
    pub seed: u64,
    #[serde(default = "log_base_default")]
    pub log_base: String,
    #[serde(default = "log_suffix_default")]
    pub log_suffix: String,
    #[serde(default = "log_level_default")]
    pub log_level: String,
    #[serde(default = "empty_string")]
    pub save_result: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Data {
    #[serde(default = "empty_string")]
    pub coordinates: String,
    #[serde(default = "empty_string")]
    pub names: String,
    #[serde(default = "empty_string")]
    pub start_location: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct GA {
    #[serde(default = "pop_size_default")]
    pub population_size: u32,
    #[serde(default = "max_generations_default")]
    pub max_generations: usize,
    #[serde(default = "uzero_default")]
    pub min_generations: usize,
    #[serde(default = "mutation_rate_default")]
    pub mutation_rate: f64,
    #[serde(default = "elite_fraction_default")]
    pub elite_fraction: f64,
    #[serde(default = "report_interval_default")]
    pub report_interval: usize,
    #[serde(default = "uzero_default")]
    pub max_stagnation: usize,
}

// Default section definitions

impl Default for General {
    fn default() -> Self {
        serde_json::from_value(serde_json::json!({})).unwrap()
    }
}

impl Default for Data {
    fn default() -> Self {
        serde_json::from_value(serde_json::json!({})).unwrap()
    }
}

impl Default for GA {
    fn default() -> Self {
        serde_json::from_value(serde_json::json!({})).unwrap()
    }
}

impl Default for Param {
    fn default() -> Self {
        serde_json::from_value(serde_json::json!({})).unwrap()
    }
}

impl Param {
    pub fn new() -> Self {
        Self::default()
    }
}

pub fn get(param_file: String) -> Result<Param, Box<dyn Error>> {
    let param_file_reader = File::open(param_file)?;
    let param_reader = BufReader::new(param_file_reader);

    let config: Param = serde_yaml::from_reader(param_reader)?;

    validate(&config)?;

    Ok(config)
}

/// Checks every numeric option against its declared valid range.
/// Malformed configuration is fatal at start-up, never recovered mid-run.
pub fn validate(param: &Param) -> Result<(), GentourError> {
    if param.ga.population_size == 0 {
        return Err(GentourError::InvalidConfiguration(
            "Invalid population_size=0. Must be > 0.".to_string(),
        ));
    }

    if !(0.0..=1.0).contains(&param.ga.mutation_rate) {
        return Err(GentourError::InvalidConfiguration(format!(
            "Invalid mutation_rate={:.3}. Must be in range [0, 1].",
            param.ga.mutation_rate
        )));
    }

    if param.ga.elite_fraction <= 0.0 || param.ga.elite_fraction >= 1.0 {
        return Err(GentourError::InvalidConfiguration(format!(
            "Invalid elite_fraction={:.3}. Must be in range (0, 1).",
            param.ga.elite_fraction
        )));
    }

    if param.ga.report_interval == 0 {
        return Err(GentourError::InvalidConfiguration(
            "Invalid report_interval=0. Must be > 0.".to_string(),
        ));
    }

    if param.data.coordinates.is_empty() || param.data.names.is_empty() {
        return Err(GentourError::InvalidConfiguration(
            "Both data.coordinates and data.names must be provided.".to_string(),
        ));
    }

    if param.data.start_location.is_empty() {
        return Err(GentourError::InvalidConfiguration(
            "data.start_location must be set to a location name from the dataset.".to_string(),
        ));
    }

    if param.ga.mutation_rate == 0.0 {
        warn!("mutation_rate=0: the search relies on crossover alone and may stall on local optima.");
    }

    if param.ga.max_stagnation > 0 && param.ga.min_generations >= param.ga.max_generations {
        warn!(
            "min_generations={} >= max_generations={}: the stagnation early-stop will never trigger.",
            param.ga.min_generations, param.ga.max_generations
        );
    }

    Ok(())
}

// Default value definitions

fn seed_default() -> u64 {
    4815162342
}
fn empty_string() -> String {
    "".to_string()
}
fn log_base_default() -> String {
    "".to_string()
}
fn log_suffix_default() -> String {
    "log".to_string()
}
fn log_level_default() -> String {
    "info".to_string()
}
fn pop_size_default() -> u32 {
    2000
}
fn max_generations_default() -> usize {
    50000
}
fn mutation_rate_default() -> f64 {
    0.5
}
fn elite_fraction_default() -> f64 {
    0.1
}
fn report_interval_default() -> usize {
    100
}
fn uzero_default() -> usize {
    0
}
