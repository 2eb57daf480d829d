pub mod data;
pub mod error;
pub mod ga;
pub mod individual;
pub mod param;
pub mod population;
pub mod utils;

use crate::data::Field;
use crate::ga::{ga, GaResult, LogReporter};
use crate::param::Param;
use chrono::Local;
use log::info;
use serde::Serialize;
use std::error::Error;
use std::fs::File;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

/// Result artifact written to `general.save_result` when set
#[derive(Serialize)]
struct RouteSummary {
    version: String,
    timestamp: String,
    seed: u64,
    generations: usize,
    distance: f64,
    route: Vec<String>,
    best_by_generation: Vec<f64>,
}

pub fn version() -> String {
    match option_env!("GENTOUR_GIT_SHA") {
        Some(sha) if !sha.is_empty() => format!("{} ({})", env!("CARGO_PKG_VERSION"), sha),
        _ => env!("CARGO_PKG_VERSION").to_string(),
    }
}

/// Load the dataset named by `param`, run the genetic search and return the
/// result. `running` can be flipped to false from another thread to stop the
/// search at the end of the current generation.
pub fn run(param: &Param, running: Arc<AtomicBool>) -> Result<GaResult, Box<dyn Error>> {
    info!("gentour v{}", version());
    info!("Start time: {}", Local::now().format("%Y-%m-%d %H:%M:%S"));

    let mut field = Field::new();
    field.load_data(&param.data.coordinates, &param.data.names)?;
    field.set_start(&param.data.start_location)?;
    info!("{:?}", field);

    let mut reporter = LogReporter { field: &field };
    let result = ga(&field, param, &mut reporter, running);

    if !param.general.save_result.is_empty() {
        save_result(&param.general.save_result, param, &field, &result)?;
        info!("Result saved to {}", param.general.save_result);
    }

    Ok(result)
}

fn save_result(
    path: &str,
    param: &Param,
    field: &Field,
    result: &GaResult,
) -> Result<(), Box<dyn Error>> {
    let best = &result.population.individuals[0];

    let mut route: Vec<String> = Vec::with_capacity(field.point_len + 1);
    route.push(field.names[field.start].clone());
    for &index in &best.chromosome {
        route.push(field.names[index].clone());
    }
    route.push(field.names[field.start].clone());

    let summary = RouteSummary {
        version: version(),
        timestamp: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
        seed: param.general.seed,
        generations: result.generations,
        distance: best.total_distance(),
        route,
        best_by_generation: result.best_by_generation.clone(),
    };

    let file = File::create(path)?;
    serde_json::to_writer_pretty(file, &summary)?;
    Ok(())
}
