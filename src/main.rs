use flexi_logger::{FileSpec, Logger, WriteMode};
use gentour::param;
use gentour::run;
use log::{error, info};
use signal_hook::consts::{SIGINT, SIGTERM};
use signal_hook::iterator::Signals;
use std::env;
use std::error::Error;
use std::process;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;

fn main() {
    let param_file = env::args().nth(1).unwrap_or_else(|| "param.yaml".to_string());

    let param = match param::get(param_file.clone()) {
        Ok(param) => param,
        Err(e) => {
            eprintln!("Cannot load parameter file [{}]: {}", param_file, e);
            process::exit(1);
        }
    };

    let _logger = match setup_logger(&param) {
        Ok(logger) => logger,
        Err(e) => {
            eprintln!("Cannot initialize logger: {}", e);
            process::exit(1);
        }
    };

    info!("Parameters loaded from {}", param_file);

    // Flipped to false on SIGINT/SIGTERM; the search stops at the end of the
    // current generation and the final report is still produced.
    let running = Arc::new(AtomicBool::new(true));
    let running_signals = running.clone();

    let mut signals = match Signals::new([SIGINT, SIGTERM]) {
        Ok(signals) => signals,
        Err(e) => {
            error!("Cannot install signal handler: {}", e);
            process::exit(1);
        }
    };
    thread::spawn(move || {
        for signal in signals.forever() {
            info!("Received signal {}, finishing current generation...", signal);
            running_signals.store(false, Ordering::Relaxed);
        }
    });

    match run(&param, running) {
        Ok(result) => {
            info!(
                "Done: best distance {:.3} after {} generations",
                result.population.individuals[0].total_distance(),
                result.generations
            );
        }
        Err(e) => {
            error!("Run failed: {}", e);
            process::exit(1);
        }
    }
}

fn setup_logger(param: &gentour::param::Param) -> Result<flexi_logger::LoggerHandle, Box<dyn Error>> {
    let logger = Logger::try_with_str(&param.general.log_level)?;

    let handle = if param.general.log_base.is_empty() {
        logger.log_to_stderr().start()?
    } else {
        logger
            .log_to_file(
                FileSpec::default()
                    .basename(&param.general.log_base)
                    .suffix(&param.general.log_suffix),
            )
            .duplicate_to_stderr(flexi_logger::Duplicate::Info)
            .write_mode(WriteMode::BufferAndFlush)
            .start()?
    };

    Ok(handle)
}
