use asynclog::{
    config::{Config, DEFAULT_SETTINGS_PATH},
    log::{LogLevel, Logger},
};
use std::{process::ExitCode, time::Instant};

const ITERATIONS: usize = 1_000;

fn main() -> ExitCode {
    let config = Config::load_or_empty(DEFAULT_SETTINGS_PATH);
    let logger = match Logger::from_config(&config) {
        Ok(logger) => logger,
        Err(e) => {
            eprintln!("asynclog: {e}");
            return ExitCode::FAILURE;
        }
    };

    let start = Instant::now();
    for i in 0..ITERATIONS {
        logger.log(LogLevel::Info, format!("Logging iteration {i}"));
    }
    let elapsed = start.elapsed();

    logger.log(LogLevel::Error, "Error !");
    logger.stop();

    println!(
        "\nEnqueued {ITERATIONS} records in {} microseconds",
        elapsed.as_micros()
    );
    ExitCode::SUCCESS
}
