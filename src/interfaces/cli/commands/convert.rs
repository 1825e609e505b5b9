//! `iplocate convert`

use std::time::Duration;

use colored::Colorize;

use crate::config::get_config;
use crate::ingest::{ConvertOptions, run_conversion};
use crate::interfaces::cli::CliError;

pub async fn run_convert(
    input: Option<String>,
    output: Option<String>,
    level: Option<u32>,
) -> Result<(), CliError> {
    let config = get_config();
    let mut options = ConvertOptions::from(&config.convert);
    if let Some(input) = input {
        options.input_path = input.into();
    }
    if let Some(output) = output {
        options.output_path = output.into();
    }
    if let Some(level) = level {
        options.compression_level = level;
    }

    let output_path = options.output_path.display().to_string();
    let stats = run_conversion(
        options,
        Duration::from_secs(config.convert.progress_interval_secs),
    )
    .await?;

    println!(
        "{} {}",
        "Converted dataset written to".green(),
        output_path.blue()
    );
    println!(
        "  read: {}  written: {}  skipped: {}  ({:.1}s)",
        stats.read.to_string().cyan(),
        stats.written.to_string().green(),
        stats.skipped.to_string().yellow(),
        stats.elapsed.as_secs_f64()
    );
    Ok(())
}
