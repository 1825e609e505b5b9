//! `iplocate seed`

use colored::Colorize;

use crate::config::get_config;
use crate::interfaces::cli::CliError;
use crate::runtime::lifetime::startup::prepare_storage;
use crate::services::{SeedLoader, SeedOptions, SeedOutcome};

pub async fn run_seed(
    file: Option<String>,
    name: Option<String>,
    batch_size: Option<usize>,
) -> Result<(), CliError> {
    let config = get_config();
    let mut options = SeedOptions::from(&config.seed);
    if let Some(file) = file {
        options.file_path = file.into();
    }
    if let Some(name) = name {
        options.name = name;
    }
    if let Some(batch_size) = batch_size {
        options.batch_size = batch_size;
    }

    let store = prepare_storage(&config.database).await?;

    match SeedLoader::new(store.clone()).run(&options).await? {
        SeedOutcome::AlreadyApplied { applied_at } => {
            println!(
                "{} {} {}",
                "Seed".yellow(),
                options.name.blue(),
                format!("already applied at {}", applied_at.to_rfc3339()).yellow()
            );
        }
        SeedOutcome::Loaded(stats) => {
            println!("{} {}", "Seed applied:".green(), options.name.blue());
            println!(
                "  read: {}  inserted: {}  rejected: {}  batches: {}  ({:.1}s)",
                stats.read.to_string().cyan(),
                stats.inserted.to_string().green(),
                stats.rejected.to_string().yellow(),
                stats.batches,
                stats.elapsed.as_secs_f64()
            );
        }
    }

    let total = store.count().await?;
    println!("  {} {}", "ranges in store:".dimmed(), total);
    Ok(())
}
