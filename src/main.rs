use std::process::ExitCode;

use clap::Parser;

use iplocate::cli::{Cli, Commands};
use iplocate::config::{get_config, init_config, init_config_from};
#[cfg(feature = "cli")]
use iplocate::runtime::modes::run_cli;
#[cfg(feature = "server")]
use iplocate::runtime::modes::run_server;
use iplocate::system::init_logging;

#[actix_web::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    match cli.config.as_deref() {
        Some(path) => init_config_from(path),
        None => init_config(),
    }
    let config = get_config();

    // guard 必须存活到进程结束
    let _log_guard = match init_logging(&config.logging) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("[ERROR] {:#}", e);
            return ExitCode::FAILURE;
        }
    };

    match cli.command.unwrap_or(Commands::Serve) {
        #[cfg(feature = "server")]
        Commands::Serve => match run_server().await {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                eprintln!("[ERROR] {:#}", e);
                ExitCode::FAILURE
            }
        },
        #[cfg(feature = "cli")]
        cmd => match run_cli(cmd).await {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                eprintln!("{}", e.format_colored());
                ExitCode::FAILURE
            }
        },
        #[allow(unreachable_patterns)]
        _ => {
            eprintln!("[ERROR] Command not available in this build (enable the `server` / `cli` features)");
            ExitCode::FAILURE
        }
    }
}
