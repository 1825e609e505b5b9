//! Command-line interface definitions using clap

use clap::{Parser, Subcommand};

/// iplocate - IPv4 geolocation over sorted range datasets
#[derive(Parser)]
#[command(name = "iplocate")]
#[command(version)]
#[command(about = "Resolve IPv4 addresses to country, region and city", long_about = None)]
pub struct Cli {
    /// Configuration file (default: config.toml)
    #[arg(long, short = 'c', global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the HTTP lookup server (default)
    Serve,

    /// Convert a raw CSV dataset into the compact gzip TSV format
    Convert {
        /// Raw dataset path (default: convert.input_path)
        #[arg(long)]
        input: Option<String>,

        /// Output path (default: convert.output_path)
        #[arg(long)]
        output: Option<String>,

        /// gzip level 0-9
        #[arg(long, value_parser = clap::value_parser!(u32).range(0..=9))]
        level: Option<u32>,
    },

    /// Load a compact range file into the store (no-op if already applied)
    Seed {
        /// Compact range file (default: seed.file_path)
        #[arg(long)]
        file: Option<String>,

        /// Seed name (default: seed.name)
        #[arg(long)]
        name: Option<String>,

        /// Rows per bulk insert
        #[arg(long)]
        batch_size: Option<usize>,
    },

    /// Resolve a single address against the configured store
    Lookup {
        /// Dotted-quad IPv4 address
        ip: String,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigCommands,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Generate example configuration file
    Generate {
        /// Output path (default: config.example.toml)
        output_path: Option<String>,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_subcommand_means_serve() {
        let cli = Cli::try_parse_from(["iplocate"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_convert_arguments() {
        let cli = Cli::try_parse_from([
            "iplocate",
            "convert",
            "--input",
            "db11.csv",
            "--level",
            "6",
        ])
        .unwrap();
        match cli.command {
            Some(Commands::Convert {
                input,
                output,
                level,
            }) => {
                assert_eq!(input.as_deref(), Some("db11.csv"));
                assert!(output.is_none());
                assert_eq!(level, Some(6));
            }
            _ => panic!("expected convert"),
        }
    }

    #[test]
    fn test_level_out_of_range_is_rejected() {
        assert!(Cli::try_parse_from(["iplocate", "convert", "--level", "12"]).is_err());
    }

    #[test]
    fn test_global_config_flag() {
        let cli = Cli::try_parse_from(["iplocate", "lookup", "8.8.8.8", "-c", "prod.toml"]).unwrap();
        assert_eq!(cli.config.as_deref(), Some("prod.toml"));
        assert!(matches!(cli.command, Some(Commands::Lookup { ip }) if ip == "8.8.8.8"));
    }
}
