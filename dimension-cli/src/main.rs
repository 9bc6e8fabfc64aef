//! Dimension CLI
//!
//! Commands:
//! - convert: Convert a dimension literal to another unit
//! - units: List known units

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use clap::{Parser, Subcommand};
use dimension::{configure, units, ConfigUpdate, Dimension, DimensionError};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "dimension")]
#[command(about = "Convert values between units of measurement", long_about = None)]
#[command(version)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// JSON configuration file merged before running the command
    #[arg(long, global = true, value_hint = clap::ValueHint::FilePath)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a value such as "2.5in" to another unit
    Convert {
        /// Value with optional unit suffix
        #[arg(allow_hyphen_values = true)]
        value: String,

        /// Target unit
        unit: String,

        /// Decimal places in the output
        #[arg(short, long)]
        digits: Option<usize>,

        /// Pixels per inch
        #[arg(long)]
        pixel_density: Option<f64>,

        /// Viewing distance in mm, for angular units
        #[arg(long)]
        viewing_distance: Option<f64>,

        /// Intermediate unit for indirect conversions
        #[arg(long)]
        anchor: Option<String>,

        /// Print {value, unit} JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// List all known units
    Units,
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(path: &Path) -> Result<(), DimensionError> {
    let text = fs::read_to_string(path).map_err(|e| {
        DimensionError::InvalidConfig(format!("cannot read {}: {}", path.display(), e))
    })?;
    tracing::debug!(path = %path.display(), "loading configuration");
    configure(ConfigUpdate::from_json(&text)?)
}

fn run(cli: Cli) -> Result<(), DimensionError> {
    if let Some(path) = &cli.config {
        load_config(path)?;
    }

    match cli.command {
        Commands::Convert {
            value,
            unit,
            digits,
            pixel_density,
            viewing_distance,
            anchor,
            json,
        } => {
            configure(ConfigUpdate {
                pixel_density,
                viewing_distance,
                anchor_unit: anchor,
                ..ConfigUpdate::default()
            })?;

            let converted = value.parse::<Dimension>()?.to_dimension(&unit)?;
            if json {
                println!("{}", converted.to_json());
            } else {
                println!("{}", converted.to_string_in(None, digits)?);
            }
        }
        Commands::Units => {
            for unit in units() {
                println!("{}", unit);
            }
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {} ({})", e, e.suggestion());
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_convert_args() {
        let cli = Cli::try_parse_from(["dimension", "convert", "-2.5in", "mm", "--digits", "2"]).unwrap();
        match cli.command {
            Commands::Convert { value, unit, digits, .. } => {
                assert_eq!(value, "-2.5in");
                assert_eq!(unit, "mm");
                assert_eq!(digits, Some(2));
            }
            Commands::Units => panic!("expected convert"),
        }
    }

    #[test]
    fn test_run_convert() {
        let cli = Cli::try_parse_from(["dimension", "convert", "1in", "mm"]).unwrap();
        assert!(run(cli).is_ok());
    }

    #[test]
    fn test_run_missing_path() {
        let cli = Cli::try_parse_from(["dimension", "convert", "1in", "nowhere"]).unwrap();
        assert!(matches!(run(cli), Err(DimensionError::NoConversionPath { .. })));
    }
}
