//! DIBIE CLI - school finance data dictionaries, quality reports and table proposals.

mod cli;
mod commands;
mod logging;

use clap::Parser;
use cli::{Cli, Commands};
use dibie::DibieConfig;
use logging::{init_logging, LogConfig};

fn main() {
    let cli = Cli::parse();

    let log_config = LogConfig::from_verbosity(cli.verbose)
        .with_format(cli.log_format)
        .with_log_file(cli.log_file.clone());
    if let Err(e) = init_logging(&log_config) {
        eprintln!("Error: failed to initialize logging: {}", e);
        std::process::exit(1);
    }

    let config = match &cli.config {
        Some(path) => match DibieConfig::load(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        },
        None => DibieConfig::default(),
    };

    let result = match cli.command {
        Commands::Dictionary {
            file,
            table_name,
            format,
            output,
        } => commands::dictionary::run(file, table_name, format, output, config),

        Commands::Quality {
            file,
            name,
            subset,
            output,
        } => commands::quality::run(file, name, subset, output, config),

        Commands::Propose { file, output, sql } => commands::propose::run(file, output, sql, config),

        Commands::Group { file } => commands::group::run(file, config),

        Commands::Analyze { file, out_dir } => commands::analyze::run(file, out_dir, config),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
