//! Dictionary command - build the data dictionary for a file.

use std::fs::File;
use std::io;
use std::path::PathBuf;

use colored::Colorize;
use dibie::{Dibie, DibieConfig};

use super::{ensure_exists, print_saved, write_json, CommandResult};
use crate::cli::OutputFormat;

pub fn run(
    file: PathBuf,
    table_name: Option<String>,
    format: OutputFormat,
    output: Option<PathBuf>,
    config: DibieConfig,
) -> CommandResult {
    ensure_exists(&file)?;

    let dibie = Dibie::with_config(config);
    let (table, source) = dibie.load(&file)?;
    let name = table_name.unwrap_or_else(|| source.dataset_name());
    let dictionary = dibie.data_dictionary(&table, &name)?;

    match (format, &output) {
        (OutputFormat::Json, Some(path)) => write_json(path, &dictionary)?,
        (OutputFormat::Json, None) => println!("{}", serde_json::to_string_pretty(&dictionary)?),
        (OutputFormat::Csv, Some(path)) => dictionary.write_csv(File::create(path)?)?,
        (OutputFormat::Csv, None) => dictionary.write_csv(io::stdout().lock())?,
    }

    if let Some(path) = &output {
        print_saved(path);
        println!(
            "{} columns, {} rows",
            dictionary.total_columns.to_string().white().bold(),
            dictionary.total_rows
        );
        let keys: Vec<&str> = dictionary
            .key_candidates()
            .map(|c| c.column_name.as_str())
            .collect();
        if !keys.is_empty() {
            println!("  {} {}", "key candidates:".cyan(), keys.join(", "));
        }
        for record in dictionary.degraded_columns() {
            println!(
                "  {} {}: {}",
                "degraded".yellow(),
                record.column_name,
                record.error.as_deref().unwrap_or_default()
            );
        }
    }

    Ok(())
}
