//! Group command - show entity grouping of a file's columns.

use std::path::PathBuf;

use colored::Colorize;
use dibie::{Dibie, DibieConfig};

use super::{ensure_exists, CommandResult};

pub fn run(file: PathBuf, config: DibieConfig) -> CommandResult {
    ensure_exists(&file)?;

    let dibie = Dibie::with_config(config);
    let (table, source) = dibie.load(&file)?;
    let groups = dibie.group_columns(&table);

    println!(
        "{} {}",
        "Column groups for".cyan().bold(),
        source.file.white()
    );
    for (group, columns) in &groups {
        println!();
        println!(
            "{} ({})",
            group.to_string().to_uppercase().yellow().bold(),
            columns.len()
        );
        for column in columns {
            println!("  - {}", column);
        }
    }

    Ok(())
}
