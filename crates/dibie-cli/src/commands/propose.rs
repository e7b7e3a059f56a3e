//! Propose command - suggest normalized tables and their SQL schema.

use std::fs;
use std::path::PathBuf;

use colored::Colorize;
use dibie::{Dibie, DibieConfig, SchemaDdl};

use super::{ensure_exists, print_saved, write_json, CommandResult};

pub fn run(
    file: PathBuf,
    output: Option<PathBuf>,
    sql: Option<PathBuf>,
    config: DibieConfig,
) -> CommandResult {
    ensure_exists(&file)?;

    let dibie = Dibie::with_config(config);
    let (table, source) = dibie.load(&file)?;
    let proposal = dibie.propose(&table);

    if proposal.is_empty() {
        println!("{}", "No tables proposed: no columns to group.".yellow());
    }

    for (name, proposed) in proposal.iter() {
        println!(
            "{} {} ({}, ~{} rows)",
            "Table".cyan().bold(),
            name.white().bold(),
            proposed.kind,
            proposed.estimated_rows
        );
        println!("  {}", proposed.description);
        println!("  Columns: {}", proposed.columns.join(", "));
        if let Some(keys) = proposed.primary_key_candidates.as_ref().filter(|k| !k.is_empty()) {
            println!("  Primary key candidates: {}", keys.join(", ").green());
        }
        for fk in &proposed.foreign_keys {
            println!("  Foreign key: {}", fk.to_string().blue());
        }
    }

    if let Some(path) = output {
        write_json(&path, &proposal)?;
        print_saved(&path);
    }
    if let Some(path) = sql {
        fs::write(&path, SchemaDdl::render(&proposal, &source.file))?;
        print_saved(&path);
    }

    Ok(())
}
