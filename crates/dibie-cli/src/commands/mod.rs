//! CLI command implementations.

pub mod analyze;
pub mod dictionary;
pub mod group;
pub mod propose;
pub mod quality;

use std::fs;
use std::path::Path;

use colored::Colorize;
use serde::Serialize;

pub type CommandResult = Result<(), Box<dyn std::error::Error>>;

fn ensure_exists(file: &Path) -> CommandResult {
    if !file.exists() {
        return Err(format!("File not found: {}", file.display()).into());
    }
    Ok(())
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> CommandResult {
    let json = serde_json::to_string_pretty(value)?;
    fs::write(path, json).map_err(|e| format!("Failed to write {}: {}", path.display(), e))?;
    Ok(())
}

fn print_saved(path: &Path) {
    println!(
        "{} {}",
        "Saved to".green().bold(),
        path.display().to_string().white()
    );
}

fn colored_score(score: f64) -> colored::ColoredString {
    let text = format!("{:.2}", score);
    if score >= 90.0 {
        text.green().bold()
    } else if score >= 70.0 {
        text.yellow().bold()
    } else {
        text.red().bold()
    }
}
