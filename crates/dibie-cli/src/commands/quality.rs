//! Quality command - build the data quality report for a file.

use std::path::PathBuf;

use colored::Colorize;
use dibie::{Dibie, DibieConfig};

use super::{colored_score, ensure_exists, print_saved, write_json, CommandResult};

pub fn run(
    file: PathBuf,
    name: Option<String>,
    subset: Option<Vec<String>>,
    output: Option<PathBuf>,
    mut config: DibieConfig,
) -> CommandResult {
    ensure_exists(&file)?;

    if subset.is_some() {
        config.quality.duplicate_subset = subset;
        config.validate()?;
    }

    let dibie = Dibie::with_config(config);
    let (table, source) = dibie.load(&file)?;
    let name = name.unwrap_or_else(|| source.dataset_name());
    let report = dibie.quality_report(&table, &name)?;

    let Some(path) = output else {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    };

    write_json(&path, &report)?;
    print_saved(&path);
    println!();
    println!(
        "{} {}",
        "Quality report for".cyan().bold(),
        report.dataset_name.white()
    );
    println!(
        "  Records: {}  Columns: {}",
        report.record_count, report.column_count
    );
    println!(
        "  Completeness: {:.1}%  Duplicates: {} ({:.1}%)",
        report.completeness.overall_completeness_pct,
        report.duplicates.duplicate_count,
        report.duplicates.duplicate_pct
    );
    println!("  Score: {}", colored_score(report.quality_score));

    if report.is_clean() {
        println!("{}", "No issues found - data looks clean!".green());
    } else {
        println!();
        println!("{}", "Recommendations:".yellow().bold());
        for recommendation in &report.recommendations {
            println!("  - {}", recommendation);
        }
    }

    Ok(())
}
