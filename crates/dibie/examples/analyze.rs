//! Example: Analyze a school finance table with Dibie.
//!
//! Usage:
//!   cargo run --example analyze -- <file_path>
//!
//! Example:
//!   cargo run --example analyze -- tests/data/tabla_maestra.csv

use std::env;
use std::path::Path;

use dibie::Dibie;

fn main() -> dibie::Result<()> {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: cargo run --example analyze -- <file_path>");
        eprintln!("\nExample:");
        eprintln!("  cargo run --example analyze -- tests/data/tabla_maestra.csv");
        std::process::exit(1);
    }

    let file_path = &args[1];
    let path = Path::new(file_path);

    if !path.exists() {
        eprintln!("Error: File not found: {}", file_path);
        std::process::exit(1);
    }

    let separator = "=".repeat(80);
    println!("{}", separator);
    println!("DIBIE Analysis: {}", file_path);
    println!("{}", separator);
    println!();

    let result = Dibie::new().analyze(path)?;

    println!("DATA DICTIONARY ({} rows)", result.dictionary.total_rows);
    println!("{}", "-".repeat(80));
    for record in &result.dictionary.columns {
        println!(
            "  {:<28} {:<11} {:<30} {:>6.2}% null",
            record.column_name,
            record.business_type,
            record.cardinality,
            record.statistics.null_percentage
        );
    }
    println!();

    println!("QUALITY SCORE: {:.2}", result.quality.quality_score);
    for recommendation in &result.quality.recommendations {
        println!("  - {}", recommendation);
    }
    println!();

    println!("PROPOSED TABLES");
    println!("{}", "-".repeat(80));
    for (name, table) in result.proposal.iter() {
        println!("  {:<28} {:<11} ~{} rows", name, table.kind.to_string(), table.estimated_rows);
    }
    println!();

    println!("{}", result.schema_sql());
    Ok(())
}
