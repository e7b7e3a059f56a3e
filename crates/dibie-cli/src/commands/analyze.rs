//! Analyze command - run every analysis and write all outputs.

use std::fs;
use std::path::PathBuf;

use colored::Colorize;
use dibie::{Dibie, DibieConfig};

use super::{colored_score, ensure_exists, print_saved, write_json, CommandResult};

pub const DICTIONARY_FILE: &str = "diccionario_datos.json";
pub const QUALITY_FILE: &str = "reporte_calidad.json";
pub const PROPOSAL_FILE: &str = "propuesta_tablas_atomicas.json";
pub const SCHEMA_FILE: &str = "schema_sql.sql";

pub fn run(file: PathBuf, out_dir: PathBuf, config: DibieConfig) -> CommandResult {
    ensure_exists(&file)?;

    println!(
        "{} {}",
        "Analyzing".cyan().bold(),
        file.display().to_string().white()
    );

    let result = Dibie::with_config(config).analyze(&file)?;
    if let Some(source) = &result.source {
        println!(
            "Read {} rows, {} columns",
            source.row_count.to_string().white().bold(),
            source.column_count.to_string().white().bold()
        );
        if !source.renamed_headers.is_empty() {
            println!(
                "{} {}",
                "Renamed duplicate headers:".yellow(),
                source.renamed_headers.join(", ")
            );
        }
    }

    fs::create_dir_all(&out_dir)
        .map_err(|e| format!("Failed to create {}: {}", out_dir.display(), e))?;

    let dictionary_path = out_dir.join(DICTIONARY_FILE);
    write_json(&dictionary_path, &result.dictionary)?;
    print_saved(&dictionary_path);

    let quality_path = out_dir.join(QUALITY_FILE);
    write_json(&quality_path, &result.quality)?;
    print_saved(&quality_path);

    let proposal_path = out_dir.join(PROPOSAL_FILE);
    write_json(&proposal_path, &result.proposal)?;
    print_saved(&proposal_path);

    let schema_path = out_dir.join(SCHEMA_FILE);
    fs::write(&schema_path, result.schema_sql())?;
    print_saved(&schema_path);

    println!();
    println!("Quality score: {}", colored_score(result.quality.quality_score));
    println!(
        "Proposed {} tables from {} entity groups",
        result.proposal.len().to_string().white().bold(),
        result.entity_groups.len()
    );
    if !result.quality.is_clean() {
        println!(
            "{} recommendations in {}",
            result.quality.recommendations.len().to_string().yellow().bold(),
            QUALITY_FILE
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_writes_all_outputs() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("maestra.csv");
        let mut file = fs::File::create(&input).unwrap();
        file.write_all(b"codigo_dane,municipio,valor,tipo\n05001,Cali,10,A\n05002,Pasto,,B\n")
            .unwrap();

        let out_dir = dir.path().join("salida");
        run(input, out_dir.clone(), DibieConfig::default()).unwrap();

        for name in [DICTIONARY_FILE, QUALITY_FILE, PROPOSAL_FILE, SCHEMA_FILE] {
            assert!(out_dir.join(name).exists(), "missing {}", name);
        }

        let quality: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(out_dir.join(QUALITY_FILE)).unwrap()).unwrap();
        assert_eq!(quality["dataset_name"], "maestra");
        assert_eq!(quality["record_count"], 2);

        let sql = fs::read_to_string(out_dir.join(SCHEMA_FILE)).unwrap();
        assert!(sql.contains("-- Generated from: maestra"));
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = run(dir.path().join("nope.csv"), dir.path().to_path_buf(), DibieConfig::default());
        assert!(result.is_err());
    }
}
