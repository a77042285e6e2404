//! The `gradetrack validate` command.

use anyhow::Result;

use gradetrack_core::persistence;
use gradetrack_core::schema::{CourseValidator, SchemaValidator};

use super::Paths;

pub fn execute(paths: &Paths) -> Result<()> {
    let config = paths.resolve()?;
    let validator = SchemaValidator::from_path(&config.schema_file)?;

    anyhow::ensure!(
        config.data_file.exists(),
        "data file not found: {}",
        config.data_file.display()
    );
    let records = persistence::load_records(&config.data_file)?;

    println!(
        "Data file: {} ({} courses)",
        config.data_file.display(),
        records.len()
    );

    let mut invalid = 0;
    for (i, record) in records.iter().enumerate() {
        let report = validator.validate(record);
        if report.ok {
            continue;
        }
        invalid += 1;
        let code = record
            .get("Code")
            .and_then(serde_json::Value::as_str)
            .unwrap_or("?");
        for message in &report.messages {
            println!("  [#{} {code}] INVALID: {message}", i + 1);
        }
    }

    if invalid == 0 {
        println!("All courses valid.");
        Ok(())
    } else {
        anyhow::bail!("{invalid} invalid course(s) found")
    }
}
