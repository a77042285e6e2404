//! The `gradetrack init` command.

use std::path::Path;

use anyhow::Result;

use gradetrack_core::schema::DEFAULT_SCHEMA;

pub fn execute() -> Result<()> {
    write_if_absent(Path::new("gradetrack.toml"), SAMPLE_CONFIG)?;
    write_if_absent(Path::new("course_schema.json"), DEFAULT_SCHEMA)?;

    println!("\nNext steps:");
    println!("  1. Run: gradetrack");
    println!("  2. Press A to add your first course");

    Ok(())
}

fn write_if_absent(path: &Path, content: &str) -> Result<()> {
    if path.exists() {
        println!("{} already exists, skipping.", path.display());
    } else {
        std::fs::write(path, content)?;
        println!("Created {}", path.display());
    }
    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# gradetrack configuration

# Course data file, created on first run if missing
data_file = "course_data.json"

# JSON Schema every course record is validated against
schema_file = "course_schema.json"
"#;
