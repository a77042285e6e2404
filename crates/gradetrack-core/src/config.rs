//! gradetrack configuration.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::GradeError;

/// Top-level gradetrack configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradeTrackConfig {
    /// Course data file.
    #[serde(default = "default_data_file")]
    pub data_file: PathBuf,
    /// JSON Schema every course record must satisfy.
    #[serde(default = "default_schema_file")]
    pub schema_file: PathBuf,
}

fn default_data_file() -> PathBuf {
    PathBuf::from("course_data.json")
}

fn default_schema_file() -> PathBuf {
    PathBuf::from("course_schema.json")
}

impl Default for GradeTrackConfig {
    fn default() -> Self {
        Self {
            data_file: default_data_file(),
            schema_file: default_schema_file(),
        }
    }
}

impl GradeTrackConfig {
    /// Override the file locations, e.g. from command-line flags.
    pub fn with_overrides(
        mut self,
        data_file: Option<PathBuf>,
        schema_file: Option<PathBuf>,
    ) -> Self {
        if let Some(data) = data_file {
            self.data_file = data;
        }
        if let Some(schema) = schema_file {
            self.schema_file = schema;
        }
        self
    }
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `gradetrack.toml` in the current directory
/// 2. `~/.config/gradetrack/config.toml`
///
/// Environment variable overrides: `GRADETRACK_DATA_FILE`, `GRADETRACK_SCHEMA_FILE`.
pub fn load_config() -> Result<GradeTrackConfig, GradeError> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<GradeTrackConfig, GradeError> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            return Err(GradeError::Configuration {
                path: p.to_path_buf(),
                reason: "config file not found".into(),
            });
        }
    } else {
        let local = PathBuf::from("gradetrack.toml");
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|home| home.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let mut config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path).map_err(|e| GradeError::Configuration {
                path: path.clone(),
                reason: format!("failed to read config: {e}"),
            })?;
            let config = parse_config(&content).map_err(|reason| GradeError::Configuration {
                path: path.clone(),
                reason,
            })?;
            tracing::debug!("loaded config from {}", path.display());
            config
        }
        None => GradeTrackConfig::default(),
    };

    if let Ok(data) = std::env::var("GRADETRACK_DATA_FILE") {
        config.data_file = PathBuf::from(data);
    }
    if let Ok(schema) = std::env::var("GRADETRACK_SCHEMA_FILE") {
        config.schema_file = PathBuf::from(schema);
    }

    Ok(config)
}

/// Parse a TOML config document.
pub fn parse_config(content: &str) -> Result<GradeTrackConfig, String> {
    toml::from_str(content).map_err(|e| format!("failed to parse config: {e}"))
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("gradetrack"))
}
