pub mod edit;
pub mod init;
pub mod menu;
pub mod summary;
pub mod validate;

use std::path::PathBuf;

use anyhow::Result;

use gradetrack_core::{load_config_from, GradeBook, GradeTrackConfig};

/// Path options shared by every subcommand.
#[derive(Debug, Clone, Default)]
pub struct Paths {
    pub config: Option<PathBuf>,
    pub data: Option<PathBuf>,
    pub schema: Option<PathBuf>,
}

impl Paths {
    /// Resolve the config file, then apply `--data` / `--schema`.
    pub fn resolve(&self) -> Result<GradeTrackConfig> {
        let config = load_config_from(self.config.as_deref())?;
        Ok(config.with_overrides(self.data.clone(), self.schema.clone()))
    }

    /// Resolve the config and open the grade book it names.
    pub fn open(&self) -> Result<GradeBook> {
        let config = self.resolve()?;
        Ok(GradeBook::open(&config)?)
    }
}
