//! Error taxonomy for gradetrack.
//!
//! Fatal errors (`Configuration`, `Deserialization`) are raised at startup and
//! stop the session before any menu interaction. `Validation` and `Index` are
//! recoverable: the mutation is rolled back and the caller re-prompts. `Io` on
//! the final save is reported but does not stop a clean exit.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Which collection an out-of-range index referred to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexKind {
    Course,
    Evaluation,
}

impl fmt::Display for IndexKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndexKind::Course => write!(f, "course"),
            IndexKind::Evaluation => write!(f, "evaluation"),
        }
    }
}

/// Errors produced by the gradetrack core.
#[derive(Debug, Error)]
pub enum GradeError {
    /// The schema document or config file is missing, unreadable, or invalid.
    #[error("configuration error in {}: {reason}", path.display())]
    Configuration { path: PathBuf, reason: String },

    /// The data file exists but is not a JSON array of course records.
    #[error("failed to deserialize {}: {reason}", path.display())]
    Deserialization { path: PathBuf, reason: String },

    /// A course record failed schema validation.
    #[error("invalid course data: {}", messages.join("; "))]
    Validation { messages: Vec<String> },

    /// A 1-based index was 0 or beyond the current count.
    #[error("[{index}] is not a valid {kind} index (expected 1..={count})")]
    Index {
        kind: IndexKind,
        index: usize,
        count: usize,
    },

    /// Reading or writing a file failed.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl GradeError {
    /// Returns `true` if this error must stop the session before the menu runs.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            GradeError::Configuration { .. } | GradeError::Deserialization { .. }
        )
    }

    /// Diagnostic messages for a validation failure, empty for other kinds.
    pub fn messages(&self) -> &[String] {
        match self {
            GradeError::Validation { messages } => messages,
            _ => &[],
        }
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        GradeError::Io {
            path: path.into(),
            source,
        }
    }
}
