//! Course and evaluation records.
//!
//! Field names serialize in PascalCase to match the course data file format.

use serde::{Deserialize, Serialize};

/// A gradeable unit identified by a code, owning its evaluations in display order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Course {
    /// Course code, e.g. "CS101". Duplicates are permitted.
    pub code: String,
    /// Evaluations in insertion order.
    #[serde(default)]
    pub evaluations: Vec<Evaluation>,
}

impl Course {
    /// Create a course with no evaluations.
    pub fn new(code: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            evaluations: Vec::new(),
        }
    }
}

/// A single gradable component of a course (quiz, assignment, exam).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Evaluation {
    pub description: String,
    /// Percent of the course grade this evaluation is worth.
    pub weight: f64,
    /// Maximum raw score.
    pub out_of: u32,
    /// Raw score achieved. `None` means not yet graded, which is not the same as zero.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub earned_marks: Option<f64>,
}

impl Evaluation {
    pub fn new(
        description: impl Into<String>,
        out_of: u32,
        weight: f64,
        earned_marks: Option<f64>,
    ) -> Self {
        Self {
            description: description.into(),
            weight,
            out_of,
            earned_marks,
        }
    }

    /// Whether this evaluation counts toward the course aggregate.
    pub fn is_graded(&self) -> bool {
        self.earned_marks.is_some() && self.out_of > 0
    }
}
