//! JSON Schema validation of course records.
//!
//! Every course is serialized and checked against the schema document before a
//! mutation is committed. The structural shape lives in the schema; this module
//! only compiles it and reports diagnostics.

use std::path::Path;

use serde_json::Value;

use crate::error::GradeError;
use crate::model::Course;

/// The bundled course schema, identical to `schema/course_schema.json`.
pub const DEFAULT_SCHEMA: &str = include_str!("../../../schema/course_schema.json");

/// Outcome of validating one serialized course record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationReport {
    pub ok: bool,
    /// Diagnostic messages; non-empty whenever `ok` is false.
    pub messages: Vec<String>,
}

impl ValidationReport {
    pub fn passed() -> Self {
        Self {
            ok: true,
            messages: Vec::new(),
        }
    }

    pub fn failed(messages: Vec<String>) -> Self {
        Self {
            ok: false,
            messages,
        }
    }

    /// Convert into a `Result`, mapping failure to `GradeError::Validation`.
    pub fn into_result(self) -> Result<(), GradeError> {
        if self.ok {
            Ok(())
        } else {
            Err(GradeError::Validation {
                messages: self.messages,
            })
        }
    }
}

/// Checks the structure of a serialized course record.
pub trait CourseValidator {
    /// Validate a serialized course. Must not have side effects.
    fn validate(&self, record: &Value) -> ValidationReport;

    /// Serialize `course` and validate the result.
    ///
    /// Non-finite numbers are rejected before serializing: JSON has no
    /// representation for them and they would otherwise become `null`.
    fn validate_course(&self, course: &Course) -> ValidationReport {
        let non_finite = non_finite_fields(course);
        if !non_finite.is_empty() {
            return ValidationReport::failed(non_finite);
        }
        match serde_json::to_value(course) {
            Ok(record) => self.validate(&record),
            Err(e) => ValidationReport::failed(vec![format!("failed to serialize course: {e}")]),
        }
    }
}

fn non_finite_fields(course: &Course) -> Vec<String> {
    let mut messages = Vec::new();
    for (i, eval) in course.evaluations.iter().enumerate() {
        if !eval.weight.is_finite() {
            messages.push(format!(
                "/Evaluations/{i}/Weight: {} is not a finite number",
                eval.weight
            ));
        }
        if let Some(marks) = eval.earned_marks.filter(|m| !m.is_finite()) {
            messages.push(format!(
                "/Evaluations/{i}/EarnedMarks: {marks} is not a finite number"
            ));
        }
    }
    messages
}

/// Validator backed by a compiled JSON Schema document.
pub struct SchemaValidator {
    validator: jsonschema::Validator,
}

impl std::fmt::Debug for SchemaValidator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SchemaValidator").finish_non_exhaustive()
    }
}

impl SchemaValidator {
    /// Read, parse, and compile the schema document at `path`.
    ///
    /// Any failure is a `GradeError::Configuration`: the session cannot start
    /// without a schema.
    pub fn from_path(path: &Path) -> Result<Self, GradeError> {
        let content = std::fs::read_to_string(path).map_err(|e| GradeError::Configuration {
            path: path.to_path_buf(),
            reason: format!("unable to read schema: {e}"),
        })?;
        let schema: Value =
            serde_json::from_str(&content).map_err(|e| GradeError::Configuration {
                path: path.to_path_buf(),
                reason: format!("schema is not valid JSON: {e}"),
            })?;
        let validator = Self::compile(&schema).map_err(|reason| GradeError::Configuration {
            path: path.to_path_buf(),
            reason,
        })?;
        tracing::debug!("loaded schema from {}", path.display());
        Ok(validator)
    }

    /// Compile an already-parsed schema document.
    pub fn from_value(schema: &Value) -> Result<Self, GradeError> {
        Self::compile(schema).map_err(|reason| GradeError::Configuration {
            path: "<inline schema>".into(),
            reason,
        })
    }

    /// The bundled schema.
    pub fn builtin() -> Result<Self, GradeError> {
        let schema: Value =
            serde_json::from_str(DEFAULT_SCHEMA).map_err(|e| GradeError::Configuration {
                path: "<builtin schema>".into(),
                reason: e.to_string(),
            })?;
        Self::from_value(&schema)
    }

    fn compile(schema: &Value) -> Result<Self, String> {
        let validator =
            jsonschema::validator_for(schema).map_err(|e| format!("invalid schema: {e}"))?;
        Ok(Self { validator })
    }
}

impl CourseValidator for SchemaValidator {
    fn validate(&self, record: &Value) -> ValidationReport {
        let messages: Vec<String> = self
            .validator
            .iter_errors(record)
            .map(|e| {
                let location = e.instance_path.to_string();
                if location.is_empty() {
                    e.to_string()
                } else {
                    format!("{location}: {e}")
                }
            })
            .collect();

        if messages.is_empty() {
            ValidationReport::passed()
        } else {
            ValidationReport::failed(messages)
        }
    }
}
