//! Loading and saving the course data file.
//!
//! The file is a JSON array of course records. It is read once at startup and
//! written once at shutdown, only when something changed.

use std::path::Path;

use serde_json::Value;

use crate::error::GradeError;
use crate::model::Course;
use crate::schema::CourseValidator;

/// Read the raw course records from `path`.
///
/// A missing file is created empty. An empty file or a JSON `null` yields no
/// records. Anything other than a JSON array is a deserialization error.
pub fn load_records(path: &Path) -> Result<Vec<Value>, GradeError> {
    if !path.exists() {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| GradeError::io(parent, e))?;
        }
        std::fs::write(path, "").map_err(|e| GradeError::io(path, e))?;
        tracing::info!("data file {} not found, created an empty one", path.display());
        return Ok(Vec::new());
    }

    let content = std::fs::read_to_string(path).map_err(|e| GradeError::io(path, e))?;
    if content.trim().is_empty() {
        return Ok(Vec::new());
    }

    let value: Value = serde_json::from_str(&content).map_err(|e| GradeError::Deserialization {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    match value {
        Value::Null => Ok(Vec::new()),
        Value::Array(records) => {
            tracing::debug!("read {} course records from {}", records.len(), path.display());
            Ok(records)
        }
        other => Err(GradeError::Deserialization {
            path: path.to_path_buf(),
            reason: format!("expected an array of courses, found {}", kind_of(&other)),
        }),
    }
}

/// Load the courses stored at `path` without schema validation.
pub fn load(path: &Path) -> Result<Vec<Course>, GradeError> {
    load_records(path)?
        .into_iter()
        .map(|record| into_course(path, record))
        .collect()
}

/// Load the courses at `path`, checking each raw record against the schema
/// before converting it, so bad records report schema diagnostics.
pub fn load_validated(
    path: &Path,
    validator: &dyn CourseValidator,
) -> Result<Vec<Course>, GradeError> {
    let records = load_records(path)?;
    let mut courses = Vec::with_capacity(records.len());

    for (i, record) in records.into_iter().enumerate() {
        let report = validator.validate(&record);
        if !report.ok {
            let code = record
                .get("Code")
                .and_then(Value::as_str)
                .unwrap_or("?")
                .to_string();
            let messages = report
                .messages
                .into_iter()
                .map(|m| format!("course #{} ({code}): {m}", i + 1))
                .collect();
            return Err(GradeError::Validation { messages });
        }
        courses.push(into_course(path, record)?);
    }

    Ok(courses)
}

/// Write every course to `path`, replacing its contents.
pub fn save(path: &Path, courses: &[Course]) -> Result<(), GradeError> {
    let json = serde_json::to_string_pretty(courses).map_err(|e| {
        GradeError::io(path, std::io::Error::new(std::io::ErrorKind::InvalidData, e))
    })?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| GradeError::io(parent, e))?;
    }
    std::fs::write(path, json).map_err(|e| GradeError::io(path, e))?;
    tracing::debug!("wrote {} courses to {}", courses.len(), path.display());
    Ok(())
}

fn into_course(path: &Path, record: Value) -> Result<Course, GradeError> {
    serde_json::from_value(record).map_err(|e| GradeError::Deserialization {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Evaluation;
    use crate::schema::SchemaValidator;

    fn cs101() -> Vec<Course> {
        vec![Course {
            code: "CS101".into(),
            evaluations: vec![Evaluation::new("Quiz1", 20, 10.0, Some(18.0))],
        }]
    }

    #[test]
    fn missing_file_is_created_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("JSON").join("course_data.json");
        let courses = load(&path).unwrap();
        assert!(courses.is_empty());
        assert!(path.exists());
        assert_eq!(std::fs::metadata(&path).unwrap().len(), 0);
    }

    #[test]
    fn empty_and_null_files_load_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.json");

        std::fs::write(&path, "").unwrap();
        assert!(load(&path).unwrap().is_empty());

        std::fs::write(&path, "  \n").unwrap();
        assert!(load(&path).unwrap().is_empty());

        std::fs::write(&path, "null").unwrap();
        assert!(load(&path).unwrap().is_empty());
    }

    #[test]
    fn malformed_content_is_deserialization_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.json");

        std::fs::write(&path, "[{\"Code\": \"CS101\",").unwrap();
        let err = load(&path).unwrap_err();
        assert!(matches!(err, GradeError::Deserialization { .. }));
        assert!(err.is_fatal());

        std::fs::write(&path, r#"{"Code": "CS101"}"#).unwrap();
        let err = load(&path).unwrap_err();
        assert!(err.to_string().contains("expected an array"));
    }

    #[test]
    fn save_then_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("course_data.json");
        let courses = cs101();

        save(&path, &courses).unwrap();
        let loaded = load(&path).unwrap();
        assert_eq!(loaded, courses);
        assert_eq!(loaded[0].evaluations[0].earned_marks, Some(18.0));
    }

    #[test]
    fn save_overwrites_previous_contents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("course_data.json");
        save(&path, &cs101()).unwrap();
        save(&path, &[]).unwrap();
        assert!(load(&path).unwrap().is_empty());
    }

    #[test]
    fn save_into_directory_path_fails_with_io() {
        let dir = tempfile::tempdir().unwrap();
        let err = save(dir.path(), &cs101()).unwrap_err();
        assert!(matches!(err, GradeError::Io { .. }));
        assert!(!err.is_fatal());
    }

    #[test]
    fn load_validated_reports_schema_diagnostics() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.json");
        std::fs::write(
            &path,
            r#"[
                {"Code": "CS101", "Evaluations": []},
                {"Code": "MATH200", "Evaluations": [{"Description": "A", "Weight": 40, "OutOf": -5}]}
            ]"#,
        )
        .unwrap();

        let validator = SchemaValidator::builtin().unwrap();
        let err = load_validated(&path, &validator).unwrap_err();
        assert!(matches!(err, GradeError::Validation { .. }));
        assert!(err.messages()[0].starts_with("course #2 (MATH200)"));
    }

    #[test]
    fn out_of_beyond_u32_is_a_schema_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.json");
        std::fs::write(
            &path,
            r#"[{"Code": "CS101", "Evaluations": [{"Description": "A", "Weight": 10, "OutOf": 4294967296}]}]"#,
        )
        .unwrap();

        let validator = SchemaValidator::builtin().unwrap();
        let err = load_validated(&path, &validator).unwrap_err();
        assert!(matches!(err, GradeError::Validation { .. }), "{err}");
        assert!(err.messages()[0].contains("OutOf"), "{:?}", err.messages());
    }

    #[test]
    fn load_validated_accepts_good_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.json");
        save(&path, &cs101()).unwrap();

        let validator = SchemaValidator::builtin().unwrap();
        assert_eq!(load_validated(&path, &validator).unwrap(), cs101());
    }
}
