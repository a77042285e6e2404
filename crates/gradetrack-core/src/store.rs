//! In-memory course store.
//!
//! Every mutation is validated against the schema before it is committed and
//! rolled back when validation fails. Indices at this boundary are 1-based,
//! matching the positions shown to the user; [`slot`] is the only place they
//! are converted.

use crate::error::{GradeError, IndexKind};
use crate::model::{Course, Evaluation};
use crate::schema::CourseValidator;

/// Ordered course list with a dirty flag and a validation gate.
pub struct CourseStore {
    courses: Vec<Course>,
    dirty: bool,
    validator: Box<dyn CourseValidator>,
}

impl std::fmt::Debug for CourseStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CourseStore")
            .field("courses", &self.courses)
            .field("dirty", &self.dirty)
            .finish_non_exhaustive()
    }
}

/// Convert a 1-based index into a 0-based position within `count` items.
fn slot(kind: IndexKind, index: usize, count: usize) -> Result<usize, GradeError> {
    if index == 0 || index > count {
        return Err(GradeError::Index { kind, index, count });
    }
    Ok(index - 1)
}

impl CourseStore {
    /// An empty store.
    pub fn new(validator: Box<dyn CourseValidator>) -> Self {
        Self {
            courses: Vec::new(),
            dirty: false,
            validator,
        }
    }

    /// Populate a store from loaded courses, validating each one.
    ///
    /// The first invalid record fails the whole load; the store starts clean.
    pub fn from_courses(
        courses: Vec<Course>,
        validator: Box<dyn CourseValidator>,
    ) -> Result<Self, GradeError> {
        for (i, course) in courses.iter().enumerate() {
            let report = validator.validate_course(course);
            if !report.ok {
                let messages = report
                    .messages
                    .into_iter()
                    .map(|m| format!("course #{} ({}): {m}", i + 1, course.code))
                    .collect();
                return Err(GradeError::Validation { messages });
            }
        }
        Ok(Self::from_validated(courses, validator))
    }

    /// Populate a store from courses already checked against `validator`.
    pub(crate) fn from_validated(
        courses: Vec<Course>,
        validator: Box<dyn CourseValidator>,
    ) -> Self {
        Self {
            courses,
            dirty: false,
            validator,
        }
    }

    pub fn courses(&self) -> &[Course] {
        &self.courses
    }

    pub fn len(&self) -> usize {
        self.courses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.courses.is_empty()
    }

    /// Whether a committed mutation has not been saved yet.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Clear the dirty flag after the courses have been written out.
    pub fn mark_saved(&mut self) {
        self.dirty = false;
    }

    pub fn course(&self, index: usize) -> Result<&Course, GradeError> {
        let i = slot(IndexKind::Course, index, self.courses.len())?;
        Ok(&self.courses[i])
    }

    pub fn evaluation(
        &self,
        course_index: usize,
        eval_index: usize,
    ) -> Result<&Evaluation, GradeError> {
        let course = self.course(course_index)?;
        let e = slot(IndexKind::Evaluation, eval_index, course.evaluations.len())?;
        Ok(&course.evaluations[e])
    }

    /// Add an empty course with the given code.
    pub fn add_course(&mut self, code: &str) -> Result<(), GradeError> {
        let course = Course::new(code);
        if let Err(e) = self.validator.validate_course(&course).into_result() {
            tracing::warn!("rejected course {code:?}: {e}");
            return Err(e);
        }
        tracing::debug!("added course {code}");
        self.courses.push(course);
        self.dirty = true;
        Ok(())
    }

    /// Remove the course at `index` and return it.
    pub fn remove_course(&mut self, index: usize) -> Result<Course, GradeError> {
        let i = slot(IndexKind::Course, index, self.courses.len())?;
        let removed = self.courses.remove(i);
        self.dirty = true;
        tracing::debug!("removed course {}", removed.code);
        self.scan();
        Ok(removed)
    }

    /// Append an evaluation to a course, rolling it back if the course no
    /// longer validates.
    pub fn add_evaluation(
        &mut self,
        course_index: usize,
        evaluation: Evaluation,
    ) -> Result<(), GradeError> {
        let i = slot(IndexKind::Course, course_index, self.courses.len())?;
        let course = &mut self.courses[i];
        course.evaluations.push(evaluation);

        if let Err(e) = self.validator.validate_course(course).into_result() {
            course.evaluations.pop();
            tracing::warn!("rejected evaluation for {}: {e}", course.code);
            return Err(e);
        }
        tracing::debug!("added evaluation to {}", course.code);
        self.dirty = true;
        Ok(())
    }

    /// Remove an evaluation and return it.
    pub fn remove_evaluation(
        &mut self,
        course_index: usize,
        eval_index: usize,
    ) -> Result<Evaluation, GradeError> {
        let i = slot(IndexKind::Course, course_index, self.courses.len())?;
        let course = &mut self.courses[i];
        let e = slot(IndexKind::Evaluation, eval_index, course.evaluations.len())?;
        let removed = course.evaluations.remove(e);
        self.dirty = true;
        tracing::debug!("removed evaluation {} from {}", removed.description, course.code);
        self.scan();
        Ok(removed)
    }

    /// Set or clear the earned marks of an evaluation.
    ///
    /// On validation failure the previous value is restored and the
    /// evaluation stays in place.
    pub fn set_earned_marks(
        &mut self,
        course_index: usize,
        eval_index: usize,
        value: Option<f64>,
    ) -> Result<(), GradeError> {
        let i = slot(IndexKind::Course, course_index, self.courses.len())?;
        let course = &mut self.courses[i];
        let e = slot(IndexKind::Evaluation, eval_index, course.evaluations.len())?;

        let previous = std::mem::replace(&mut course.evaluations[e].earned_marks, value);
        if let Err(err) = self.validator.validate_course(course).into_result() {
            course.evaluations[e].earned_marks = previous;
            tracing::warn!(
                "rejected marks {value:?} for {} / {}: {err}",
                course.code,
                course.evaluations[e].description
            );
            return Err(err);
        }
        self.dirty = true;
        Ok(())
    }

    /// Re-validate every course after a deletion. Failures are logged only;
    /// they never undo the deletion.
    fn scan(&self) {
        for (i, course) in self.courses.iter().enumerate() {
            let report = self.validator.validate_course(course);
            if !report.ok {
                tracing::warn!(
                    "course #{} ({}) fails validation: {}",
                    i + 1,
                    course.code,
                    report.messages.join("; ")
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{SchemaValidator, ValidationReport};
    use serde_json::Value;

    fn store() -> CourseStore {
        CourseStore::new(Box::new(SchemaValidator::builtin().unwrap()))
    }

    fn store_with(courses: Vec<Course>) -> CourseStore {
        CourseStore::from_courses(courses, Box::new(SchemaValidator::builtin().unwrap())).unwrap()
    }

    fn cs101() -> Course {
        Course {
            code: "CS101".into(),
            evaluations: vec![
                Evaluation::new("Quiz1", 20, 10.0, Some(18.0)),
                Evaluation::new("Midterm", 50, 30.0, None),
            ],
        }
    }

    /// Accepts everything, so tests can seed records the schema would reject.
    struct AcceptAll;

    impl CourseValidator for AcceptAll {
        fn validate(&self, _record: &Value) -> ValidationReport {
            ValidationReport::passed()
        }
    }

    #[test]
    fn new_store_is_clean() {
        let s = store_with(vec![cs101()]);
        assert!(!s.is_dirty());
        assert_eq!(s.len(), 1);
    }

    #[test]
    fn from_courses_rejects_invalid_record() {
        let mut bad = cs101();
        bad.evaluations[0].weight = 101.0;
        let err = CourseStore::from_courses(
            vec![Course::new("OK100"), bad],
            Box::new(SchemaValidator::builtin().unwrap()),
        )
        .unwrap_err();
        assert!(matches!(err, GradeError::Validation { .. }));
        assert!(err.messages()[0].starts_with("course #2 (CS101)"));
    }

    #[test]
    fn add_course_appends_and_marks_dirty() {
        let mut s = store();
        s.add_course("CS101").unwrap();
        s.add_course("CS101").unwrap();
        assert_eq!(s.len(), 2, "duplicate codes are permitted");
        assert!(s.is_dirty());
        assert!(s.course(1).unwrap().evaluations.is_empty());
    }

    #[test]
    fn add_course_with_empty_code_is_rejected() {
        let mut s = store();
        let err = s.add_course("").unwrap_err();
        assert!(matches!(err, GradeError::Validation { .. }));
        assert!(!err.messages().is_empty());
        assert!(s.is_empty());
        assert!(!s.is_dirty());
    }

    #[test]
    fn add_then_delete_restores_list_but_stays_dirty() {
        let mut s = store_with(vec![cs101()]);
        let before = s.courses().to_vec();
        s.add_course("MATH200").unwrap();
        let removed = s.remove_course(2).unwrap();
        assert_eq!(removed.code, "MATH200");
        assert_eq!(s.courses(), before.as_slice());
        assert!(s.is_dirty());
    }

    #[test]
    fn remove_course_out_of_range() {
        let mut s = store_with(vec![cs101()]);
        for index in [0, 2] {
            let err = s.remove_course(index).unwrap_err();
            assert!(matches!(
                err,
                GradeError::Index {
                    kind: IndexKind::Course,
                    count: 1,
                    ..
                }
            ));
        }
        assert_eq!(s.len(), 1);
        assert!(!s.is_dirty());
    }

    #[test]
    fn remove_course_is_not_blocked_by_invalid_sibling() {
        let mut bad = Course::new("BAD");
        bad.evaluations.push(Evaluation::new("", 10, 500.0, None));
        let mut s = CourseStore::from_courses(vec![cs101(), bad], Box::new(AcceptAll)).unwrap();
        s.validator = Box::new(SchemaValidator::builtin().unwrap());

        s.remove_course(1).unwrap();
        assert_eq!(s.len(), 1);
        assert_eq!(s.courses()[0].code, "BAD");
        assert!(s.is_dirty());
    }

    #[test]
    fn add_evaluation_commits_valid_entry() {
        let mut s = store_with(vec![Course::new("MATH200")]);
        s.add_evaluation(1, Evaluation::new("A", 50, 40.0, Some(45.0)))
            .unwrap();
        assert_eq!(s.course(1).unwrap().evaluations.len(), 1);
        assert!(s.is_dirty());
    }

    #[test]
    fn add_evaluation_out_of_range_weight_is_rolled_back() {
        let mut s = store_with(vec![cs101()]);
        let err = s
            .add_evaluation(1, Evaluation::new("Final", 100, 150.0, None))
            .unwrap_err();
        assert!(matches!(err, GradeError::Validation { .. }));
        assert_eq!(s.course(1).unwrap().evaluations.len(), 2);
        assert_eq!(s.courses()[0], cs101());
        assert!(!s.is_dirty());
    }

    #[test]
    fn add_evaluation_bad_course_index() {
        let mut s = store_with(vec![cs101()]);
        let err = s
            .add_evaluation(3, Evaluation::new("Final", 100, 50.0, None))
            .unwrap_err();
        assert!(matches!(err, GradeError::Index { index: 3, .. }));
    }

    #[test]
    fn remove_evaluation_out_of_range_leaves_sequence() {
        let mut s = store_with(vec![cs101()]);
        for index in [0, 3] {
            let err = s.remove_evaluation(1, index).unwrap_err();
            assert!(matches!(
                err,
                GradeError::Index {
                    kind: IndexKind::Evaluation,
                    count: 2,
                    ..
                }
            ));
        }
        assert_eq!(s.courses()[0], cs101());
        assert!(!s.is_dirty());
    }

    #[test]
    fn remove_evaluation_keeps_order() {
        let mut s = store_with(vec![cs101()]);
        s.add_evaluation(1, Evaluation::new("Final", 100, 60.0, None))
            .unwrap();
        let removed = s.remove_evaluation(1, 2).unwrap();
        assert_eq!(removed.description, "Midterm");
        let names: Vec<_> = s.courses()[0]
            .evaluations
            .iter()
            .map(|e| e.description.as_str())
            .collect();
        assert_eq!(names, ["Quiz1", "Final"]);
    }

    #[test]
    fn set_earned_marks_updates_and_clears() {
        let mut s = store_with(vec![cs101()]);
        s.set_earned_marks(1, 2, Some(41.5)).unwrap();
        assert_eq!(s.evaluation(1, 2).unwrap().earned_marks, Some(41.5));
        assert!(s.is_dirty());

        s.set_earned_marks(1, 1, None).unwrap();
        assert_eq!(s.evaluation(1, 1).unwrap().earned_marks, None);
    }

    #[test]
    fn rejected_marks_revert_field_and_keep_evaluation() {
        // A rejected edit restores the previous value; it never drops the
        // evaluation from the course.
        let mut s = store_with(vec![cs101()]);
        let err = s.set_earned_marks(1, 1, Some(-3.0)).unwrap_err();
        assert!(matches!(err, GradeError::Validation { .. }));
        assert_eq!(s.course(1).unwrap().evaluations.len(), 2);
        assert_eq!(s.evaluation(1, 1).unwrap().earned_marks, Some(18.0));
        assert!(!s.is_dirty());
    }

    #[test]
    fn non_finite_marks_are_rejected() {
        let mut s = store_with(vec![cs101()]);
        for marks in [f64::NAN, f64::INFINITY] {
            let err = s.set_earned_marks(1, 1, Some(marks)).unwrap_err();
            assert!(matches!(err, GradeError::Validation { .. }));
            assert_eq!(s.evaluation(1, 1).unwrap().earned_marks, Some(18.0));
        }

        let err = s
            .add_evaluation(1, Evaluation::new("Final", 100, 60.0, Some(f64::NAN)))
            .unwrap_err();
        assert!(matches!(err, GradeError::Validation { .. }));
        assert_eq!(s.course(1).unwrap().evaluations.len(), 2);
        assert!(!s.is_dirty());
    }

    #[test]
    fn set_earned_marks_bad_index() {
        let mut s = store_with(vec![cs101()]);
        assert!(s.set_earned_marks(0, 1, Some(1.0)).is_err());
        assert!(s.set_earned_marks(1, 9, Some(1.0)).is_err());
        assert!(!s.is_dirty());
    }

    #[test]
    fn mark_saved_clears_dirty() {
        let mut s = store();
        s.add_course("CS101").unwrap();
        s.mark_saved();
        assert!(!s.is_dirty());
    }
}
