//! The command interface the menu and subcommands drive.
//!
//! A `GradeBook` owns one [`CourseStore`] and remembers where it was loaded
//! from, so a session is: open, issue commands, flush if dirty.

use std::path::{Path, PathBuf};

use crate::config::GradeTrackConfig;
use crate::error::GradeError;
use crate::grade::{summarize_course, summarize_evaluation, CourseSummary, EvaluationSummary};
use crate::model::{Course, Evaluation};
use crate::persistence;
use crate::schema::{CourseValidator, SchemaValidator};
use crate::store::CourseStore;

#[derive(Debug)]
pub struct GradeBook {
    store: CourseStore,
    data_file: PathBuf,
}

impl GradeBook {
    /// Load the schema, then the data file, as named by `config`.
    ///
    /// The schema is loaded first: if it is unavailable the data file is not
    /// touched at all.
    pub fn open(config: &GradeTrackConfig) -> Result<Self, GradeError> {
        let validator = SchemaValidator::from_path(&config.schema_file)?;
        Self::load_all(&config.data_file, Box::new(validator))
    }

    /// Load and validate every course in `data_file`.
    pub fn load_all(
        data_file: &Path,
        validator: Box<dyn CourseValidator>,
    ) -> Result<Self, GradeError> {
        let courses = persistence::load_validated(data_file, validator.as_ref())?;
        tracing::debug!("loaded {} courses", courses.len());
        let store = CourseStore::from_validated(courses, validator);
        Ok(Self {
            store,
            data_file: data_file.to_path_buf(),
        })
    }

    pub fn data_file(&self) -> &Path {
        &self.data_file
    }

    pub fn courses(&self) -> &[Course] {
        self.store.courses()
    }

    pub fn course(&self, index: usize) -> Result<&Course, GradeError> {
        self.store.course(index)
    }

    pub fn evaluation(
        &self,
        course_index: usize,
        eval_index: usize,
    ) -> Result<&Evaluation, GradeError> {
        self.store.evaluation(course_index, eval_index)
    }

    pub fn is_dirty(&self) -> bool {
        self.store.is_dirty()
    }

    pub fn add_course(&mut self, code: &str) -> Result<(), GradeError> {
        self.store.add_course(code)
    }

    pub fn delete_course(&mut self, index: usize) -> Result<Course, GradeError> {
        self.store.remove_course(index)
    }

    pub fn add_evaluation(
        &mut self,
        course_index: usize,
        description: &str,
        out_of: u32,
        weight: f64,
        earned_marks: Option<f64>,
    ) -> Result<(), GradeError> {
        let evaluation = Evaluation::new(description, out_of, weight, earned_marks);
        self.store.add_evaluation(course_index, evaluation)
    }

    pub fn delete_evaluation(
        &mut self,
        course_index: usize,
        eval_index: usize,
    ) -> Result<Evaluation, GradeError> {
        self.store.remove_evaluation(course_index, eval_index)
    }

    pub fn set_earned_marks(
        &mut self,
        course_index: usize,
        eval_index: usize,
        value: Option<f64>,
    ) -> Result<(), GradeError> {
        self.store.set_earned_marks(course_index, eval_index, value)
    }

    pub fn course_summary(&self, course_index: usize) -> Result<CourseSummary, GradeError> {
        Ok(summarize_course(self.store.course(course_index)?))
    }

    pub fn evaluation_summary(
        &self,
        course_index: usize,
        eval_index: usize,
    ) -> Result<EvaluationSummary, GradeError> {
        Ok(summarize_evaluation(
            self.store.evaluation(course_index, eval_index)?,
        ))
    }

    /// Write the courses back to the data file unconditionally.
    pub fn save(&mut self) -> Result<(), GradeError> {
        persistence::save(&self.data_file, self.store.courses())?;
        self.store.mark_saved();
        Ok(())
    }

    /// Write the courses back only if something changed since loading.
    ///
    /// Returns whether a write happened.
    pub fn flush_if_dirty(&mut self) -> Result<bool, GradeError> {
        if !self.store.is_dirty() {
            return Ok(false);
        }
        self.save()?;
        Ok(true)
    }
}
