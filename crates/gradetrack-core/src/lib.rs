//! gradetrack-core — Grade calculation, schema validation, and course storage.
//!
//! This crate holds every piece of grading semantics: the course data model,
//! the JSON Schema gate every mutation passes through, the weighted-average
//! calculator, and the load/mutate/save lifecycle of the course file.

pub mod config;
pub mod error;
pub mod grade;
pub mod gradebook;
pub mod model;
pub mod persistence;
pub mod schema;
pub mod store;

pub use config::{load_config, load_config_from, GradeTrackConfig};
pub use error::{GradeError, IndexKind};
pub use gradebook::GradeBook;
pub use model::{Course, Evaluation};
