//! `roster-core` — domain records and boundary validation.
//!
//! This crate contains **pure domain** types (no HTTP or storage concerns):
//! the three record kinds, their validated request drafts, and the error
//! model shared by the store and API layers.

pub mod course;
pub mod enrollment;
pub mod error;
pub mod schema;
pub mod student;

pub use course::{Course, CourseDraft};
pub use enrollment::{Enrollment, EnrollmentDraft};
pub use error::{DomainError, DomainResult, ErrorCode};
pub use student::{Student, StudentDraft};
