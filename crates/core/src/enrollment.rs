//! Enrollment link record and its request draft.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{DomainResult, ErrorCode};
use crate::schema;

/// A persisted enrollment row linking one student to one course.
///
/// Duplicate links are allowed; nothing in the schema deduplicates them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Enrollment {
    pub enrollment_id: i64,
    pub student_id: i64,
    pub course_id: i64,
}

/// Validated field set for enrolling a student into a course.
///
/// Schema: `course_id` required string. The wire contract takes the course
/// reference as a string, not a number; whether the referenced course exists
/// is the handler's concern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnrollmentDraft {
    pub course_id: String,
}

impl EnrollmentDraft {
    pub fn from_json(body: &Value) -> DomainResult<Self> {
        let course_id = schema::required_string(body, "course_id", ErrorCode::Enrollment003)?;
        Ok(Self { course_id })
    }

    /// The numeric course reference, if the string denotes one.
    ///
    /// A non-numeric reference can never match a stored course, so callers
    /// treat `None` the same as a lookup miss.
    pub fn course_ref(&self) -> Option<i64> {
        self.course_id.trim().parse().ok()
    }
}
