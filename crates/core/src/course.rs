//! Course record and its request draft.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{DomainResult, ErrorCode};
use crate::schema;

/// A persisted course row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    pub course_id: i64,
    pub course_code: String,
    pub course_name: String,
    pub course_description: Option<String>,
}

/// Validated field set for creating or overwriting a course.
///
/// Schema: `course_name` required, `course_code` required,
/// `course_description` optional. The name is checked before the code, so
/// an empty body reports COURSE001.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourseDraft {
    pub course_code: String,
    pub course_name: String,
    pub course_description: Option<String>,
}

impl CourseDraft {
    pub fn from_json(body: &Value) -> DomainResult<Self> {
        let course_name = schema::required_string(body, "course_name", ErrorCode::Course001)?;
        let course_code = schema::required_string(body, "course_code", ErrorCode::Course002)?;
        let course_description =
            schema::optional_string(body, "course_description", ErrorCode::Course003)?;
        Ok(Self {
            course_code,
            course_name,
            course_description,
        })
    }
}
