//! Student record and its request draft.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{DomainResult, ErrorCode};
use crate::schema;

/// A persisted student row.
///
/// `student_id` is assigned by the store; `roll_number` is the unique
/// human-readable identifier, distinct from the numeric id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    pub student_id: i64,
    pub roll_number: String,
    pub first_name: String,
    pub last_name: Option<String>,
}

/// Validated field set for creating or overwriting a student.
///
/// Schema: `roll_number` required, `first_name` required, `last_name`
/// optional. Fields are checked in that order, so a body missing everything
/// reports the roll number first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudentDraft {
    pub roll_number: String,
    pub first_name: String,
    pub last_name: Option<String>,
}

impl StudentDraft {
    pub fn from_json(body: &Value) -> DomainResult<Self> {
        let roll_number = schema::required_string(body, "roll_number", ErrorCode::Student001)?;
        let first_name = schema::required_string(body, "first_name", ErrorCode::Student002)?;
        let last_name = schema::optional_string(body, "last_name", ErrorCode::Student003)?;
        Ok(Self {
            roll_number,
            first_name,
            last_name,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DomainError;
    use serde_json::json;

    #[test]
    fn full_body_parses() {
        let draft = StudentDraft::from_json(&json!({
            "roll_number": "R1",
            "first_name": "Ann",
            "last_name": "Lee",
        }))
        .unwrap();
        assert_eq!(draft.roll_number, "R1");
        assert_eq!(draft.first_name, "Ann");
        assert_eq!(draft.last_name.as_deref(), Some("Lee"));
    }

    #[test]
    fn last_name_is_optional() {
        let draft = StudentDraft::from_json(&json!({
            "roll_number": "R1",
            "first_name": "Ann",
        }))
        .unwrap();
        assert_eq!(draft.last_name, None);
    }

    #[test]
    fn missing_roll_number_is_reported_first() {
        let err = StudentDraft::from_json(&Value::Null).unwrap_err();
        assert_eq!(err, DomainError::validation(ErrorCode::Student001));
    }

    #[test]
    fn missing_first_name_reports_student002() {
        let err = StudentDraft::from_json(&json!({ "roll_number": "R1" })).unwrap_err();
        assert_eq!(err, DomainError::validation(ErrorCode::Student002));
    }

    #[test]
    fn non_string_last_name_reports_student003() {
        let err = StudentDraft::from_json(&json!({
            "roll_number": "R1",
            "first_name": "Ann",
            "last_name": 42,
        }))
        .unwrap_err();
        assert_eq!(err, DomainError::validation(ErrorCode::Student003));
    }

    #[test]
    fn student_serializes_with_null_last_name() {
        let student = Student {
            student_id: 1,
            roll_number: "R1".to_string(),
            first_name: "Ann".to_string(),
            last_name: None,
        };
        let value = serde_json::to_value(&student).unwrap();
        assert_eq!(
            value,
            json!({
                "student_id": 1,
                "roll_number": "R1",
                "first_name": "Ann",
                "last_name": null,
            })
        );
    }
}
