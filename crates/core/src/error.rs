//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Wire-level error code carried by validation and conflict failures.
///
/// Codes and messages are part of the public API contract: clients match on
/// `error_code`, so both strings are fixed here rather than composed ad hoc
/// at call sites.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    /// Roll number missing or not a string.
    Student001,
    /// First name missing or not a string.
    Student002,
    /// Last name present but not a string.
    Student003,
    /// Roll number already taken.
    Student004,
    /// Course name missing or not a string.
    Course001,
    /// Course code missing or not a string.
    Course002,
    /// Course description present but not a string.
    Course003,
    /// Course code already taken.
    Course004,
    /// Enrollment references a course that does not exist.
    Enrollment001,
    /// Enrollment references a student that does not exist.
    Enrollment002,
    /// Enrollment course reference missing or not a string.
    Enrollment003,
}

impl ErrorCode {
    /// The code string clients see in the `error_code` field.
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCode::Student001 => "STUDENT001",
            ErrorCode::Student002 => "STUDENT002",
            ErrorCode::Student003 => "STUDENT003",
            ErrorCode::Student004 => "STUDENT004",
            ErrorCode::Course001 => "COURSE001",
            ErrorCode::Course002 => "COURSE002",
            ErrorCode::Course003 => "COURSE003",
            ErrorCode::Course004 => "COURSE004",
            ErrorCode::Enrollment001 => "ENROLLMENT001",
            ErrorCode::Enrollment002 => "ENROLLMENT002",
            ErrorCode::Enrollment003 => "ENROLLMENT003",
        }
    }

    /// The canonical `error_message` paired with this code.
    pub fn message(self) -> &'static str {
        match self {
            ErrorCode::Student001 => "Roll Number required and should be String",
            ErrorCode::Student002 => "First Name is required and should be String",
            ErrorCode::Student003 => "Last Name is String",
            ErrorCode::Student004 => "Roll number must be unique.",
            ErrorCode::Course001 => "Course Name is required and should be string.",
            ErrorCode::Course002 => "Course Code is required and should be string.",
            ErrorCode::Course003 => "Course Description should be string.",
            ErrorCode::Course004 => "Course code must be unique.",
            ErrorCode::Enrollment001 => "Course does not exist",
            ErrorCode::Enrollment002 => "Student does not exist.",
            ErrorCode::Enrollment003 => "Course code is required and should be string.",
        }
    }
}

impl core::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Domain-level error.
///
/// Keep this focused on deterministic request failures (validation,
/// uniqueness conflicts, missing records). Store/infrastructure failures
/// belong to `roster-store`.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum DomainError {
    /// A request field failed the boundary schema.
    #[error("{}: {}", .0.as_str(), .0.message())]
    Validation(ErrorCode),

    /// A uniqueness rule was violated (duplicate roll number / course code).
    #[error("{}: {}", .0.as_str(), .0.message())]
    Conflict(ErrorCode),

    /// The addressed record does not exist.
    #[error("not found")]
    NotFound,
}

impl DomainError {
    pub fn validation(code: ErrorCode) -> Self {
        Self::Validation(code)
    }

    pub fn conflict(code: ErrorCode) -> Self {
        Self::Conflict(code)
    }

    pub fn not_found() -> Self {
        Self::NotFound
    }

    /// The wire code for validation/conflict errors, if any.
    pub fn code(&self) -> Option<ErrorCode> {
        match self {
            DomainError::Validation(code) | DomainError::Conflict(code) => Some(*code),
            DomainError::NotFound => None,
        }
    }
}
