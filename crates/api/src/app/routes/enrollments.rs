use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Extension, Path},
    http::StatusCode,
    routing::{delete, get},
    Json, Router,
};

use roster_core::{DomainError, Enrollment, EnrollmentDraft, ErrorCode};

use crate::app::errors::ApiError;
use crate::app::routes::common;
use crate::app::services::AppServices;

/// Nested under `/student/:student_id/course`.
pub fn router() -> Router {
    Router::new()
        .route("/", get(list_enrollments).post(enroll_student))
        .route("/:course_id", delete(withdraw_student))
}

pub async fn list_enrollments(
    Extension(services): Extension<Arc<AppServices>>,
    Path(student_id): Path<i64>,
) -> Result<Json<Vec<Enrollment>>, ApiError> {
    let enrollments = services.store().enrollments_for_student(student_id).await?;
    if enrollments.is_empty() {
        // An empty listing (including an unknown student) answers 404.
        return Err(DomainError::not_found().into());
    }
    Ok(Json(enrollments))
}

pub async fn enroll_student(
    Extension(services): Extension<Arc<AppServices>>,
    Path(student_id): Path<i64>,
    body: Bytes,
) -> Result<StatusCode, ApiError> {
    let draft = EnrollmentDraft::from_json(&common::lenient_json(&body))?;

    // Course first, then student: clients tell the two failures apart by
    // their error codes.
    let course = match draft.course_ref() {
        Some(course_id) => services.store().course(course_id).await?,
        None => None,
    };
    let course = course.ok_or(DomainError::validation(ErrorCode::Enrollment001))?;
    services
        .store()
        .student(student_id)
        .await?
        .ok_or(DomainError::validation(ErrorCode::Enrollment002))?;

    services
        .store()
        .insert_enrollment(student_id, course.course_id)
        .await?;
    Ok(StatusCode::CREATED)
}

pub async fn withdraw_student(
    Extension(services): Extension<Arc<AppServices>>,
    Path((student_id, course_id)): Path<(i64, i64)>,
) -> Result<StatusCode, ApiError> {
    services
        .store()
        .course(course_id)
        .await?
        .ok_or(DomainError::validation(ErrorCode::Enrollment001))?;
    services
        .store()
        .student(student_id)
        .await?
        .ok_or(DomainError::validation(ErrorCode::Enrollment002))?;

    let link = services
        .store()
        .enrollment(student_id, course_id)
        .await?
        .ok_or_else(DomainError::not_found)?;

    services.store().delete_enrollment(link.enrollment_id).await?;
    Ok(StatusCode::OK)
}
