use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Extension, Path},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};

use roster_core::{DomainError, ErrorCode, Student, StudentDraft};

use crate::app::errors::ApiError;
use crate::app::routes::{common, enrollments};
use crate::app::services::AppServices;

pub fn router() -> Router {
    Router::new()
        .route("/", post(create_student))
        .route(
            "/:student_id",
            get(get_student).put(update_student).delete(delete_student),
        )
        .nest("/:student_id/course", enrollments::router())
}

pub async fn get_student(
    Extension(services): Extension<Arc<AppServices>>,
    Path(student_id): Path<i64>,
) -> Result<Json<Student>, ApiError> {
    let student = services
        .store()
        .student(student_id)
        .await?
        .ok_or_else(DomainError::not_found)?;
    Ok(Json(student))
}

pub async fn create_student(
    Extension(services): Extension<Arc<AppServices>>,
    body: Bytes,
) -> Result<StatusCode, ApiError> {
    let draft = StudentDraft::from_json(&common::lenient_json(&body))?;

    if services
        .store()
        .student_by_roll_number(&draft.roll_number)
        .await?
        .is_some()
    {
        return Err(DomainError::conflict(ErrorCode::Student004).into());
    }

    services.store().insert_student(&draft).await?;
    // Creation answers 200, not 201; clients depend on it.
    Ok(StatusCode::OK)
}

pub async fn update_student(
    Extension(services): Extension<Arc<AppServices>>,
    Path(student_id): Path<i64>,
    body: Bytes,
) -> Result<StatusCode, ApiError> {
    let draft = StudentDraft::from_json(&common::lenient_json(&body))?;

    let touched = services.store().update_student(student_id, &draft).await?;
    if touched == 0 {
        return Err(ApiError::MissingUpdateTarget {
            resource: "student",
            id: student_id,
        });
    }
    Ok(StatusCode::CREATED)
}

pub async fn delete_student(
    Extension(services): Extension<Arc<AppServices>>,
    Path(student_id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    services
        .store()
        .student(student_id)
        .await?
        .ok_or_else(DomainError::not_found)?;

    // Two separately committed statements; a failure between them leaves
    // the student behind with no enrollments rather than rolling back.
    services
        .store()
        .delete_enrollments_for_student(student_id)
        .await?;
    services.store().delete_student(student_id).await?;
    Ok(StatusCode::OK)
}
