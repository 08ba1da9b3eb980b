use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Extension, Path},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};

use roster_core::{Course, CourseDraft, DomainError, ErrorCode};

use crate::app::errors::ApiError;
use crate::app::routes::common;
use crate::app::services::AppServices;

pub fn router() -> Router {
    Router::new().route("/", post(create_course)).route(
        "/:course_id",
        get(get_course).put(update_course).delete(delete_course),
    )
}

pub async fn get_course(
    Extension(services): Extension<Arc<AppServices>>,
    Path(course_id): Path<i64>,
) -> Result<Json<Course>, ApiError> {
    let course = services
        .store()
        .course(course_id)
        .await?
        .ok_or_else(DomainError::not_found)?;
    Ok(Json(course))
}

pub async fn create_course(
    Extension(services): Extension<Arc<AppServices>>,
    body: Bytes,
) -> Result<StatusCode, ApiError> {
    let draft = CourseDraft::from_json(&common::lenient_json(&body))?;

    if services
        .store()
        .course_by_code(&draft.course_code)
        .await?
        .is_some()
    {
        return Err(DomainError::conflict(ErrorCode::Course004).into());
    }

    services.store().insert_course(&draft).await?;
    Ok(StatusCode::CREATED)
}

pub async fn update_course(
    Extension(services): Extension<Arc<AppServices>>,
    Path(course_id): Path<i64>,
    body: Bytes,
) -> Result<StatusCode, ApiError> {
    let draft = CourseDraft::from_json(&common::lenient_json(&body))?;

    let touched = services.store().update_course(course_id, &draft).await?;
    if touched == 0 {
        return Err(ApiError::MissingUpdateTarget {
            resource: "course",
            id: course_id,
        });
    }
    Ok(StatusCode::CREATED)
}

pub async fn delete_course(
    Extension(services): Extension<Arc<AppServices>>,
    Path(course_id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    services
        .store()
        .course(course_id)
        .await?
        .ok_or_else(DomainError::not_found)?;

    // Enrollments referencing the course go first, then the course itself;
    // each statement commits on its own.
    services
        .store()
        .delete_enrollments_for_course(course_id)
        .await?;
    services.store().delete_course(course_id).await?;
    Ok(StatusCode::OK)
}
