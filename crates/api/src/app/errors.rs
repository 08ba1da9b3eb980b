use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;

use roster_core::{DomainError, ErrorCode};
use roster_store::StoreError;

/// Umbrella error for the HTTP layer.
///
/// Handlers return `Result<_, ApiError>` so `?` flows domain and store
/// failures straight through; `IntoResponse` flattens each variant to the
/// wire contract. Anything the contract renders as a bare 500 is logged
/// here first, with its cause, before the detail is dropped.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Store(#[from] StoreError),

    /// An update addressed a row that is not there. The wire contract for
    /// this case is a bare 500, but the distinct variant lets the log line
    /// name the resource instead of a phantom database failure.
    #[error("update target {resource}/{id} does not exist")]
    MissingUpdateTarget { resource: &'static str, id: i64 },
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Domain(DomainError::Validation(code)) => {
                (StatusCode::BAD_REQUEST, error_body(code)).into_response()
            }
            ApiError::Domain(DomainError::Conflict(code)) => {
                (StatusCode::CONFLICT, error_body(code)).into_response()
            }
            ApiError::Domain(DomainError::NotFound) => StatusCode::NOT_FOUND.into_response(),
            ApiError::Store(e) => {
                tracing::error!(operation = e.operation(), error = %e, "store operation failed");
                StatusCode::INTERNAL_SERVER_ERROR.into_response()
            }
            ApiError::MissingUpdateTarget { resource, id } => {
                tracing::warn!(resource, id, "update addressed a missing row");
                StatusCode::INTERNAL_SERVER_ERROR.into_response()
            }
        }
    }
}

/// Structured `{error_code, error_message}` body carried by validation and
/// conflict responses.
fn error_body(code: ErrorCode) -> axum::Json<serde_json::Value> {
    axum::Json(json!({
        "error_code": code.as_str(),
        "error_message": code.message(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_maps_to_400() {
        let resp = ApiError::from(DomainError::validation(ErrorCode::Student001)).into_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn conflict_maps_to_409() {
        let resp = ApiError::from(DomainError::conflict(ErrorCode::Course004)).into_response();
        assert_eq!(resp.status(), StatusCode::CONFLICT);
    }

    #[test]
    fn not_found_is_an_empty_404() {
        let resp = ApiError::from(DomainError::not_found()).into_response();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn missing_update_target_is_a_bare_500() {
        let resp = ApiError::MissingUpdateTarget {
            resource: "student",
            id: 7,
        }
        .into_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
