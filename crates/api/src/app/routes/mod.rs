use axum::Router;

pub mod common;
pub mod courses;
pub mod enrollments;
pub mod students;
pub mod system;

/// Router for everything under `/api`.
pub fn router() -> Router {
    Router::new()
        .nest("/student", students::router())
        .nest("/course", courses::router())
}
