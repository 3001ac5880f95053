//! HTTP request handlers for API endpoints.
//!
//! Each handler module corresponds to one resource.

pub mod courses;
pub mod health;
pub mod students;
pub mod teachers;

use axum::http::Uri;
use serde_json::json;

use crate::error::AppError;

pub use courses::{
    create_course_handler, delete_course_handler, get_course_handler, list_courses_handler,
    update_course_handler,
};
pub use health::health_handler;
pub use students::{
    create_student_handler, delete_student_handler, get_student_handler, list_students_handler,
    update_student_handler,
};
pub use teachers::{
    create_teacher_handler, delete_teacher_handler, get_teacher_handler, list_teachers_handler,
    update_teacher_handler,
};

/// Fallback for unmatched routes.
pub async fn not_found_handler(uri: Uri) -> AppError {
    AppError::not_found("Not found", json!({ "path": uri.path() }))
}
