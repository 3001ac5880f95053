//! API route configuration.

use crate::api::handlers::{
    create_course_handler, create_student_handler, create_teacher_handler, delete_course_handler,
    delete_student_handler, delete_teacher_handler, get_course_handler, get_student_handler,
    get_teacher_handler, list_courses_handler, list_students_handler, list_teachers_handler,
    update_course_handler, update_student_handler, update_teacher_handler,
};
use crate::state::AppState;
use axum::{Router, routing::get};

/// Resource routes, mounted under `/v1`.
///
/// # Endpoints
///
/// - `POST   /students`               - Create a student
/// - `GET    /students`               - List students (filter, sort, paginate)
/// - `GET    /students/{studentId}`   - Fetch a student
/// - `PATCH  /students/{studentId}`   - Partially update a student
/// - `DELETE /students/{studentId}`   - Delete a student
///
/// `/teachers/{teacherId}` and `/courses/{courseId}` follow the same shape.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/students",
            get(list_students_handler).post(create_student_handler),
        )
        .route(
            "/students/{studentId}",
            get(get_student_handler)
                .patch(update_student_handler)
                .delete(delete_student_handler),
        )
        .route(
            "/teachers",
            get(list_teachers_handler).post(create_teacher_handler),
        )
        .route(
            "/teachers/{teacherId}",
            get(get_teacher_handler)
                .patch(update_teacher_handler)
                .delete(delete_teacher_handler),
        )
        .route(
            "/courses",
            get(list_courses_handler).post(create_course_handler),
        )
        .route(
            "/courses/{courseId}",
            get(get_course_handler)
                .patch(update_course_handler)
                .delete(delete_course_handler),
        )
}
