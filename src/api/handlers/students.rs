//! Handlers for `/v1/students`.

use axum::{Json, extract::State, http::StatusCode};

use crate::api::dto::student::{
    CreateStudentRequest, StudentListQuery, StudentPath, StudentResponse, UpdateStudentRequest,
};
use crate::api::validation::{ValidatedJson, ValidatedPath, ValidatedPathJson, ValidatedQuery};
use crate::domain::query::Page;
use crate::error::AppError;
use crate::state::AppState;

/// Creates a student.
///
/// # Endpoint
///
/// `POST /v1/students`
///
/// # Errors
///
/// - **400** `validation_error` for a malformed body
/// - **400** `conflict` when the email is already taken
pub async fn create_student_handler(
    State(state): State<AppState>,
    ValidatedJson(body): ValidatedJson<CreateStudentRequest>,
) -> Result<(StatusCode, Json<StudentResponse>), AppError> {
    let student = state.student_service.create_student(body.try_into()?).await?;

    Ok((StatusCode::CREATED, Json(student.into())))
}

/// Lists students.
///
/// # Endpoint
///
/// `GET /v1/students?name=&email=&gender=&city=&address=&sortBy=&limit=&page=`
///
/// Filter values containing `*` are case-insensitive wildcard patterns.
pub async fn list_students_handler(
    State(state): State<AppState>,
    ValidatedQuery(query): ValidatedQuery<StudentListQuery>,
) -> Result<Json<Page<StudentResponse>>, AppError> {
    let (filter, request) = query.into_parts();
    let page = state.student_service.query_students(filter, request).await?;

    Ok(Json(page.map(StudentResponse::from)))
}

/// `GET /v1/students/{studentId}`
pub async fn get_student_handler(
    State(state): State<AppState>,
    ValidatedPath(path): ValidatedPath<StudentPath>,
) -> Result<Json<StudentResponse>, AppError> {
    let student = state
        .student_service
        .get_student_by_id(path.student_id)
        .await?;

    Ok(Json(student.into()))
}

/// `PATCH /v1/students/{studentId}`
pub async fn update_student_handler(
    State(state): State<AppState>,
    ValidatedPathJson(path, body): ValidatedPathJson<StudentPath, UpdateStudentRequest>,
) -> Result<Json<StudentResponse>, AppError> {
    let student = state
        .student_service
        .update_student_by_id(path.student_id, body.try_into()?)
        .await?;

    Ok(Json(student.into()))
}

/// `DELETE /v1/students/{studentId}`, responds 204 with an empty body.
pub async fn delete_student_handler(
    State(state): State<AppState>,
    ValidatedPath(path): ValidatedPath<StudentPath>,
) -> Result<StatusCode, AppError> {
    state
        .student_service
        .delete_student_by_id(path.student_id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
