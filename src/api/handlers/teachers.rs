//! Handlers for `/v1/teachers`.

use axum::{Json, extract::State, http::StatusCode};

use crate::api::dto::teacher::{
    CreateTeacherRequest, TeacherListQuery, TeacherPath, TeacherResponse, UpdateTeacherRequest,
};
use crate::api::validation::{ValidatedJson, ValidatedPath, ValidatedPathJson, ValidatedQuery};
use crate::domain::query::Page;
use crate::error::AppError;
use crate::state::AppState;

/// Creates a teacher.
///
/// # Endpoint
///
/// `POST /v1/teachers`
///
/// # Errors
///
/// - **400** `validation_error` for a malformed body
/// - **400** `conflict` when the email is already taken
pub async fn create_teacher_handler(
    State(state): State<AppState>,
    ValidatedJson(body): ValidatedJson<CreateTeacherRequest>,
) -> Result<(StatusCode, Json<TeacherResponse>), AppError> {
    let teacher = state.teacher_service.create_teacher(body.try_into()?).await?;

    Ok((StatusCode::CREATED, Json(teacher.into())))
}

/// Lists teachers.
///
/// # Endpoint
///
/// `GET /v1/teachers?name=&email=&gender=&department=&address=&sortBy=&limit=&page=`
///
/// Filter values containing `*` are case-insensitive wildcard patterns.
pub async fn list_teachers_handler(
    State(state): State<AppState>,
    ValidatedQuery(query): ValidatedQuery<TeacherListQuery>,
) -> Result<Json<Page<TeacherResponse>>, AppError> {
    let (filter, request) = query.into_parts();
    let page = state.teacher_service.query_teachers(filter, request).await?;

    Ok(Json(page.map(TeacherResponse::from)))
}

/// `GET /v1/teachers/{teacherId}`
pub async fn get_teacher_handler(
    State(state): State<AppState>,
    ValidatedPath(path): ValidatedPath<TeacherPath>,
) -> Result<Json<TeacherResponse>, AppError> {
    let teacher = state
        .teacher_service
        .get_teacher_by_id(path.teacher_id)
        .await?;

    Ok(Json(teacher.into()))
}

/// `PATCH /v1/teachers/{teacherId}`
pub async fn update_teacher_handler(
    State(state): State<AppState>,
    ValidatedPathJson(path, body): ValidatedPathJson<TeacherPath, UpdateTeacherRequest>,
) -> Result<Json<TeacherResponse>, AppError> {
    let teacher = state
        .teacher_service
        .update_teacher_by_id(path.teacher_id, body.try_into()?)
        .await?;

    Ok(Json(teacher.into()))
}

/// `DELETE /v1/teachers/{teacherId}`, responds 204 with an empty body.
pub async fn delete_teacher_handler(
    State(state): State<AppState>,
    ValidatedPath(path): ValidatedPath<TeacherPath>,
) -> Result<StatusCode, AppError> {
    state
        .teacher_service
        .delete_teacher_by_id(path.teacher_id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
