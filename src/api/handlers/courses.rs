//! Handlers for `/v1/courses`.

use axum::{Json, extract::State, http::StatusCode};

use crate::api::dto::course::{
    CourseListQuery, CoursePath, CourseResponse, CreateCourseRequest, UpdateCourseRequest,
};
use crate::api::validation::{ValidatedJson, ValidatedPath, ValidatedPathJson, ValidatedQuery};
use crate::domain::query::Page;
use crate::error::AppError;
use crate::state::AppState;

/// `POST /v1/courses`
pub async fn create_course_handler(
    State(state): State<AppState>,
    ValidatedJson(body): ValidatedJson<CreateCourseRequest>,
) -> Result<(StatusCode, Json<CourseResponse>), AppError> {
    let course = state.course_service.create_course(body.into()).await?;

    Ok((StatusCode::CREATED, Json(course.into())))
}

/// `GET /v1/courses?name=&department=&faculty=&sortBy=&limit=&page=`
pub async fn list_courses_handler(
    State(state): State<AppState>,
    ValidatedQuery(query): ValidatedQuery<CourseListQuery>,
) -> Result<Json<Page<CourseResponse>>, AppError> {
    let (filter, request) = query.into_parts();
    let page = state.course_service.query_courses(filter, request).await?;

    Ok(Json(page.map(CourseResponse::from)))
}

pub async fn get_course_handler(
    State(state): State<AppState>,
    ValidatedPath(path): ValidatedPath<CoursePath>,
) -> Result<Json<CourseResponse>, AppError> {
    let course = state.course_service.get_course_by_id(path.course_id).await?;

    Ok(Json(course.into()))
}

pub async fn update_course_handler(
    State(state): State<AppState>,
    ValidatedPathJson(path, body): ValidatedPathJson<CoursePath, UpdateCourseRequest>,
) -> Result<Json<CourseResponse>, AppError> {
    let course = state
        .course_service
        .update_course_by_id(path.course_id, body.into())
        .await?;

    Ok(Json(course.into()))
}

pub async fn delete_course_handler(
    State(state): State<AppState>,
    ValidatedPath(path): ValidatedPath<CoursePath>,
) -> Result<StatusCode, AppError> {
    state.course_service.delete_course_by_id(path.course_id).await?;

    Ok(StatusCode::NO_CONTENT)
}
