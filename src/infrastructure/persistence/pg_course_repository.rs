//! PostgreSQL implementation of the course repository.

use async_trait::async_trait;
use chrono::Utc;
use serde_json::json;
use sqlx::PgPool;
use std::sync::Arc;
use uuid::Uuid;

use super::pg_query;
use super::rows::{COURSE_COLUMNS, CourseRow};
use crate::domain::entities::{Course, CourseField, CoursePatch, NewCourse};
use crate::domain::query::{Filter, Page, PageRequest};
use crate::domain::repositories::CourseRepository;
use crate::error::AppError;

pub struct PgCourseRepository {
    pool: Arc<PgPool>,
}

impl PgCourseRepository {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CourseRepository for PgCourseRepository {
    async fn create(&self, new_course: NewCourse) -> Result<Course, AppError> {
        let course = Course::create(new_course, Utc::now());

        let row = sqlx::query_as::<_, CourseRow>(&format!(
            r#"
            INSERT INTO courses (id, name, department, faculty, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {COURSE_COLUMNS}
            "#
        ))
        .bind(course.id)
        .bind(&course.name)
        .bind(&course.department)
        .bind(&course.faculty)
        .bind(course.created_at)
        .bind(course.updated_at)
        .fetch_one(self.pool.as_ref())
        .await?;

        row.try_into()
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Course>, AppError> {
        let row = sqlx::query_as::<_, CourseRow>(&format!(
            "SELECT {COURSE_COLUMNS} FROM courses WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        row.map(Course::try_from).transpose()
    }

    async fn update(&self, id: Uuid, patch: CoursePatch) -> Result<Course, AppError> {
        let row = sqlx::query_as::<_, CourseRow>(&format!(
            r#"
            UPDATE courses SET
                name       = COALESCE($2, name),
                department = COALESCE($3, department),
                faculty    = COALESCE($4, faculty),
                updated_at = NOW()
            WHERE id = $1
            RETURNING {COURSE_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(patch.name)
        .bind(patch.department)
        .bind(patch.faculty)
        .fetch_optional(self.pool.as_ref())
        .await?;

        row.map(Course::try_from)
            .transpose()?
            .ok_or_else(|| AppError::not_found("Course not found", json!({ "id": id })))
    }

    async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM courses WHERE id = $1")
            .bind(id)
            .execute(self.pool.as_ref())
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found("Course not found", json!({ "id": id })));
        }

        Ok(())
    }

    async fn paginate(
        &self,
        filter: Filter<CourseField>,
        request: PageRequest<CourseField>,
    ) -> Result<Page<Course>, AppError> {
        pg_query::paginate::<Course, CourseRow, _>(
            &self.pool,
            "courses",
            COURSE_COLUMNS,
            &filter,
            &request,
        )
        .await
    }
}
