//! PostgreSQL implementation of the teacher repository.

use async_trait::async_trait;
use chrono::Utc;
use serde_json::json;
use sqlx::PgPool;
use std::sync::Arc;
use uuid::Uuid;

use super::pg_query;
use super::rows::{TEACHER_COLUMNS, TeacherRow};
use crate::domain::entities::{NewTeacher, Teacher, TeacherField, TeacherPatch};
use crate::domain::query::{Filter, Page, PageRequest};
use crate::domain::repositories::TeacherRepository;
use crate::error::AppError;

/// PostgreSQL repository for teachers.
///
/// Email uniqueness is enforced by the `teachers_email_key` index on
/// `lower(email)`.
pub struct PgTeacherRepository {
    pool: Arc<PgPool>,
}

impl PgTeacherRepository {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TeacherRepository for PgTeacherRepository {
    async fn create(&self, new_teacher: NewTeacher) -> Result<Teacher, AppError> {
        let teacher = Teacher::create(new_teacher, Utc::now());

        let row = sqlx::query_as::<_, TeacherRow>(&format!(
            r#"
            INSERT INTO teachers (id, name, email, gender, department, address, phone, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING {TEACHER_COLUMNS}
            "#
        ))
        .bind(teacher.id)
        .bind(&teacher.name)
        .bind(&teacher.email)
        .bind(teacher.gender.as_str())
        .bind(&teacher.department)
        .bind(&teacher.address)
        .bind(&teacher.phone)
        .bind(teacher.created_at)
        .bind(teacher.updated_at)
        .fetch_one(self.pool.as_ref())
        .await?;

        row.try_into()
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Teacher>, AppError> {
        let row = sqlx::query_as::<_, TeacherRow>(&format!(
            "SELECT {TEACHER_COLUMNS} FROM teachers WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        row.map(Teacher::try_from).transpose()
    }

    async fn is_email_taken(
        &self,
        email: &str,
        exclude_id: Option<Uuid>,
    ) -> Result<bool, AppError> {
        let taken = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS (
                SELECT 1 FROM teachers
                WHERE lower(email) = lower($1)
                  AND ($2::uuid IS NULL OR id <> $2)
            )
            "#,
        )
        .bind(email)
        .bind(exclude_id)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(taken)
    }

    async fn update(&self, id: Uuid, patch: TeacherPatch) -> Result<Teacher, AppError> {
        let row = sqlx::query_as::<_, TeacherRow>(&format!(
            r#"
            UPDATE teachers SET
                name       = COALESCE($2, name),
                email      = COALESCE($3, email),
                gender     = COALESCE($4, gender),
                department = COALESCE($5, department),
                address    = COALESCE($6, address),
                phone      = COALESCE($7, phone),
                updated_at = NOW()
            WHERE id = $1
            RETURNING {TEACHER_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(patch.name)
        .bind(patch.email)
        .bind(patch.gender.map(|g| g.as_str()))
        .bind(patch.department)
        .bind(patch.address)
        .bind(patch.phone)
        .fetch_optional(self.pool.as_ref())
        .await?;

        row.map(Teacher::try_from)
            .transpose()?
            .ok_or_else(|| AppError::not_found("Teacher not found", json!({ "id": id })))
    }

    async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM teachers WHERE id = $1")
            .bind(id)
            .execute(self.pool.as_ref())
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(
                "Teacher not found",
                json!({ "id": id }),
            ));
        }

        Ok(())
    }

    async fn paginate(
        &self,
        filter: Filter<TeacherField>,
        request: PageRequest<TeacherField>,
    ) -> Result<Page<Teacher>, AppError> {
        pg_query::paginate::<Teacher, TeacherRow, _>(
            &self.pool,
            "teachers",
            TEACHER_COLUMNS,
            &filter,
            &request,
        )
        .await
    }
}
