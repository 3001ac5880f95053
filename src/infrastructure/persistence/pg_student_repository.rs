//! PostgreSQL implementation of the student repository.

use async_trait::async_trait;
use chrono::Utc;
use serde_json::json;
use sqlx::PgPool;
use std::sync::Arc;
use uuid::Uuid;

use super::pg_query;
use super::rows::{STUDENT_COLUMNS, StudentRow};
use crate::domain::entities::{NewStudent, Student, StudentField, StudentPatch};
use crate::domain::query::{Filter, Page, PageRequest};
use crate::domain::repositories::StudentRepository;
use crate::error::AppError;

/// PostgreSQL repository for students.
///
/// Email uniqueness is enforced by the `students_email_key` index on
/// `lower(email)`.
pub struct PgStudentRepository {
    pool: Arc<PgPool>,
}

impl PgStudentRepository {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl StudentRepository for PgStudentRepository {
    async fn create(&self, new_student: NewStudent) -> Result<Student, AppError> {
        let student = Student::create(new_student, Utc::now());

        let row = sqlx::query_as::<_, StudentRow>(&format!(
            r#"
            INSERT INTO students (id, name, email, gender, city, address, phone, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING {STUDENT_COLUMNS}
            "#
        ))
        .bind(student.id)
        .bind(&student.name)
        .bind(&student.email)
        .bind(student.gender.as_str())
        .bind(&student.city)
        .bind(&student.address)
        .bind(&student.phone)
        .bind(student.created_at)
        .bind(student.updated_at)
        .fetch_one(self.pool.as_ref())
        .await?;

        row.try_into()
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Student>, AppError> {
        let row = sqlx::query_as::<_, StudentRow>(&format!(
            "SELECT {STUDENT_COLUMNS} FROM students WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        row.map(Student::try_from).transpose()
    }

    async fn is_email_taken(
        &self,
        email: &str,
        exclude_id: Option<Uuid>,
    ) -> Result<bool, AppError> {
        let taken = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS (
                SELECT 1 FROM students
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

    async fn update(&self, id: Uuid, patch: StudentPatch) -> Result<Student, AppError> {
        let row = sqlx::query_as::<_, StudentRow>(&format!(
            r#"
            UPDATE students SET
                name       = COALESCE($2, name),
                email      = COALESCE($3, email),
                gender     = COALESCE($4, gender),
                city       = COALESCE($5, city),
                address    = COALESCE($6, address),
                phone      = COALESCE($7, phone),
                updated_at = NOW()
            WHERE id = $1
            RETURNING {STUDENT_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(patch.name)
        .bind(patch.email)
        .bind(patch.gender.map(|g| g.as_str()))
        .bind(patch.city)
        .bind(patch.address)
        .bind(patch.phone)
        .fetch_optional(self.pool.as_ref())
        .await?;

        row.map(Student::try_from)
            .transpose()?
            .ok_or_else(|| AppError::not_found("Student not found", json!({ "id": id })))
    }

    async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM students WHERE id = $1")
            .bind(id)
            .execute(self.pool.as_ref())
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(
                "Student not found",
                json!({ "id": id }),
            ));
        }

        Ok(())
    }

    async fn paginate(
        &self,
        filter: Filter<StudentField>,
        request: PageRequest<StudentField>,
    ) -> Result<Page<Student>, AppError> {
        pg_query::paginate::<Student, StudentRow, _>(
            &self.pool,
            "students",
            STUDENT_COLUMNS,
            &filter,
            &request,
        )
        .await
    }
}
