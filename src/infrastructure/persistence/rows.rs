//! Row types returned by the PostgreSQL repositories.

use chrono::{DateTime, Utc};
use serde_json::json;
use sqlx::FromRow;
use uuid::Uuid;

use crate::domain::entities::{Course, Gender, Student, Teacher};
use crate::error::AppError;

pub const STUDENT_COLUMNS: &str =
    "id, name, email, gender, city, address, phone, created_at, updated_at";

pub const TEACHER_COLUMNS: &str =
    "id, name, email, gender, department, address, phone, created_at, updated_at";

pub const COURSE_COLUMNS: &str = "id, name, department, faculty, created_at, updated_at";

#[derive(Debug, FromRow)]
pub struct StudentRow {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub gender: String,
    pub city: String,
    pub address: String,
    pub phone: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, FromRow)]
pub struct TeacherRow {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub gender: String,
    pub department: String,
    pub address: String,
    pub phone: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, FromRow)]
pub struct CourseRow {
    pub id: Uuid,
    pub name: String,
    pub department: String,
    pub faculty: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

fn parse_gender(id: Uuid, value: &str) -> Result<Gender, AppError> {
    value.parse().map_err(|e| {
        tracing::error!(%id, error = %e, "Stored gender is not a known value");
        AppError::internal("Corrupt record", json!({ "id": id }))
    })
}

impl TryFrom<StudentRow> for Student {
    type Error = AppError;

    fn try_from(row: StudentRow) -> Result<Self, Self::Error> {
        Ok(Student {
            gender: parse_gender(row.id, &row.gender)?,
            id: row.id,
            name: row.name,
            email: row.email,
            city: row.city,
            address: row.address,
            phone: row.phone,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

impl TryFrom<TeacherRow> for Teacher {
    type Error = AppError;

    fn try_from(row: TeacherRow) -> Result<Self, Self::Error> {
        Ok(Teacher {
            gender: parse_gender(row.id, &row.gender)?,
            id: row.id,
            name: row.name,
            email: row.email,
            department: row.department,
            address: row.address,
            phone: row.phone,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

impl TryFrom<CourseRow> for Course {
    type Error = AppError;

    fn try_from(row: CourseRow) -> Result<Self, Self::Error> {
        Ok(Course {
            id: row.id,
            name: row.name,
            department: row.department,
            faculty: row.faculty,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}
