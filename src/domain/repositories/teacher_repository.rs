//! Repository trait for teachers.

use crate::domain::entities::{NewTeacher, Teacher, TeacherField, TeacherPatch};
use crate::domain::query::{Filter, Page, PageRequest};
use crate::error::AppError;
use async_trait::async_trait;
use uuid::Uuid;

/// Repository interface for teacher records.
///
/// Same contract as [`super::StudentRepository`]: email is unique and the
/// store's unique index backs up [`TeacherRepository::is_email_taken`].
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TeacherRepository: Send + Sync {
    async fn create(&self, new_teacher: NewTeacher) -> Result<Teacher, AppError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Teacher>, AppError>;

    async fn is_email_taken(&self, email: &str, exclude_id: Option<Uuid>)
    -> Result<bool, AppError>;

    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the teacher does not exist.
    async fn update(&self, id: Uuid, patch: TeacherPatch) -> Result<Teacher, AppError>;

    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the teacher does not exist.
    async fn delete(&self, id: Uuid) -> Result<(), AppError>;

    async fn paginate(
        &self,
        filter: Filter<TeacherField>,
        request: PageRequest<TeacherField>,
    ) -> Result<Page<Teacher>, AppError>;
}
