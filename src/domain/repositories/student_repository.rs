//! Repository trait for students.

use crate::domain::entities::{NewStudent, Student, StudentField, StudentPatch};
use crate::domain::query::{Filter, Page, PageRequest};
use crate::error::AppError;
use async_trait::async_trait;
use uuid::Uuid;

/// Repository interface for student records.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgStudentRepository`] - PostgreSQL implementation
/// - [`crate::infrastructure::memory::MemoryStore`] - in-process store
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StudentRepository: Send + Sync {
    /// Inserts a new student.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the unique email index rejects the row.
    /// Returns [`AppError::Internal`] on storage errors.
    async fn create(&self, new_student: NewStudent) -> Result<Student, AppError>;

    /// Finds a student by id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Student>, AppError>;

    /// Whether another student already uses `email`.
    ///
    /// `exclude_id` skips the record being updated. This is a plain read; the
    /// unique index is what actually guarantees uniqueness.
    async fn is_email_taken(&self, email: &str, exclude_id: Option<Uuid>)
    -> Result<bool, AppError>;

    /// Applies a partial update.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the student does not exist.
    /// Returns [`AppError::Conflict`] if the new email violates the unique index.
    async fn update(&self, id: Uuid, patch: StudentPatch) -> Result<Student, AppError>;

    /// Hard-deletes a student.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the student does not exist.
    async fn delete(&self, id: Uuid) -> Result<(), AppError>;

    /// Returns one page of students matching `filter`.
    async fn paginate(
        &self,
        filter: Filter<StudentField>,
        request: PageRequest<StudentField>,
    ) -> Result<Page<Student>, AppError>;
}
