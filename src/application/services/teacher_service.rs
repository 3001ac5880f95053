//! Teacher management service.

use crate::domain::entities::{NewTeacher, Teacher, TeacherField, TeacherPatch};
use crate::domain::query::{Filter, Page, PageRequest};
use crate::domain::repositories::TeacherRepository;
use crate::error::AppError;
use serde_json::json;
use std::sync::Arc;
use uuid::Uuid;

/// Service for teacher records.
///
/// Same uniqueness rules as [`super::StudentService`].
pub struct TeacherService<R: TeacherRepository + ?Sized> {
    repository: Arc<R>,
}

impl<R: TeacherRepository + ?Sized> TeacherService<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the email is already taken.
    pub async fn create_teacher(&self, new_teacher: NewTeacher) -> Result<Teacher, AppError> {
        if self
            .repository
            .is_email_taken(&new_teacher.email, None)
            .await?
        {
            tracing::debug!(email = %new_teacher.email, "Teacher email already taken");
            return Err(AppError::email_taken(&new_teacher.email));
        }

        let teacher = self.repository.create(new_teacher).await?;
        tracing::info!(id = %teacher.id, "Teacher created");
        Ok(teacher)
    }

    pub async fn query_teachers(
        &self,
        filter: Filter<TeacherField>,
        request: PageRequest<TeacherField>,
    ) -> Result<Page<Teacher>, AppError> {
        self.repository.paginate(filter, request).await
    }

    pub async fn get_teacher_by_id(&self, id: Uuid) -> Result<Teacher, AppError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Teacher not found", json!({ "id": id })))
    }

    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the teacher does not exist.
    /// Returns [`AppError::Conflict`] if the new email belongs to another teacher.
    pub async fn update_teacher_by_id(
        &self,
        id: Uuid,
        patch: TeacherPatch,
    ) -> Result<Teacher, AppError> {
        self.get_teacher_by_id(id).await?;

        if let Some(email) = &patch.email
            && self.repository.is_email_taken(email, Some(id)).await?
        {
            tracing::debug!(%id, %email, "Teacher email already taken");
            return Err(AppError::email_taken(email));
        }

        let teacher = self.repository.update(id, patch).await?;
        tracing::info!(%id, "Teacher updated");
        Ok(teacher)
    }

    pub async fn delete_teacher_by_id(&self, id: Uuid) -> Result<(), AppError> {
        self.get_teacher_by_id(id).await?;
        self.repository.delete(id).await?;
        tracing::info!(%id, "Teacher deleted");
        Ok(())
    }
}
