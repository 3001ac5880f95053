//! Repository trait for courses.

use crate::domain::entities::{Course, CourseField, CoursePatch, NewCourse};
use crate::domain::query::{Filter, Page, PageRequest};
use crate::error::AppError;
use async_trait::async_trait;
use uuid::Uuid;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CourseRepository: Send + Sync {
    async fn create(&self, new_course: NewCourse) -> Result<Course, AppError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Course>, AppError>;

    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the course does not exist.
    async fn update(&self, id: Uuid, patch: CoursePatch) -> Result<Course, AppError>;

    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the course does not exist.
    async fn delete(&self, id: Uuid) -> Result<(), AppError>;

    async fn paginate(
        &self,
        filter: Filter<CourseField>,
        request: PageRequest<CourseField>,
    ) -> Result<Page<Course>, AppError>;
}
