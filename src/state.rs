//! Shared application state injected into every handler.

use sqlx::PgPool;
use std::sync::Arc;

use crate::application::services::{CourseService, StudentService, TeacherService};
use crate::domain::entities::{Course, Student, Teacher};
use crate::domain::repositories::{
    CourseRepository, StoreHealth, StudentRepository, TeacherRepository,
};
use crate::infrastructure::memory::{MemoryHealth, MemoryStore};
use crate::infrastructure::persistence::{
    PgCourseRepository, PgHealth, PgStudentRepository, PgTeacherRepository,
};

#[derive(Clone)]
pub struct AppState {
    pub student_service: Arc<StudentService<dyn StudentRepository>>,
    pub teacher_service: Arc<TeacherService<dyn TeacherRepository>>,
    pub course_service: Arc<CourseService<dyn CourseRepository>>,
    pub store_health: Arc<dyn StoreHealth>,
}

impl AppState {
    pub fn new(
        students: Arc<dyn StudentRepository>,
        teachers: Arc<dyn TeacherRepository>,
        courses: Arc<dyn CourseRepository>,
        store_health: Arc<dyn StoreHealth>,
    ) -> Self {
        Self {
            student_service: Arc::new(StudentService::new(students)),
            teacher_service: Arc::new(TeacherService::new(teachers)),
            course_service: Arc::new(CourseService::new(courses)),
            store_health,
        }
    }

    /// State backed by PostgreSQL repositories sharing one pool.
    pub fn postgres(pool: Arc<PgPool>) -> Self {
        Self::new(
            Arc::new(PgStudentRepository::new(pool.clone())),
            Arc::new(PgTeacherRepository::new(pool.clone())),
            Arc::new(PgCourseRepository::new(pool.clone())),
            Arc::new(PgHealth::new(pool)),
        )
    }

    /// State backed by empty in-process stores.
    pub fn in_memory() -> Self {
        Self::new(
            Arc::new(MemoryStore::<Student>::new()),
            Arc::new(MemoryStore::<Teacher>::new()),
            Arc::new(MemoryStore::<Course>::new()),
            Arc::new(MemoryHealth),
        )
    }
}
