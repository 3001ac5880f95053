//! Repository trait definitions for the domain layer.
//!
//! Traits define the contract for data operations; implementations live in
//! `crate::infrastructure`. Every store must provide the same pagination
//! semantics (see [`crate::domain::query`]) so services never depend on
//! which store is wired in.
//!
//! # Available Repositories
//!
//! - [`StudentRepository`] - Student CRUD and pagination
//! - [`TeacherRepository`] - Teacher CRUD and pagination
//! - [`CourseRepository`] - Course CRUD and pagination
//! - [`StoreHealth`] - Backend liveness probe
//!
//! Mock implementations are generated via `mockall` for unit tests.

pub mod course_repository;
pub mod store_health;
pub mod student_repository;
pub mod teacher_repository;

pub use course_repository::CourseRepository;
pub use store_health::StoreHealth;
pub use student_repository::StudentRepository;
pub use teacher_repository::TeacherRepository;

#[cfg(test)]
pub use course_repository::MockCourseRepository;
#[cfg(test)]
pub use store_health::MockStoreHealth;
#[cfg(test)]
pub use student_repository::MockStudentRepository;
#[cfg(test)]
pub use teacher_repository::MockTeacherRepository;
