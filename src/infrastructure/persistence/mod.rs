//! PostgreSQL repository implementations.
//!
//! Concrete implementations of the domain repository traits using SQLx.
//! Paginated queries are assembled at runtime with `sqlx::QueryBuilder`
//! (see [`pg_query`]).
//!
//! # Repositories
//!
//! - [`PgStudentRepository`] - Student storage
//! - [`PgTeacherRepository`] - Teacher storage
//! - [`PgCourseRepository`] - Course storage
//! - [`PgHealth`] - Connectivity probe

pub mod pg_course_repository;
pub mod pg_health;
pub mod pg_query;
pub mod pg_student_repository;
pub mod pg_teacher_repository;
pub mod rows;

pub use pg_course_repository::PgCourseRepository;
pub use pg_health::PgHealth;
pub use pg_student_repository::PgStudentRepository;
pub use pg_teacher_repository::PgTeacherRepository;

/// Embedded migrations from `./migrations`.
pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("./migrations");
