//! CLI administration tool for school-registry.
//!
//! Performs database maintenance and prints record counts without going
//! through the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # Check database connection
//! cargo run --bin admin -- db check
//!
//! # Apply pending migrations
//! cargo run --bin admin -- db migrate
//!
//! # Record counts, optionally narrowed to one department
//! cargo run --bin admin -- stats --department CS
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL`, or the `DB_HOST`/`DB_PORT`/`DB_USER`/`DB_PASSWORD`/`DB_NAME` components

use school_registry::config::{Config, mask_connection_string};
use school_registry::domain::entities::{CourseField, StudentField, TeacherField};
use school_registry::domain::query::{Filter, PageRequest, QueryField};
use school_registry::domain::repositories::{
    CourseRepository, StudentRepository, TeacherRepository,
};
use school_registry::infrastructure::persistence::{
    MIGRATOR, PgCourseRepository, PgStudentRepository, PgTeacherRepository,
};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use sqlx::PgPool;
use std::sync::Arc;

/// CLI tool for managing school-registry.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show record counts
    Stats {
        /// Count only teachers and courses of this department
        #[arg(short, long)]
        department: Option<String>,
    },

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,

    /// Show database info
    Info,

    /// Apply pending migrations
    Migrate,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let database_url = Config::load_database_url()?;

    let pool = PgPool::connect(&database_url)
        .await
        .with_context(|| {
            format!(
                "Failed to connect to database at {}",
                mask_connection_string(&database_url)
            )
        })?;

    match cli.command {
        Commands::Stats { department } => handle_stats(&pool, department).await?,
        Commands::Db { action } => handle_db_action(action, &pool).await?,
    }

    Ok(())
}

/// Single-row page request; only the total is read.
fn count_request<F: QueryField>() -> PageRequest<F> {
    PageRequest::new(None, Some(1), None)
}

async fn handle_stats(pool: &PgPool, department: Option<String>) -> Result<()> {
    let pool = Arc::new(pool.clone());
    let students = PgStudentRepository::new(pool.clone());
    let teachers = PgTeacherRepository::new(pool.clone());
    let courses = PgCourseRepository::new(pool);

    match &department {
        Some(d) => println!("{} {}", "📊 Statistics for".bright_blue().bold(), d.bold()),
        None => println!("{}", "📊 Statistics".bright_blue().bold()),
    }
    println!();

    let student_total = students
        .paginate(Filter::<StudentField>::new(), count_request())
        .await?
        .total_results;

    let teacher_total = teachers
        .paginate(
            Filter::new().with(TeacherField::Department, department.clone()),
            count_request(),
        )
        .await?
        .total_results;

    let course_total = courses
        .paginate(
            Filter::new().with(CourseField::Department, department),
            count_request(),
        )
        .await?
        .total_results;

    println!(
        "  Students: {}",
        student_total.to_string().bright_green().bold()
    );
    println!(
        "  Teachers: {}",
        teacher_total.to_string().bright_green().bold()
    );
    println!(
        "  Courses:  {}",
        course_total.to_string().bright_green().bold()
    );
    println!();

    Ok(())
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction, pool: &PgPool) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "🔍 Checking database connection...".bright_blue());

            sqlx::query("SELECT 1").fetch_one(pool).await?;

            println!("{}", "✅ Database connection OK".green().bold());
        }
        DbAction::Info => {
            println!("{}", "ℹ️  Database Information".bright_blue().bold());
            println!();

            let version: String = sqlx::query_scalar("SELECT version()")
                .fetch_one(pool)
                .await?;

            println!("  PostgreSQL: {}", version.bright_white());
            println!();
        }
        DbAction::Migrate => {
            println!("{}", "🚚 Applying migrations...".bright_blue());

            MIGRATOR
                .run(pool)
                .await
                .context("Failed to run migrations")?;

            println!("{}", "✅ Migrations applied".green().bold());
        }
    }

    Ok(())
}
