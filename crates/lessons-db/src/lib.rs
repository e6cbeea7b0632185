//! # Lessons DB
//!
//! Database pool, embedded migrations and the store error taxonomy for the
//! Lessons API.
//!
//! Repositories talk to Postgres through SQLx and return [`StoreResult`]. The
//! store's own constraint enforcement is authoritative: a duplicate
//! `(sequence, date)` pair or a dangling `lesson_id` surfaces as
//! [`StoreError::DuplicateKey`] / [`StoreError::ForeignKey`] so callers never
//! inspect SQLSTATE codes themselves.
//!
//! # Example
//!
//! ```ignore
//! use lessons_config::DatabaseConfig;
//! use lessons_db::{init_db_pool, run_migrations};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = DatabaseConfig::from_env().expect("DATABASE_URL must be set");
//!     let pool = init_db_pool(&config).await?;
//!     run_migrations(&pool).await?;
//!     Ok(())
//! }
//! ```

pub mod error;

use lessons_config::DatabaseConfig;
use sqlx::postgres::PgPoolOptions;

pub use error::{StoreError, StoreResult};

// Re-export PgPool for convenience
pub use sqlx::PgPool;

/// Initializes a PostgreSQL connection pool.
///
/// The returned pool is cheaply cloneable and is stored in the application
/// state for use in request handlers.
pub async fn init_db_pool(config: &DatabaseConfig) -> Result<PgPool, sqlx::Error> {
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect(&config.url)
        .await?;

    tracing::info!(
        max_connections = config.max_connections,
        "Database pool initialized"
    );

    Ok(pool)
}

/// Applies the migrations embedded from the workspace `migrations/` directory.
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("../../migrations").run(pool).await?;
    tracing::info!("Database migrations applied");
    Ok(())
}

/// Round-trips a trivial query. Used by the health endpoint.
pub async fn ping(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::query_scalar::<_, i32>("SELECT 1")
        .fetch_one(pool)
        .await
        .map(|_| ())
}
