//! PostgreSQL persistence for the collection tracker.
//!
//! - [`models`]: row structs and create/update DTOs
//! - [`repositories`]: zero-sized repos with async CRUD functions
//! - [`collection_store`]: the [`CollectionStore`](tankobon_core::store::CollectionStore)
//!   implementation used by imports and the shared-collection query

use sqlx::postgres::PgPoolOptions;

pub mod collection_store;
pub mod models;
pub mod repositories;

pub use collection_store::PgCollectionStore;

pub type DbPool = sqlx::PgPool;

/// Create a connection pool from a database URL.
pub async fn create_pool(database_url: &str) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(20)
        .connect(database_url)
        .await
}

/// Round-trip a trivial query to verify the pool can reach the database.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Apply all pending migrations from `crates/db/migrations`.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}
