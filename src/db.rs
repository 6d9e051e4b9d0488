//! Database pool construction and embedded schema migrations.

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

/// Connects to Postgres at `database_url`. Callers fail fast on error;
/// the server is useless without its store.
pub async fn init_pool(database_url: &str) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .connect(database_url)
        .await
}

/// Applies the embedded migrations from `migrations/`. Safe to call on
/// every startup; sqlx tracks applied versions in the database.
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}
