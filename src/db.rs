use anyhow::Context;
use sqlx::migrate::Migrator;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use std::time::Duration;

static MIGRATOR: Migrator = sqlx::migrate!();

/// Builds a connection pool for the database at [db_url]. Connections are established lazily,
/// so this does not fail if the database is temporarily unreachable.
pub async fn connect_sqlx(db_url: &str) -> Result<PgPool, anyhow::Error> {
    let pool = PgPoolOptions::new()
        .max_connections(20)
        .acquire_timeout(Duration::from_secs(2))
        .connect_lazy(db_url)
        .context("parsing the database connection string")?;

    Ok(pool)
}

/// Brings the schema up to date with the migrations embedded from the `migrations/` directory
pub async fn run_migrations(pool: &PgPool) -> Result<(), anyhow::Error> {
    MIGRATOR
        .run(pool)
        .await
        .context("applying database migrations")?;

    Ok(())
}
