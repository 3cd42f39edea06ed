use sqlx::postgres::PgPoolOptions;
use sqlx::{Pool, Postgres};

pub mod query;
pub mod repositories;

pub type PgPool = Pool<Postgres>;

/// Each repository call checks a connection out of the pool for the span of
/// one statement or transaction; it returns on every exit path, including
/// errors.
pub async fn connect_pool(database_url: &str, max_connections: u32) -> anyhow::Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await?;
    Ok(pool)
}

pub async fn run_migrations(pool: &PgPool) -> anyhow::Result<()> {
    sqlx::migrate!("./migrations").run(pool).await?;
    Ok(())
}
