use sqlx::error::ErrorKind;
use sqlx::{Pool, Postgres};

use crate::application::ports::constraint::{ConstraintKind, ConstraintViolation};

pub type PgPool = Pool<Postgres>;

pub async fn connect_pool(database_url: &str) -> anyhow::Result<PgPool> {
    let pool = sqlx::postgres::PgPoolOptions::new()
        .max_connections(10)
        .connect(database_url)
        .await?;
    Ok(pool)
}

pub async fn migrate(pool: &PgPool) -> anyhow::Result<()> {
    // Uses compile-time embedded migrations under ./migrations
    sqlx::migrate!("./migrations").run(pool).await?;
    Ok(())
}

pub async fn ping(pool: &PgPool) -> anyhow::Result<()> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Wraps integrity violations in a [`ConstraintViolation`] so the
/// application layer can map them to client errors.
pub fn map_db_err(err: sqlx::Error) -> anyhow::Error {
    if let sqlx::Error::Database(ref db_err) = err {
        let kind = match db_err.kind() {
            ErrorKind::UniqueViolation => Some(ConstraintKind::Unique),
            ErrorKind::ForeignKeyViolation => Some(ConstraintKind::ForeignKey),
            ErrorKind::CheckViolation => Some(ConstraintKind::Check),
            _ => None,
        };
        if let Some(kind) = kind {
            return anyhow::Error::new(ConstraintViolation::new(kind, db_err.constraint()));
        }
    }
    anyhow::Error::new(err)
}

pub mod repositories;
