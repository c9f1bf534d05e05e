use async_trait::async_trait;
use sqlx::Row;

use crate::application::dto::imports::{ImportKind, ImportStatus};
use crate::application::ports::import_history_repository::{
    ImportHistoryRepository, ImportHistoryRow,
};
use crate::infrastructure::db::PgPool;

pub struct SqlxImportHistoryRepository {
    pub pool: PgPool,
}

impl SqlxImportHistoryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ImportHistoryRepository for SqlxImportHistoryRepository {
    async fn record(
        &self,
        kind: ImportKind,
        row_count: u64,
        status: ImportStatus,
        source: &str,
    ) -> anyhow::Result<()> {
        sqlx::query(
            "INSERT INTO import_history (kind, row_count, status, source) VALUES ($1, $2, $3, $4)",
        )
        .bind(kind.as_str())
        .bind(i64::try_from(row_count)?)
        .bind(status.as_str())
        .bind(source)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn list_recent(&self, limit: i64) -> anyhow::Result<Vec<ImportHistoryRow>> {
        let rows = sqlx::query(
            r#"SELECT id, kind, row_count, status, source, created_at
               FROM import_history
               ORDER BY created_at DESC, id DESC
               LIMIT $1"#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows
            .into_iter()
            .map(|r| ImportHistoryRow {
                id: r.get("id"),
                kind: r.get("kind"),
                row_count: r.get("row_count"),
                status: r.get("status"),
                source: r.get("source"),
                created_at: r.get("created_at"),
            })
            .collect())
    }
}
