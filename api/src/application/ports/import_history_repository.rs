use async_trait::async_trait;

use crate::application::dto::imports::{ImportKind, ImportStatus};

#[derive(Debug, Clone)]
pub struct ImportHistoryRow {
    pub id: i64,
    pub kind: String,
    pub row_count: i64,
    pub status: String,
    pub source: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[async_trait]
pub trait ImportHistoryRepository: Send + Sync {
    async fn record(
        &self,
        kind: ImportKind,
        row_count: u64,
        status: ImportStatus,
        source: &str,
    ) -> anyhow::Result<()>;
    async fn list_recent(&self, limit: i64) -> anyhow::Result<Vec<ImportHistoryRow>>;
}
