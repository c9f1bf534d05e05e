use crate::application::error::AppResult;
use crate::application::ports::import_history_repository::{
    ImportHistoryRepository, ImportHistoryRow,
};

const DEFAULT_LIMIT: i64 = 20;
const MAX_LIMIT: i64 = 200;

pub struct ListImportHistory<'a, H: ImportHistoryRepository + ?Sized> {
    pub history: &'a H,
}

impl<'a, H: ImportHistoryRepository + ?Sized> ListImportHistory<'a, H> {
    pub async fn execute(&self, limit: Option<i64>) -> AppResult<Vec<ImportHistoryRow>> {
        let limit = limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT);
        Ok(self.history.list_recent(limit).await?)
    }
}
