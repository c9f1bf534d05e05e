use chrono::Utc;

use crate::application::dto::imports::{ImportKind, ImportPayload, ImportReport};
use crate::application::error::AppResult;
use crate::application::ports::import_history_repository::ImportHistoryRepository;
use crate::application::ports::transaction_repository::TransactionRepository;
use crate::application::services::imports::schemas::TRANSACTIONS;
use crate::application::use_cases::import_support::{load_records, partition, record_history, report};
use crate::application::use_cases::transactions::import_transactions::{RowPolicy, parse_row};

/// Best-effort import of a sales export: rows without a product are
/// rejected, everything else is filled with defaults and kept.
pub struct ImportSalesReport<'a, T, H>
where
    T: TransactionRepository + ?Sized,
    H: ImportHistoryRepository + ?Sized,
{
    pub ledger: &'a T,
    pub history: &'a H,
}

impl<'a, T, H> ImportSalesReport<'a, T, H>
where
    T: TransactionRepository + ?Sized,
    H: ImportHistoryRepository + ?Sized,
{
    pub async fn execute(&self, payload: &ImportPayload) -> AppResult<ImportReport> {
        let records = load_records(&TRANSACTIONS, payload)?;
        let now = Utc::now();
        let (rows, rejected) = partition(&records, |r| parse_row(r, RowPolicy::Lenient, now));
        let imported = if rows.is_empty() {
            0
        } else {
            self.ledger.import(&rows).await?
        };
        let report = report(rows.len(), imported, rejected);
        record_history(self.history, ImportKind::SalesReport, &payload.source, &report).await;
        Ok(report)
    }
}
