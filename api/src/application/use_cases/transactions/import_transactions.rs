use chrono::{DateTime, Utc};

use crate::application::dto::imports::{ImportKind, ImportPayload, ImportReport};
use crate::application::error::{AppError, AppResult};
use crate::application::ports::import_history_repository::ImportHistoryRepository;
use crate::application::ports::transaction_repository::TransactionRepository;
use crate::application::services::imports::RawRecord;
use crate::application::services::imports::schemas::TRANSACTIONS;
use crate::application::services::imports::values::{parse_amount, parse_count, parse_datetime};
use crate::application::use_cases::import_support::{load_records, partition, record_history, report};
use crate::domain::transactions::{DEFAULT_PAYMENT_METHOD, ImportedTransaction};

/// How forgiving the row parser is about missing cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowPolicy {
    /// date, product, quantity and total must all be present.
    Strict,
    /// Only the product is required; date defaults to `now`, quantity to 1,
    /// total to 0.
    Lenient,
}

pub fn parse_row(
    record: &RawRecord,
    policy: RowPolicy,
    now: DateTime<Utc>,
) -> Result<ImportedTransaction, String> {
    let product_name = record.require("product")?.to_string();
    let field = |column: &str| match policy {
        RowPolicy::Strict => record.require(column).map(Some),
        RowPolicy::Lenient => Ok(record.get(column)),
    };

    let occurred_at = match field("date")? {
        Some(raw) => parse_datetime(raw)?,
        None => now,
    };
    let quantity = match field("quantity")? {
        Some(raw) => parse_count(raw).map_err(|e| format!("quantity: {}", e))?,
        None => 1,
    };
    if quantity < 1 {
        return Err("quantity must be at least 1".into());
    }
    let total_price = match field("total")? {
        Some(raw) => parse_amount(raw).map_err(|e| format!("total: {}", e))?,
        None => 0,
    };
    if total_price < 0 {
        return Err("total cannot be negative".into());
    }
    Ok(ImportedTransaction {
        occurred_at,
        product_name,
        quantity,
        total_price,
        payment_method: record
            .get("payment")
            .unwrap_or(DEFAULT_PAYMENT_METHOD)
            .to_string(),
    })
}

/// All-or-nothing import of historical transactions.
pub struct ImportTransactions<'a, T, H>
where
    T: TransactionRepository + ?Sized,
    H: ImportHistoryRepository + ?Sized,
{
    pub ledger: &'a T,
    pub history: &'a H,
}

impl<'a, T, H> ImportTransactions<'a, T, H>
where
    T: TransactionRepository + ?Sized,
    H: ImportHistoryRepository + ?Sized,
{
    pub async fn execute(&self, payload: &ImportPayload) -> AppResult<ImportReport> {
        let records = load_records(&TRANSACTIONS, payload)?;
        let now = Utc::now();
        let (rows, rejected) =
            partition(&records, |r| parse_row(r, RowPolicy::Strict, now));
        if !rejected.is_empty() {
            let failed = report(rows.len(), 0, rejected);
            record_history(self.history, ImportKind::Transactions, &payload.source, &failed)
                .await;
            return Err(AppError::ImportRejected {
                rejected: failed.rejected,
            });
        }
        let imported = self.ledger.import(&rows).await?;
        let report = report(rows.len(), imported, Vec::new());
        record_history(self.history, ImportKind::Transactions, &payload.source, &report).await;
        Ok(report)
    }
}
