use chrono::NaiveDate;

use crate::application::error::{AppError, AppResult};
use crate::application::ports::transaction_repository::{TransactionFilter, TransactionRepository};
use crate::domain::transactions::Transaction;

pub const DEFAULT_LIMIT: i64 = 100;
pub const MAX_LIMIT: i64 = 500;

pub struct ListTransactions<'a, T: TransactionRepository + ?Sized> {
    pub ledger: &'a T,
}

impl<'a, T: TransactionRepository + ?Sized> ListTransactions<'a, T> {
    pub async fn execute(
        &self,
        customer_id: Option<i64>,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
        limit: Option<i64>,
    ) -> AppResult<Vec<Transaction>> {
        if let (Some(s), Some(e)) = (start, end) {
            if s > e {
                return Err(AppError::validation(format!(
                    "start date {} is after end date {}",
                    s, e
                )));
            }
        }
        let filter = TransactionFilter {
            customer_id,
            start,
            end,
            limit: limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT),
        };
        Ok(self.ledger.list(&filter).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::transaction_repository::LedgerEntry;
    use crate::application::use_cases::test_support::MemoryStore;

    #[tokio::test]
    async fn filters_by_customer_newest_first() {
        let store = MemoryStore::default();
        let a = store.seed_customer("Budi", "081200000001", 0);
        let b = store.seed_customer("Siti", "081200000002", 0);
        for (customer_id, name) in [(a.id, "Latte"), (b.id, "Mocha"), (a.id, "Tea")] {
            store
                .apply(&LedgerEntry {
                    customer_id,
                    product_id: None,
                    reward_id: None,
                    product_name: name.into(),
                    quantity: 1,
                    total_price: 10_000,
                    payment_method: "Cash".into(),
                    points_delta: 1,
                })
                .await
                .unwrap();
        }
        let uc = ListTransactions { ledger: &store };
        let rows = uc.execute(Some(a.id), None, None, None).await.unwrap();
        let names: Vec<&str> = rows.iter().map(|t| t.product_name.as_str()).collect();
        assert_eq!(names, vec!["Tea", "Latte"]);
        let one = uc.execute(None, None, None, Some(1)).await.unwrap();
        assert_eq!(one.len(), 1);
    }
}
