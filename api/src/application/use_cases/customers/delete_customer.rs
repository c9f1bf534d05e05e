use crate::application::error::{AppError, AppResult};
use crate::application::ports::customer_repository::CustomerRepository;

pub struct DeleteCustomer<'a, R: CustomerRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: CustomerRepository + ?Sized> DeleteCustomer<'a, R> {
    pub async fn execute(&self, id: i64) -> AppResult<()> {
        if self.repo.count_transactions(id).await? > 0 {
            return Err(AppError::conflict("customer has transaction history"));
        }
        if !self.repo.delete(id).await? {
            return Err(AppError::not_found("customer not found"));
        }
        tracing::info!(customer_id = id, "customer_deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::transaction_repository::{LedgerEntry, TransactionRepository};
    use crate::application::use_cases::test_support::MemoryStore;

    #[tokio::test]
    async fn customer_with_history_is_kept() {
        let store = MemoryStore::default();
        let c = store.seed_customer("Budi", "081211112222", 0);
        store
            .apply(&LedgerEntry {
                customer_id: c.id,
                product_id: None,
                reward_id: None,
                product_name: "Kopi".into(),
                quantity: 1,
                total_price: 18_000,
                payment_method: "Cash".into(),
                points_delta: 1,
            })
            .await
            .unwrap();
        let uc = DeleteCustomer { repo: &store };
        assert!(matches!(uc.execute(c.id).await, Err(AppError::Conflict(_))));
        assert!(store.customer(c.id).is_some());
    }

    #[tokio::test]
    async fn deletes_and_reports_missing() {
        let store = MemoryStore::default();
        let c = store.seed_customer("Budi", "081211112222", 0);
        let uc = DeleteCustomer { repo: &store };
        uc.execute(c.id).await.unwrap();
        assert!(matches!(uc.execute(c.id).await, Err(AppError::NotFound(_))));
    }
}
