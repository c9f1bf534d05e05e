use async_trait::async_trait;

use crate::domain::customers::{Customer, CustomerPatch, NewCustomer};

#[async_trait]
pub trait CustomerRepository: Send + Sync {
    /// Newest first. `search` matches name, email or phone.
    async fn list(&self, search: Option<String>) -> anyhow::Result<Vec<Customer>>;
    async fn get(&self, id: i64) -> anyhow::Result<Option<Customer>>;
    async fn find_by_phone(
        &self,
        phone: &str,
        exclude_id: Option<i64>,
    ) -> anyhow::Result<Option<Customer>>;
    async fn create(&self, input: &NewCustomer) -> anyhow::Result<Customer>;
    /// The tier is derived from the balance as stored after the write.
    async fn update(&self, id: i64, input: &CustomerPatch) -> anyhow::Result<Option<Customer>>;
    async fn count_transactions(&self, id: i64) -> anyhow::Result<i64>;
    async fn delete(&self, id: i64) -> anyhow::Result<bool>;
    /// Inserts in one transaction, skipping rows that collide on phone or
    /// email. Returns the number of inserted rows.
    async fn import(&self, rows: &[NewCustomer]) -> anyhow::Result<u64>;
}
