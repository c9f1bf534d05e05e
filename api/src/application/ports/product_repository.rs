use async_trait::async_trait;

use crate::domain::products::{NewProduct, Product};

#[async_trait]
pub trait ProductRepository: Send + Sync {
    async fn list(&self, search: Option<String>) -> anyhow::Result<Vec<Product>>;
    async fn get(&self, id: i64) -> anyhow::Result<Option<Product>>;
    async fn create(&self, input: &NewProduct) -> anyhow::Result<Product>;
    async fn update(&self, id: i64, input: &NewProduct) -> anyhow::Result<Option<Product>>;
    async fn delete(&self, id: i64) -> anyhow::Result<bool>;
    async fn import(&self, rows: &[NewProduct]) -> anyhow::Result<u64>;
}
