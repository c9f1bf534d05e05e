use async_trait::async_trait;

use crate::domain::notifications::{NewNotification, Notification};

#[async_trait]
pub trait NotificationRepository: Send + Sync {
    /// Newest first.
    async fn list(
        &self,
        customer_id: Option<i64>,
        search: Option<String>,
    ) -> anyhow::Result<Vec<Notification>>;
    async fn get(&self, id: i64) -> anyhow::Result<Option<Notification>>;
    async fn create(&self, input: &NewNotification) -> anyhow::Result<Notification>;
    // customer_id: None => unchanged; Some(None) => detach; Some(Some(id)) => reassign
    async fn update(
        &self,
        id: i64,
        message: Option<String>,
        customer_id: Option<Option<i64>>,
    ) -> anyhow::Result<Option<Notification>>;
    async fn delete(&self, id: i64) -> anyhow::Result<bool>;
    async fn import(&self, rows: &[NewNotification]) -> anyhow::Result<u64>;
}
