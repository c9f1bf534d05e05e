use async_trait::async_trait;

use crate::domain::rewards::{NewReward, Reward, RewardPatch};

#[async_trait]
pub trait RewardRepository: Send + Sync {
    async fn list(&self, search: Option<String>) -> anyhow::Result<Vec<Reward>>;
    async fn get(&self, id: i64) -> anyhow::Result<Option<Reward>>;
    async fn create(&self, input: &NewReward) -> anyhow::Result<Reward>;
    async fn update(&self, id: i64, patch: &RewardPatch) -> anyhow::Result<Option<Reward>>;
    async fn delete(&self, id: i64) -> anyhow::Result<bool>;
    async fn import(&self, rows: &[NewReward]) -> anyhow::Result<u64>;
}
