use async_trait::async_trait;

use crate::domain::memberships::{Membership, NewMembership};

/// Every mutation re-derives the tier of all customers from their balance.
#[async_trait]
pub trait MembershipRepository: Send + Sync {
    /// Ascending by required points, with member counts.
    async fn list(&self, search: Option<String>) -> anyhow::Result<Vec<Membership>>;
    async fn get(&self, tier: &str) -> anyhow::Result<Option<Membership>>;
    async fn create(&self, input: &NewMembership) -> anyhow::Result<Membership>;
    async fn update(
        &self,
        tier: &str,
        required_points: Option<i64>,
        discount_percent: Option<f64>,
    ) -> anyhow::Result<Option<Membership>>;
    async fn delete(&self, tier: &str) -> anyhow::Result<bool>;
    async fn import(&self, rows: &[NewMembership]) -> anyhow::Result<u64>;
}
