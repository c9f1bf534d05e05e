use crate::application::dto::ledger::LedgerReceipt;
use crate::application::error::{AppError, AppResult};
use crate::application::ports::reward_repository::RewardRepository;
use crate::application::ports::transaction_repository::{LedgerEntry, TransactionRepository};
use crate::application::use_cases::transactions::settle;
use crate::domain::transactions::{POINTS_PAYMENT_METHOD, PointsPolicy};

/// Exchanges a customer's points for catalogue rewards.
pub struct RedeemReward<'a, W, T>
where
    W: RewardRepository + ?Sized,
    T: TransactionRepository + ?Sized,
{
    pub rewards: &'a W,
    pub ledger: &'a T,
    pub policy: PointsPolicy,
}

impl<'a, W, T> RedeemReward<'a, W, T>
where
    W: RewardRepository + ?Sized,
    T: TransactionRepository + ?Sized,
{
    pub async fn execute(
        &self,
        reward_id: i64,
        customer_id: Option<i64>,
        quantity: Option<i64>,
    ) -> AppResult<LedgerReceipt> {
        let customer_id =
            customer_id.ok_or_else(|| AppError::validation("customer is required"))?;
        let quantity = quantity.unwrap_or(1);
        let reward = self
            .rewards
            .get(reward_id)
            .await?
            .ok_or_else(|| AppError::not_found("reward not found"))?;
        let change = self
            .policy
            .assess_reward(&reward, quantity)
            .map_err(AppError::Validation)?;
        let entry = LedgerEntry {
            customer_id,
            product_id: None,
            reward_id: Some(reward.id),
            product_name: reward.name.clone(),
            quantity,
            total_price: change.total_price,
            payment_method: POINTS_PAYMENT_METHOD.to_string(),
            points_delta: change.delta,
        };
        let outcome = self.ledger.apply(&entry).await?;
        settle(change, outcome)
    }
}
