use crate::application::error::{AppError, AppResult};
use crate::application::ports::reward_repository::RewardRepository;
use crate::domain::rewards::Reward;

pub struct GetReward<'a, R: RewardRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: RewardRepository + ?Sized> GetReward<'a, R> {
    pub async fn execute(&self, id: i64) -> AppResult<Reward> {
        self.repo
            .get(id)
            .await?
            .ok_or_else(|| AppError::not_found("reward not found"))
    }
}
