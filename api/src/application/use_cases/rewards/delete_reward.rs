use crate::application::error::{AppError, AppResult};
use crate::application::ports::reward_repository::RewardRepository;

pub struct DeleteReward<'a, R: RewardRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: RewardRepository + ?Sized> DeleteReward<'a, R> {
    pub async fn execute(&self, id: i64) -> AppResult<()> {
        if !self.repo.delete(id).await? {
            return Err(AppError::not_found("reward not found"));
        }
        Ok(())
    }
}
