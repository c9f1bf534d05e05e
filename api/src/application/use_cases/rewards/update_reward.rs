use crate::application::error::{AppError, AppResult};
use crate::application::ports::reward_repository::RewardRepository;
use crate::domain::rewards::{Reward, RewardPatch};

pub struct UpdateReward<'a, R: RewardRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: RewardRepository + ?Sized> UpdateReward<'a, R> {
    pub async fn execute(&self, id: i64, patch: RewardPatch) -> AppResult<Reward> {
        let patch = RewardPatch {
            name: match patch.name {
                Some(n) if n.trim().is_empty() => {
                    return Err(AppError::validation("name cannot be empty"));
                }
                other => other.map(|n| n.trim().to_string()),
            },
            ..patch
        };
        if patch.points_required.is_some_and(|p| p < 0) || patch.stock.is_some_and(|s| s < 0) {
            return Err(AppError::validation(
                "points required and stock cannot be negative",
            ));
        }
        self.repo
            .update(id, &patch)
            .await?
            .ok_or_else(|| AppError::not_found("reward not found"))
    }
}
