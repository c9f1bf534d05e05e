use crate::application::error::{AppError, AppResult};
use crate::application::ports::reward_repository::RewardRepository;
use crate::application::use_cases::non_blank;
use crate::domain::rewards::{NewReward, Reward};

pub struct CreateReward<'a, R: RewardRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: RewardRepository + ?Sized> CreateReward<'a, R> {
    pub async fn execute(
        &self,
        name: Option<&str>,
        points_required: Option<i64>,
        stock: Option<i64>,
    ) -> AppResult<Reward> {
        let (Some(name), Some(points_required), Some(stock)) =
            (non_blank(name), points_required, stock)
        else {
            return Err(AppError::validation(
                "name, points required and stock are required",
            ));
        };
        if points_required < 0 || stock < 0 {
            return Err(AppError::validation(
                "points required and stock cannot be negative",
            ));
        }
        Ok(self
            .repo
            .create(&NewReward {
                name: name.to_string(),
                points_required,
                stock,
            })
            .await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::use_cases::test_support::MemoryStore;

    #[tokio::test]
    async fn all_fields_are_required() {
        let store = MemoryStore::default();
        let uc = CreateReward { repo: &store };
        assert!(matches!(
            uc.execute(Some("Tumbler"), Some(200), None).await,
            Err(AppError::Validation(_))
        ));
        let r = uc.execute(Some("Tumbler"), Some(200), Some(5)).await.unwrap();
        assert_eq!(r.claimed, 0);
    }
}
