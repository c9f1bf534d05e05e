use crate::application::error::AppResult;
use crate::application::ports::reward_repository::RewardRepository;
use crate::domain::rewards::Reward;

pub struct ListRewards<'a, R: RewardRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: RewardRepository + ?Sized> ListRewards<'a, R> {
    pub async fn execute(&self, search: Option<String>) -> AppResult<Vec<Reward>> {
        let search = search
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());
        Ok(self.repo.list(search).await?)
    }
}
