use crate::application::error::{AppError, AppResult};
use crate::application::ports::membership_repository::MembershipRepository;

pub struct DeleteMembership<'a, R: MembershipRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: MembershipRepository + ?Sized> DeleteMembership<'a, R> {
    pub async fn execute(&self, tier: &str) -> AppResult<()> {
        let tier = tier.trim();
        let current = self
            .repo
            .get(tier)
            .await?
            .ok_or_else(|| AppError::not_found("membership tier not found"))?;
        if current.member_count > 0 {
            return Err(AppError::conflict(format!(
                "membership tier still has {} members",
                current.member_count
            )));
        }
        if !self.repo.delete(tier).await? {
            return Err(AppError::not_found("membership tier not found"));
        }
        tracing::info!(tier, "membership_deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::use_cases::test_support::MemoryStore;

    #[tokio::test]
    async fn tier_with_members_is_kept() {
        let store = MemoryStore::default();
        store.seed_membership("Gold", 500, 10.0);
        store.seed_customer("Budi", "081200000001", 700);
        let uc = DeleteMembership { repo: &store };
        assert!(matches!(uc.execute("Gold").await, Err(AppError::Conflict(_))));
    }

    #[tokio::test]
    async fn empty_tier_is_removed() {
        let store = MemoryStore::default();
        store.seed_membership("Gold", 500, 10.0);
        let uc = DeleteMembership { repo: &store };
        uc.execute("Gold").await.unwrap();
        assert!(matches!(uc.execute("Gold").await, Err(AppError::NotFound(_))));
    }
}
