use crate::application::error::{AppError, AppResult};
use crate::application::ports::membership_repository::MembershipRepository;
use crate::domain::memberships::Membership;

pub struct GetMembership<'a, R: MembershipRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: MembershipRepository + ?Sized> GetMembership<'a, R> {
    pub async fn execute(&self, tier: &str) -> AppResult<Membership> {
        self.repo
            .get(tier.trim())
            .await?
            .ok_or_else(|| AppError::not_found("membership tier not found"))
    }
}
