use crate::application::error::AppResult;
use crate::application::ports::membership_repository::MembershipRepository;
use crate::domain::memberships::Membership;

pub struct ListMemberships<'a, R: MembershipRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: MembershipRepository + ?Sized> ListMemberships<'a, R> {
    pub async fn execute(&self, search: Option<String>) -> AppResult<Vec<Membership>> {
        let search = search
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());
        Ok(self.repo.list(search).await?)
    }
}
