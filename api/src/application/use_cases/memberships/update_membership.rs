use crate::application::error::{AppError, AppResult};
use crate::application::ports::membership_repository::MembershipRepository;
use crate::domain::memberships::{Membership, validate_discount};

pub struct UpdateMembership<'a, R: MembershipRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: MembershipRepository + ?Sized> UpdateMembership<'a, R> {
    pub async fn execute(
        &self,
        tier: &str,
        required_points: Option<i64>,
        discount_percent: Option<f64>,
    ) -> AppResult<Membership> {
        if required_points.is_some_and(|p| p < 0) {
            return Err(AppError::validation("required points cannot be negative"));
        }
        let discount_percent = discount_percent
            .map(validate_discount)
            .transpose()
            .map_err(AppError::Validation)?;
        self.repo
            .update(tier.trim(), required_points, discount_percent)
            .await?
            .ok_or_else(|| AppError::not_found("membership tier not found"))
    }
}
