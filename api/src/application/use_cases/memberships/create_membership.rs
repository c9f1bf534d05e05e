use crate::application::error::{AppError, AppResult};
use crate::application::ports::membership_repository::MembershipRepository;
use crate::application::use_cases::non_blank;
use crate::domain::memberships::{Membership, NewMembership, validate_discount};

pub struct CreateMembership<'a, R: MembershipRepository + ?Sized> {
    pub repo: &'a R,
}

#[derive(Debug, Clone, Default)]
pub struct MembershipInput {
    pub tier: Option<String>,
    pub required_points: Option<i64>,
    pub discount_percent: Option<f64>,
}

impl<'a, R: MembershipRepository + ?Sized> CreateMembership<'a, R> {
    pub async fn execute(&self, input: &MembershipInput) -> AppResult<Membership> {
        let (Some(tier), Some(required_points), Some(discount)) = (
            non_blank(input.tier.as_deref()),
            input.required_points,
            input.discount_percent,
        ) else {
            return Err(AppError::validation(
                "tier, required points and discount are required",
            ));
        };
        if required_points < 0 {
            return Err(AppError::validation("required points cannot be negative"));
        }
        let discount_percent = validate_discount(discount).map_err(AppError::Validation)?;
        let created = self
            .repo
            .create(&NewMembership {
                tier: tier.to_string(),
                required_points,
                discount_percent,
            })
            .await?;
        tracing::info!(tier = %created.tier, "membership_created");
        Ok(created)
    }
}
