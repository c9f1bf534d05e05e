use crate::application::error::{AppError, AppResult};
use crate::application::ports::account_repository::AccountRepository;
use crate::application::use_cases::auth::password::{check_password_policy, hash_password};
use crate::domain::accounts::{Account, Role};

/// Owner-only password reset for any back-office account.
pub struct ResetPassword<'a, R: AccountRepository + ?Sized> {
    pub repo: &'a R,
}

#[derive(Debug, Clone)]
pub struct ResetPasswordRequest {
    /// Email address (contains `@`) or username.
    pub identifier: String,
    pub new_password: String,
}

impl<'a, R: AccountRepository + ?Sized> ResetPassword<'a, R> {
    pub async fn execute(&self, actor: Role, req: &ResetPasswordRequest) -> AppResult<Account> {
        if actor != Role::Owner {
            return Err(AppError::Forbidden(
                "only owners can reset passwords".into(),
            ));
        }
        let identifier = req.identifier.trim();
        if identifier.is_empty() || req.new_password.is_empty() {
            return Err(AppError::validation(
                "email or username and the new password are required",
            ));
        }
        check_password_policy(&req.new_password).map_err(AppError::Validation)?;

        let target = self.locate(identifier).await?.ok_or_else(|| {
            AppError::not_found(if identifier.contains('@') {
                "email not found"
            } else {
                "user not found"
            })
        })?;

        let hash = hash_password(&req.new_password)?;
        if !self.repo.set_password(target.role, target.id, &hash).await? {
            return Err(AppError::not_found("user not found"));
        }
        tracing::info!(account_id = target.id, role = %target.role, "password_reset");
        Ok(Account {
            password_hash: None,
            ..target
        })
    }

    async fn locate(&self, identifier: &str) -> AppResult<Option<Account>> {
        if identifier.contains('@') {
            let email = identifier.to_lowercase();
            for role in [Role::Staff, Role::Owner] {
                if let Some(acc) = self.repo.find_by_email(role, &email).await? {
                    return Ok(Some(acc));
                }
            }
        } else {
            for role in [Role::Owner, Role::Staff] {
                if let Some(acc) = self.repo.find_by_username(role, identifier).await? {
                    return Ok(Some(acc));
                }
            }
        }
        Ok(None)
    }
}
