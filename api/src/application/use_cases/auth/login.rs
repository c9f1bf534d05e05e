use crate::application::error::{AppError, AppResult};
use crate::application::ports::account_repository::AccountRepository;
use crate::application::use_cases::auth::password::verify_password;
use crate::domain::accounts::{Account, Role};

pub struct Login<'a, R: AccountRepository + ?Sized> {
    pub repo: &'a R,
}

#[derive(Debug, Clone)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

impl<'a, R: AccountRepository + ?Sized> Login<'a, R> {
    /// Owners are matched before staff for the same username.
    pub async fn execute(&self, req: &LoginRequest) -> AppResult<Account> {
        let username = req.username.trim();
        if username.is_empty() || req.password.is_empty() {
            return Err(AppError::validation("username and password are required"));
        }
        let mut found = None;
        for role in [Role::Owner, Role::Staff] {
            if let Some(account) = self.repo.find_by_username(role, username).await? {
                found = Some(account);
                break;
            }
        }
        let Some(mut account) = found else {
            return Err(AppError::not_found("username not found"));
        };
        let hash = account.password_hash.take().unwrap_or_default();
        if !verify_password(&req.password, &hash) {
            tracing::info!(account_id = account.id, role = %account.role, "login_rejected");
            return Err(AppError::Unauthorized("wrong password".into()));
        }
        Ok(account)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::use_cases::test_support::MemoryStore;

    #[tokio::test]
    async fn owner_wins_over_staff_with_same_username() {
        let store = MemoryStore::default();
        store.seed_account(Role::Staff, "rudi", "staff-pass");
        store.seed_account(Role::Owner, "rudi", "owner-pass");
        let uc = Login { repo: &store };
        let account = uc
            .execute(&LoginRequest {
                username: "rudi".into(),
                password: "owner-pass".into(),
            })
            .await
            .unwrap();
        assert_eq!(account.role, Role::Owner);
        assert!(account.password_hash.is_none());

        let err = uc
            .execute(&LoginRequest {
                username: "rudi".into(),
                password: "staff-pass".into(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Unauthorized(_)));
    }

    #[tokio::test]
    async fn unknown_username_is_not_found() {
        let store = MemoryStore::default();
        let uc = Login { repo: &store };
        let err = uc
            .execute(&LoginRequest {
                username: "ghost".into(),
                password: "whatever".into(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }
}
