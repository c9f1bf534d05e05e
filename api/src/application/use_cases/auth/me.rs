use crate::application::error::{AppError, AppResult};
use crate::application::ports::account_repository::AccountRepository;
use crate::domain::accounts::{Account, Role};

pub struct GetMe<'a, R: AccountRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: AccountRepository + ?Sized> GetMe<'a, R> {
    pub async fn execute(&self, role: Role, id: i64) -> AppResult<Account> {
        let mut account = self
            .repo
            .find_by_id(role, id)
            .await?
            .ok_or_else(|| AppError::Unauthorized("account no longer exists".into()))?;
        account.password_hash = None;
        Ok(account)
    }
}
