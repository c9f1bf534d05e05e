use async_trait::async_trait;

use crate::domain::accounts::{Account, NewAccount, Role};

#[async_trait]
pub trait AccountRepository: Send + Sync {
    async fn find_by_username(&self, role: Role, username: &str)
    -> anyhow::Result<Option<Account>>;
    async fn find_by_email(&self, role: Role, email: &str) -> anyhow::Result<Option<Account>>;
    async fn find_by_id(&self, role: Role, id: i64) -> anyhow::Result<Option<Account>>;
    async fn create(&self, role: Role, account: &NewAccount) -> anyhow::Result<Account>;
    /// Inserts `account` as an owner only while no owner exists yet.
    /// `None` means an owner was already there and nothing was written.
    async fn create_first_owner(&self, account: &NewAccount) -> anyhow::Result<Option<Account>>;
    async fn set_password(&self, role: Role, id: i64, password_hash: &str) -> anyhow::Result<bool>;
}
