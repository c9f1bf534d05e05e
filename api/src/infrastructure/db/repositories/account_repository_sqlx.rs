use async_trait::async_trait;
use sqlx::Row;
use sqlx::postgres::PgRow;

use crate::application::ports::account_repository::AccountRepository;
use crate::domain::accounts::{Account, NewAccount, Role};
use crate::infrastructure::db::{PgPool, map_db_err};

pub struct SqlxAccountRepository {
    pub pool: PgPool,
}

impl SqlxAccountRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn table(role: Role) -> &'static str {
    match role {
        Role::Owner => "owners",
        Role::Staff => "staff",
    }
}

fn account_from_row(role: Role, r: &PgRow) -> Account {
    Account {
        id: r.get("id"),
        role,
        name: r.get("name"),
        email: r.get("email"),
        username: r.get("username"),
        phone: r.get("phone"),
        password_hash: r.try_get("password_hash").ok(),
    }
}

#[async_trait]
impl AccountRepository for SqlxAccountRepository {
    async fn find_by_username(&self, role: Role, username: &str) -> anyhow::Result<Option<Account>> {
        let sql = format!(
            "SELECT id, name, email, username, phone, password_hash FROM {} WHERE username = $1",
            table(role)
        );
        let row = sqlx::query(&sql)
            .bind(username)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(|r| account_from_row(role, &r)))
    }

    async fn find_by_email(&self, role: Role, email: &str) -> anyhow::Result<Option<Account>> {
        let sql = format!(
            "SELECT id, name, email, username, phone, password_hash FROM {} WHERE lower(email) = lower($1)",
            table(role)
        );
        let row = sqlx::query(&sql)
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(|r| account_from_row(role, &r)))
    }

    async fn find_by_id(&self, role: Role, id: i64) -> anyhow::Result<Option<Account>> {
        let sql = format!(
            "SELECT id, name, email, username, phone FROM {} WHERE id = $1",
            table(role)
        );
        let row = sqlx::query(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(|r| account_from_row(role, &r)))
    }

    async fn create(&self, role: Role, account: &NewAccount) -> anyhow::Result<Account> {
        let sql = format!(
            r#"INSERT INTO {} (name, email, username, phone, password_hash)
               VALUES ($1, $2, $3, $4, $5)
               RETURNING id, name, email, username, phone"#,
            table(role)
        );
        let row = sqlx::query(&sql)
            .bind(&account.name)
            .bind(&account.email)
            .bind(&account.username)
            .bind(&account.phone)
            .bind(&account.password_hash)
            .fetch_one(&self.pool)
            .await
            .map_err(map_db_err)?;
        Ok(account_from_row(role, &row))
    }

    async fn create_first_owner(&self, account: &NewAccount) -> anyhow::Result<Option<Account>> {
        let mut tx = self.pool.begin().await?;
        // Serializes concurrent bootstrap attempts; readers are not blocked.
        sqlx::query("LOCK TABLE owners IN SHARE ROW EXCLUSIVE MODE")
            .execute(&mut *tx)
            .await?;
        let row = sqlx::query(
            r#"INSERT INTO owners (name, email, username, phone, password_hash)
               SELECT $1, $2, $3, $4, $5
               WHERE NOT EXISTS (SELECT 1 FROM owners)
               RETURNING id, name, email, username, phone"#,
        )
        .bind(&account.name)
        .bind(&account.email)
        .bind(&account.username)
        .bind(&account.phone)
        .bind(&account.password_hash)
        .fetch_optional(&mut *tx)
        .await
        .map_err(map_db_err)?;
        tx.commit().await?;
        Ok(row.map(|r| account_from_row(Role::Owner, &r)))
    }

    async fn set_password(&self, role: Role, id: i64, password_hash: &str) -> anyhow::Result<bool> {
        let sql = format!("UPDATE {} SET password_hash = $2 WHERE id = $1", table(role));
        let res = sqlx::query(&sql)
            .bind(id)
            .bind(password_hash)
            .execute(&self.pool)
            .await?;
        Ok(res.rows_affected() > 0)
    }
}
