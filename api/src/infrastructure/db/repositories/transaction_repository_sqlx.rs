use async_trait::async_trait;
use sqlx::Row;
use sqlx::postgres::PgRow;

use crate::application::ports::transaction_repository::{
    LedgerEntry, LedgerOutcome, TransactionFilter, TransactionRepository,
};
use crate::domain::transactions::{ImportedTransaction, PAYMENT_SUCCESS, Transaction};
use crate::infrastructure::db::{PgPool, map_db_err};

pub struct SqlxTransactionRepository {
    pub pool: PgPool,
}

impl SqlxTransactionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn transaction_from_row(r: &PgRow) -> Transaction {
    Transaction {
        id: r.get("id"),
        customer_id: r.get("customer_id"),
        product_id: r.get("product_id"),
        reward_id: r.get("reward_id"),
        product_name: r.get("product_name"),
        quantity: r.get("quantity"),
        total_price: r.get("total_price"),
        payment_method: r.get("payment_method"),
        payment_status: r.get("payment_status"),
        points_delta: r.get("points_delta"),
        occurred_at: r.get("occurred_at"),
    }
}

#[async_trait]
impl TransactionRepository for SqlxTransactionRepository {
    async fn apply(&self, entry: &LedgerEntry) -> anyhow::Result<LedgerOutcome> {
        let mut tx = self.pool.begin().await?;

        // Lock order is customer then reward for every writer.
        let Some(available) = sqlx::query_scalar::<_, i64>(
            "SELECT points FROM customers WHERE id = $1 FOR UPDATE",
        )
        .bind(entry.customer_id)
        .fetch_optional(&mut *tx)
        .await?
        else {
            return Ok(LedgerOutcome::CustomerNotFound);
        };

        if let Some(reward_id) = entry.reward_id {
            let Some(stock) = sqlx::query_scalar::<_, i64>(
                "SELECT stock FROM rewards WHERE id = $1 FOR UPDATE",
            )
            .bind(reward_id)
            .fetch_optional(&mut *tx)
            .await?
            else {
                return Ok(LedgerOutcome::RewardNotFound);
            };
            if stock < entry.quantity {
                return Ok(LedgerOutcome::OutOfStock { available: stock });
            }
        }

        let Some(new_balance) = available.checked_add(entry.points_delta) else {
            return Ok(LedgerOutcome::BalanceOverflow);
        };
        if new_balance < 0 {
            return Ok(LedgerOutcome::InsufficientPoints {
                required: -entry.points_delta,
                available,
            });
        }

        let row = sqlx::query(
            r#"INSERT INTO transactions (customer_id, product_id, reward_id, product_name, quantity,
                                         total_price, payment_method, payment_status, points_delta)
               VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
               RETURNING id, customer_id, product_id, reward_id, product_name, quantity,
                         total_price, payment_method, payment_status, points_delta, occurred_at"#,
        )
        .bind(entry.customer_id)
        .bind(entry.product_id)
        .bind(entry.reward_id)
        .bind(&entry.product_name)
        .bind(entry.quantity)
        .bind(entry.total_price)
        .bind(&entry.payment_method)
        .bind(PAYMENT_SUCCESS)
        .bind(entry.points_delta)
        .fetch_one(&mut *tx)
        .await
        .map_err(map_db_err)?;
        let transaction = transaction_from_row(&row);

        let tier: Option<String> = sqlx::query_scalar(
            r#"UPDATE customers
               SET points = $2,
                   tier = (SELECT m.tier FROM memberships m WHERE m.required_points <= $2
                            ORDER BY m.required_points DESC LIMIT 1)
               WHERE id = $1
               RETURNING tier"#,
        )
        .bind(entry.customer_id)
        .bind(new_balance)
        .fetch_one(&mut *tx)
        .await
        .map_err(map_db_err)?;

        if let Some(reward_id) = entry.reward_id {
            sqlx::query(
                "UPDATE rewards SET stock = stock - $2, claimed = claimed + $2 WHERE id = $1",
            )
            .bind(reward_id)
            .bind(entry.quantity)
            .execute(&mut *tx)
            .await
            .map_err(map_db_err)?;
        }

        tx.commit().await?;
        Ok(LedgerOutcome::Recorded {
            transaction,
            new_balance,
            tier,
        })
    }

    async fn list(&self, filter: &TransactionFilter) -> anyhow::Result<Vec<Transaction>> {
        let rows = sqlx::query(
            r#"SELECT id, customer_id, product_id, reward_id, product_name, quantity,
                      total_price, payment_method, payment_status, points_delta, occurred_at
               FROM transactions
               WHERE ($1::bigint IS NULL OR customer_id = $1)
                 AND ($2::date IS NULL OR (occurred_at AT TIME ZONE 'UTC')::date >= $2)
                 AND ($3::date IS NULL OR (occurred_at AT TIME ZONE 'UTC')::date <= $3)
               ORDER BY occurred_at DESC, id DESC
               LIMIT $4"#,
        )
        .bind(filter.customer_id)
        .bind(filter.start)
        .bind(filter.end)
        .bind(filter.limit)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.iter().map(transaction_from_row).collect())
    }

    async fn import(&self, rows: &[ImportedTransaction]) -> anyhow::Result<u64> {
        let mut tx = self.pool.begin().await?;
        let mut inserted = 0;
        for row in rows {
            let res = sqlx::query(
                r#"INSERT INTO transactions (product_name, quantity, total_price, payment_method,
                                             payment_status, occurred_at)
                   VALUES ($1, $2, $3, $4, $5, $6)"#,
            )
            .bind(&row.product_name)
            .bind(row.quantity)
            .bind(row.total_price)
            .bind(&row.payment_method)
            .bind(PAYMENT_SUCCESS)
            .bind(row.occurred_at)
            .execute(&mut *tx)
            .await
            .map_err(map_db_err)?;
            inserted += res.rows_affected();
        }
        tx.commit().await?;
        Ok(inserted)
    }
}
