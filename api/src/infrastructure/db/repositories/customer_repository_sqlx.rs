use async_trait::async_trait;
use sqlx::Row;
use sqlx::postgres::PgRow;

use crate::application::ports::customer_repository::CustomerRepository;
use crate::domain::customers::{Customer, CustomerPatch, NewCustomer};
use crate::infrastructure::db::{PgPool, map_db_err};

pub struct SqlxCustomerRepository {
    pub pool: PgPool,
}

impl SqlxCustomerRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

pub(crate) fn customer_from_row(r: &PgRow) -> Customer {
    Customer {
        id: r.get("id"),
        name: r.get("name"),
        email: r.get("email"),
        phone: r.get("phone"),
        points: r.get("points"),
        tier: r.get("tier"),
        created_at: r.get("created_at"),
    }
}

#[async_trait]
impl CustomerRepository for SqlxCustomerRepository {
    async fn list(&self, search: Option<String>) -> anyhow::Result<Vec<Customer>> {
        let rows = sqlx::query(
            r#"SELECT id, name, email, phone, points, tier, created_at
               FROM customers
               WHERE $1::text IS NULL
                  OR name ILIKE '%' || $1 || '%'
                  OR email ILIKE '%' || $1 || '%'
                  OR phone ILIKE '%' || $1 || '%'
               ORDER BY id DESC"#,
        )
        .bind(search)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.iter().map(customer_from_row).collect())
    }

    async fn get(&self, id: i64) -> anyhow::Result<Option<Customer>> {
        let row = sqlx::query(
            "SELECT id, name, email, phone, points, tier, created_at FROM customers WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.as_ref().map(customer_from_row))
    }

    async fn find_by_phone(
        &self,
        phone: &str,
        exclude_id: Option<i64>,
    ) -> anyhow::Result<Option<Customer>> {
        let row = sqlx::query(
            r#"SELECT id, name, email, phone, points, tier, created_at
               FROM customers
               WHERE phone = $1 AND ($2::bigint IS NULL OR id <> $2)"#,
        )
        .bind(phone)
        .bind(exclude_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.as_ref().map(customer_from_row))
    }

    async fn create(&self, input: &NewCustomer) -> anyhow::Result<Customer> {
        let row = sqlx::query(
            r#"INSERT INTO customers (name, email, phone, points, tier)
               VALUES ($1, $2, $3, $4,
                       (SELECT m.tier FROM memberships m WHERE m.required_points <= $4
                         ORDER BY m.required_points DESC LIMIT 1))
               RETURNING id, name, email, phone, points, tier, created_at"#,
        )
        .bind(&input.name)
        .bind(&input.email)
        .bind(&input.phone)
        .bind(input.points)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_err)?;
        Ok(customer_from_row(&row))
    }

    async fn update(&self, id: i64, input: &CustomerPatch) -> anyhow::Result<Option<Customer>> {
        // `points` on the right-hand side is the row as locked by this UPDATE.
        let row = sqlx::query(
            r#"UPDATE customers
               SET name = $2, email = $3, phone = $4, points = COALESCE($5, points),
                   tier = (SELECT m.tier FROM memberships m
                            WHERE m.required_points <= COALESCE($5, customers.points)
                            ORDER BY m.required_points DESC LIMIT 1)
               WHERE id = $1
               RETURNING id, name, email, phone, points, tier, created_at"#,
        )
        .bind(id)
        .bind(&input.name)
        .bind(&input.email)
        .bind(&input.phone)
        .bind(input.points)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_err)?;
        Ok(row.as_ref().map(customer_from_row))
    }

    async fn count_transactions(&self, id: i64) -> anyhow::Result<i64> {
        let n = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(1) FROM transactions WHERE customer_id = $1",
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await?;
        Ok(n)
    }

    async fn delete(&self, id: i64) -> anyhow::Result<bool> {
        let res = sqlx::query("DELETE FROM customers WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(map_db_err)?;
        Ok(res.rows_affected() > 0)
    }

    async fn import(&self, rows: &[NewCustomer]) -> anyhow::Result<u64> {
        let mut tx = self.pool.begin().await?;
        let mut inserted = 0;
        for row in rows {
            let res = sqlx::query(
                r#"INSERT INTO customers (name, email, phone, points, tier)
                   VALUES ($1, $2, $3, $4,
                           (SELECT m.tier FROM memberships m WHERE m.required_points <= $4
                             ORDER BY m.required_points DESC LIMIT 1))
                   ON CONFLICT DO NOTHING"#,
            )
            .bind(&row.name)
            .bind(&row.email)
            .bind(&row.phone)
            .bind(row.points)
            .execute(&mut *tx)
            .await
            .map_err(map_db_err)?;
            inserted += res.rows_affected();
        }
        tx.commit().await?;
        Ok(inserted)
    }
}
