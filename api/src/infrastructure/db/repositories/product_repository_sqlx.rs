use async_trait::async_trait;
use sqlx::Row;
use sqlx::postgres::PgRow;

use crate::application::ports::product_repository::ProductRepository;
use crate::domain::products::{NewProduct, Product};
use crate::infrastructure::db::{PgPool, map_db_err};

pub struct SqlxProductRepository {
    pub pool: PgPool,
}

impl SqlxProductRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn product_from_row(r: &PgRow) -> Product {
    Product {
        id: r.get("id"),
        name: r.get("name"),
        category: r.get("category"),
        notes: r.get("notes"),
        exchange_points: r.get("exchange_points"),
        unit_price: r.get("unit_price"),
    }
}

#[async_trait]
impl ProductRepository for SqlxProductRepository {
    async fn list(&self, search: Option<String>) -> anyhow::Result<Vec<Product>> {
        let id_match = search.as_deref().and_then(|s| s.parse::<i64>().ok());
        let rows = sqlx::query(
            r#"SELECT id, name, category, notes, exchange_points, unit_price
               FROM products
               WHERE $1::text IS NULL
                  OR id = $2
                  OR name ILIKE '%' || $1 || '%'
                  OR category ILIKE '%' || $1 || '%'
               ORDER BY id ASC"#,
        )
        .bind(search)
        .bind(id_match)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.iter().map(product_from_row).collect())
    }

    async fn get(&self, id: i64) -> anyhow::Result<Option<Product>> {
        let row = sqlx::query(
            "SELECT id, name, category, notes, exchange_points, unit_price FROM products WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.as_ref().map(product_from_row))
    }

    async fn create(&self, input: &NewProduct) -> anyhow::Result<Product> {
        let row = sqlx::query(
            r#"INSERT INTO products (name, category, notes, exchange_points, unit_price)
               VALUES ($1, $2, $3, $4, $5)
               RETURNING id, name, category, notes, exchange_points, unit_price"#,
        )
        .bind(&input.name)
        .bind(&input.category)
        .bind(&input.notes)
        .bind(input.exchange_points)
        .bind(input.unit_price)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_err)?;
        Ok(product_from_row(&row))
    }

    async fn update(&self, id: i64, input: &NewProduct) -> anyhow::Result<Option<Product>> {
        let row = sqlx::query(
            r#"UPDATE products
               SET name = $2, category = $3, notes = $4, exchange_points = $5, unit_price = $6
               WHERE id = $1
               RETURNING id, name, category, notes, exchange_points, unit_price"#,
        )
        .bind(id)
        .bind(&input.name)
        .bind(&input.category)
        .bind(&input.notes)
        .bind(input.exchange_points)
        .bind(input.unit_price)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_err)?;
        Ok(row.as_ref().map(product_from_row))
    }

    async fn delete(&self, id: i64) -> anyhow::Result<bool> {
        let res = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(map_db_err)?;
        Ok(res.rows_affected() > 0)
    }

    async fn import(&self, rows: &[NewProduct]) -> anyhow::Result<u64> {
        let mut tx = self.pool.begin().await?;
        let mut inserted = 0;
        for row in rows {
            let res = sqlx::query(
                r#"INSERT INTO products (name, category, notes, exchange_points, unit_price)
                   VALUES ($1, $2, $3, $4, $5)
                   ON CONFLICT (name) DO NOTHING"#,
            )
            .bind(&row.name)
            .bind(&row.category)
            .bind(&row.notes)
            .bind(row.exchange_points)
            .bind(row.unit_price)
            .execute(&mut *tx)
            .await
            .map_err(map_db_err)?;
            inserted += res.rows_affected();
        }
        tx.commit().await?;
        Ok(inserted)
    }
}
