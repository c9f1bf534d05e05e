use async_trait::async_trait;
use sqlx::Row;
use sqlx::postgres::PgRow;

use crate::application::ports::reward_repository::RewardRepository;
use crate::domain::rewards::{NewReward, Reward, RewardPatch};
use crate::infrastructure::db::{PgPool, map_db_err};

pub struct SqlxRewardRepository {
    pub pool: PgPool,
}

impl SqlxRewardRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn reward_from_row(r: &PgRow) -> Reward {
    Reward {
        id: r.get("id"),
        name: r.get("name"),
        points_required: r.get("points_required"),
        stock: r.get("stock"),
        claimed: r.get("claimed"),
    }
}

#[async_trait]
impl RewardRepository for SqlxRewardRepository {
    async fn list(&self, search: Option<String>) -> anyhow::Result<Vec<Reward>> {
        let rows = sqlx::query(
            r#"SELECT id, name, points_required, stock, claimed
               FROM rewards
               WHERE $1::text IS NULL OR name ILIKE '%' || $1 || '%'
               ORDER BY points_required ASC, id ASC"#,
        )
        .bind(search)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.iter().map(reward_from_row).collect())
    }

    async fn get(&self, id: i64) -> anyhow::Result<Option<Reward>> {
        let row = sqlx::query(
            "SELECT id, name, points_required, stock, claimed FROM rewards WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.as_ref().map(reward_from_row))
    }

    async fn create(&self, input: &NewReward) -> anyhow::Result<Reward> {
        let row = sqlx::query(
            r#"INSERT INTO rewards (name, points_required, stock)
               VALUES ($1, $2, $3)
               RETURNING id, name, points_required, stock, claimed"#,
        )
        .bind(&input.name)
        .bind(input.points_required)
        .bind(input.stock)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_err)?;
        Ok(reward_from_row(&row))
    }

    async fn update(&self, id: i64, patch: &RewardPatch) -> anyhow::Result<Option<Reward>> {
        let row = sqlx::query(
            r#"UPDATE rewards
               SET name = COALESCE($2, name),
                   points_required = COALESCE($3, points_required),
                   stock = COALESCE($4, stock)
               WHERE id = $1
               RETURNING id, name, points_required, stock, claimed"#,
        )
        .bind(id)
        .bind(&patch.name)
        .bind(patch.points_required)
        .bind(patch.stock)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_err)?;
        Ok(row.as_ref().map(reward_from_row))
    }

    async fn delete(&self, id: i64) -> anyhow::Result<bool> {
        let res = sqlx::query("DELETE FROM rewards WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(map_db_err)?;
        Ok(res.rows_affected() > 0)
    }

    async fn import(&self, rows: &[NewReward]) -> anyhow::Result<u64> {
        let mut tx = self.pool.begin().await?;
        let mut inserted = 0;
        for row in rows {
            let res = sqlx::query(
                r#"INSERT INTO rewards (name, points_required, stock)
                   VALUES ($1, $2, $3)
                   ON CONFLICT (name) DO NOTHING"#,
            )
            .bind(&row.name)
            .bind(row.points_required)
            .bind(row.stock)
            .execute(&mut *tx)
            .await
            .map_err(map_db_err)?;
            inserted += res.rows_affected();
        }
        tx.commit().await?;
        Ok(inserted)
    }
}
