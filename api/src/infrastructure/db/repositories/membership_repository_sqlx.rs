use async_trait::async_trait;
use sqlx::Row;
use sqlx::postgres::PgRow;

use super::RESYNC_TIERS;
use crate::application::ports::membership_repository::MembershipRepository;
use crate::domain::memberships::{Membership, NewMembership};
use crate::infrastructure::db::{PgPool, map_db_err};

pub struct SqlxMembershipRepository {
    pub pool: PgPool,
}

impl SqlxMembershipRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn membership_from_row(r: &PgRow) -> Membership {
    Membership {
        tier: r.get("tier"),
        required_points: r.get("required_points"),
        discount_percent: r.get("discount_percent"),
        member_count: r.get("member_count"),
    }
}

const SELECT_WITH_COUNTS: &str = r#"
    SELECT m.tier, m.required_points, m.discount_percent,
           (SELECT COUNT(1) FROM customers c WHERE c.tier = m.tier) AS member_count
    FROM memberships m"#;

#[async_trait]
impl MembershipRepository for SqlxMembershipRepository {
    async fn list(&self, search: Option<String>) -> anyhow::Result<Vec<Membership>> {
        let sql = format!(
            "{} WHERE $1::text IS NULL OR m.tier ILIKE '%' || $1 || '%' ORDER BY m.required_points ASC, m.tier ASC",
            SELECT_WITH_COUNTS
        );
        let rows = sqlx::query(&sql)
            .bind(search)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.iter().map(membership_from_row).collect())
    }

    async fn get(&self, tier: &str) -> anyhow::Result<Option<Membership>> {
        let sql = format!("{} WHERE m.tier = $1", SELECT_WITH_COUNTS);
        let row = sqlx::query(&sql)
            .bind(tier)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.as_ref().map(membership_from_row))
    }

    async fn create(&self, input: &NewMembership) -> anyhow::Result<Membership> {
        let mut tx = self.pool.begin().await?;
        sqlx::query(
            "INSERT INTO memberships (tier, required_points, discount_percent) VALUES ($1, $2, $3)",
        )
        .bind(&input.tier)
        .bind(input.required_points)
        .bind(input.discount_percent)
        .execute(&mut *tx)
        .await
        .map_err(map_db_err)?;
        sqlx::query(RESYNC_TIERS)
            .execute(&mut *tx)
            .await
            .map_err(map_db_err)?;
        let sql = format!("{} WHERE m.tier = $1", SELECT_WITH_COUNTS);
        let row = sqlx::query(&sql)
            .bind(&input.tier)
            .fetch_one(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(membership_from_row(&row))
    }

    async fn update(
        &self,
        tier: &str,
        required_points: Option<i64>,
        discount_percent: Option<f64>,
    ) -> anyhow::Result<Option<Membership>> {
        let mut tx = self.pool.begin().await?;
        let res = sqlx::query(
            r#"UPDATE memberships
               SET required_points = COALESCE($2, required_points),
                   discount_percent = COALESCE($3, discount_percent)
               WHERE tier = $1"#,
        )
        .bind(tier)
        .bind(required_points)
        .bind(discount_percent)
        .execute(&mut *tx)
        .await
        .map_err(map_db_err)?;
        if res.rows_affected() == 0 {
            return Ok(None);
        }
        sqlx::query(RESYNC_TIERS)
            .execute(&mut *tx)
            .await
            .map_err(map_db_err)?;
        let sql = format!("{} WHERE m.tier = $1", SELECT_WITH_COUNTS);
        let row = sqlx::query(&sql)
            .bind(tier)
            .fetch_optional(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(row.as_ref().map(membership_from_row))
    }

    async fn delete(&self, tier: &str) -> anyhow::Result<bool> {
        let mut tx = self.pool.begin().await?;
        let res = sqlx::query("DELETE FROM memberships WHERE tier = $1")
            .bind(tier)
            .execute(&mut *tx)
            .await
            .map_err(map_db_err)?;
        sqlx::query(RESYNC_TIERS)
            .execute(&mut *tx)
            .await
            .map_err(map_db_err)?;
        tx.commit().await?;
        Ok(res.rows_affected() > 0)
    }

    async fn import(&self, rows: &[NewMembership]) -> anyhow::Result<u64> {
        let mut tx = self.pool.begin().await?;
        let mut inserted = 0;
        for row in rows {
            let res = sqlx::query(
                r#"INSERT INTO memberships (tier, required_points, discount_percent)
                   VALUES ($1, $2, $3)
                   ON CONFLICT (tier) DO NOTHING"#,
            )
            .bind(&row.tier)
            .bind(row.required_points)
            .bind(row.discount_percent)
            .execute(&mut *tx)
            .await
            .map_err(map_db_err)?;
            inserted += res.rows_affected();
        }
        if inserted > 0 {
            sqlx::query(RESYNC_TIERS)
                .execute(&mut *tx)
                .await
                .map_err(map_db_err)?;
        }
        tx.commit().await?;
        Ok(inserted)
    }
}
