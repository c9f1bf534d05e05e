use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::Row;

use crate::application::ports::report_repository::ReportRepository;
use crate::domain::reports::{DailySales, PointsTotals, TierBucket, UNRANKED_BUCKET};
use crate::infrastructure::db::PgPool;

pub struct SqlxReportRepository {
    pub pool: PgPool,
}

impl SqlxReportRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ReportRepository for SqlxReportRepository {
    async fn daily_sales(&self, start: NaiveDate, end: NaiveDate) -> anyhow::Result<Vec<DailySales>> {
        let rows = sqlx::query(
            r#"SELECT (occurred_at AT TIME ZONE 'UTC')::date AS day,
                      COALESCE(SUM(total_price), 0)::bigint AS revenue,
                      COUNT(1) AS transactions
               FROM transactions
               WHERE (occurred_at AT TIME ZONE 'UTC')::date BETWEEN $1 AND $2
               GROUP BY day
               ORDER BY day ASC"#,
        )
        .bind(start)
        .bind(end)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows
            .into_iter()
            .map(|r| DailySales {
                day: r.get("day"),
                revenue: r.get("revenue"),
                transactions: r.get("transactions"),
            })
            .collect())
    }

    async fn points_totals(&self, start: NaiveDate, end: NaiveDate) -> anyhow::Result<PointsTotals> {
        let row = sqlx::query(
            r#"SELECT COALESCE(SUM(points_delta) FILTER (WHERE points_delta > 0), 0)::bigint AS earned,
                      COALESCE(SUM(-points_delta) FILTER (WHERE points_delta < 0), 0)::bigint AS redeemed
               FROM transactions
               WHERE (occurred_at AT TIME ZONE 'UTC')::date BETWEEN $1 AND $2"#,
        )
        .bind(start)
        .bind(end)
        .fetch_one(&self.pool)
        .await?;
        Ok(PointsTotals {
            earned: row.get("earned"),
            redeemed: row.get("redeemed"),
        })
    }

    async fn customer_count(&self) -> anyhow::Result<i64> {
        let n = sqlx::query_scalar::<_, i64>("SELECT COUNT(1) FROM customers")
            .fetch_one(&self.pool)
            .await?;
        Ok(n)
    }

    async fn tier_distribution(&self) -> anyhow::Result<Vec<TierBucket>> {
        let rows = sqlx::query(
            r#"SELECT m.tier, COUNT(c.id) AS customers
               FROM memberships m
               LEFT JOIN customers c ON c.tier = m.tier
               GROUP BY m.tier, m.required_points
               ORDER BY m.required_points ASC, m.tier ASC"#,
        )
        .fetch_all(&self.pool)
        .await?;
        let unranked = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(1) FROM customers WHERE tier IS NULL",
        )
        .fetch_one(&self.pool)
        .await?;
        let mut buckets: Vec<TierBucket> = rows
            .into_iter()
            .map(|r| TierBucket {
                tier: r.get("tier"),
                customers: r.get("customers"),
            })
            .collect();
        buckets.push(TierBucket {
            tier: UNRANKED_BUCKET.to_string(),
            customers: unranked,
        });
        Ok(buckets)
    }
}
