use async_trait::async_trait;
use chrono::NaiveDate;

use crate::domain::reports::{DailySales, PointsTotals, TierBucket};

/// Date bounds are inclusive calendar days (UTC).
#[async_trait]
pub trait ReportRepository: Send + Sync {
    async fn daily_sales(&self, start: NaiveDate, end: NaiveDate)
    -> anyhow::Result<Vec<DailySales>>;
    async fn points_totals(&self, start: NaiveDate, end: NaiveDate)
    -> anyhow::Result<PointsTotals>;
    async fn customer_count(&self) -> anyhow::Result<i64>;
    /// Every tier ascending by required points, then the unranked bucket.
    async fn tier_distribution(&self) -> anyhow::Result<Vec<TierBucket>>;
}
