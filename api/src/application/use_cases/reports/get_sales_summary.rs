use chrono::{NaiveDate, Utc};

use crate::application::error::{AppError, AppResult};
use crate::application::ports::report_repository::ReportRepository;
use crate::domain::reports::{SalesSummary, report_window};

pub struct GetSalesSummary<'a, R: ReportRepository + ?Sized> {
    pub repo: &'a R,
    pub default_days: i64,
}

impl<'a, R: ReportRepository + ?Sized> GetSalesSummary<'a, R> {
    pub async fn execute(
        &self,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> AppResult<SalesSummary> {
        let today = Utc::now().date_naive();
        let (start, end) =
            report_window(start, end, today, self.default_days).map_err(AppError::Validation)?;

        let sales = self.repo.daily_sales(start, end).await?;
        let points = self.repo.points_totals(start, end).await?;
        let total_customers = self.repo.customer_count().await?;
        let membership = self.repo.tier_distribution().await?;

        Ok(SalesSummary {
            start,
            end,
            total_revenue: sales.iter().map(|d| d.revenue).sum(),
            transaction_count: sales.iter().map(|d| d.transactions).sum(),
            total_customers,
            points,
            sales,
            membership,
        })
    }
}
