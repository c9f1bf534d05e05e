use chrono::{Duration, NaiveDate};

pub const UNRANKED_BUCKET: &str = "Unranked";

#[derive(Debug, Clone, PartialEq)]
pub struct DailySales {
    pub day: NaiveDate,
    pub revenue: i64,
    pub transactions: i64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TierBucket {
    pub tier: String,
    pub customers: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PointsTotals {
    pub earned: i64,
    pub redeemed: i64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SalesSummary {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub total_revenue: i64,
    pub transaction_count: i64,
    pub total_customers: i64,
    pub points: PointsTotals,
    pub sales: Vec<DailySales>,
    pub membership: Vec<TierBucket>,
}

/// Inclusive reporting window. Missing bounds default to `default_days`
/// ending at `end` (or today).
pub fn report_window(
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
    today: NaiveDate,
    default_days: i64,
) -> Result<(NaiveDate, NaiveDate), String> {
    let end = end.unwrap_or(today);
    let start = start.unwrap_or(end - Duration::days(default_days));
    if start > end {
        return Err(format!(
            "start date {} is after end date {}",
            start, end
        ));
    }
    Ok((start, end))
}
