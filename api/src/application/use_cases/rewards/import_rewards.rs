use crate::application::dto::imports::{ImportKind, ImportPayload, ImportReport};
use crate::application::error::AppResult;
use crate::application::ports::import_history_repository::ImportHistoryRepository;
use crate::application::ports::reward_repository::RewardRepository;
use crate::application::services::imports::RawRecord;
use crate::application::services::imports::schemas::REWARDS;
use crate::application::services::imports::values::parse_non_negative_count;
use crate::application::use_cases::import_support::{load_records, partition, record_history, report};
use crate::domain::rewards::NewReward;

pub struct ImportRewards<'a, R, H>
where
    R: RewardRepository + ?Sized,
    H: ImportHistoryRepository + ?Sized,
{
    pub repo: &'a R,
    pub history: &'a H,
}

pub fn parse_row(record: &RawRecord) -> Result<NewReward, String> {
    Ok(NewReward {
        name: record.require("name")?.to_string(),
        points_required: parse_non_negative_count(
            record.require("pointsrequired")?,
            "points required",
        )?,
        stock: parse_non_negative_count(record.require("stock")?, "stock")?,
    })
}

impl<'a, R, H> ImportRewards<'a, R, H>
where
    R: RewardRepository + ?Sized,
    H: ImportHistoryRepository + ?Sized,
{
    pub async fn execute(&self, payload: &ImportPayload) -> AppResult<ImportReport> {
        let records = load_records(&REWARDS, payload)?;
        let (rows, rejected) = partition(&records, parse_row);
        let imported = if rows.is_empty() {
            0
        } else {
            self.repo.import(&rows).await?
        };
        let report = report(rows.len(), imported, rejected);
        record_history(self.history, ImportKind::Rewards, &payload.source, &report).await;
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stock_is_required() {
        let record = RawRecord::new(4)
            .with("name", "Tote Bag")
            .with("pointsrequired", "150");
        assert_eq!(parse_row(&record).unwrap_err(), "missing stock");
    }
}
