use crate::application::dto::imports::{ImportKind, ImportPayload, ImportReport};
use crate::application::error::AppResult;
use crate::application::ports::import_history_repository::ImportHistoryRepository;
use crate::application::ports::membership_repository::MembershipRepository;
use crate::application::services::imports::RawRecord;
use crate::application::services::imports::schemas::MEMBERSHIPS;
use crate::application::services::imports::values::{parse_non_negative_count, parse_percent};
use crate::application::use_cases::import_support::{load_records, partition, record_history, report};
use crate::domain::memberships::{NewMembership, validate_discount};

pub struct ImportMemberships<'a, R, H>
where
    R: MembershipRepository + ?Sized,
    H: ImportHistoryRepository + ?Sized,
{
    pub repo: &'a R,
    pub history: &'a H,
}

pub fn parse_row(record: &RawRecord) -> Result<NewMembership, String> {
    let tier = record.require("tier")?.to_string();
    let required_points =
        parse_non_negative_count(record.require("requiredpoints")?, "required points")?;
    let discount_percent = validate_discount(parse_percent(record.require("discount")?)?)?;
    Ok(NewMembership {
        tier,
        required_points,
        discount_percent,
    })
}

impl<'a, R, H> ImportMemberships<'a, R, H>
where
    R: MembershipRepository + ?Sized,
    H: ImportHistoryRepository + ?Sized,
{
    pub async fn execute(&self, payload: &ImportPayload) -> AppResult<ImportReport> {
        let records = load_records(&MEMBERSHIPS, payload)?;
        let (rows, rejected) = partition(&records, parse_row);
        let imported = if rows.is_empty() {
            0
        } else {
            self.repo.import(&rows).await?
        };
        let report = report(rows.len(), imported, rejected);
        record_history(self.history, ImportKind::Memberships, &payload.source, &report).await;
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::dto::imports::ImportBody;
    use crate::application::use_cases::test_support::MemoryStore;

    #[tokio::test]
    async fn headerless_tiers_are_positional() {
        let store = MemoryStore::default();
        let c = store.seed_customer("Budi", "081200000001", 250);
        let uc = ImportMemberships {
            repo: &store,
            history: &store,
        };
        let report = uc
            .execute(&ImportPayload {
                source: "tiers.csv".into(),
                body: ImportBody::Csv("Silver,100,5\nGold,500,\"10,5%\"\nBronze,-1,0\n".into()),
            })
            .await
            .unwrap();
        assert_eq!(report.imported, 2);
        assert_eq!(report.rejected.len(), 1);
        assert_eq!(report.rejected[0].row, 3);
        assert_eq!(store.customer(c.id).unwrap().tier.as_deref(), Some("Silver"));
    }
}
