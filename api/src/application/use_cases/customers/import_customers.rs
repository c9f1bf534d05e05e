use crate::application::dto::imports::{ImportKind, ImportPayload, ImportReport};
use crate::application::error::AppResult;
use crate::application::ports::customer_repository::CustomerRepository;
use crate::application::ports::import_history_repository::ImportHistoryRepository;
use crate::application::services::imports::RawRecord;
use crate::application::services::imports::schemas::CUSTOMERS;
use crate::application::services::imports::values::parse_non_negative_count;
use crate::application::use_cases::import_support::{load_records, partition, record_history, report};
use crate::domain::customers::{NewCustomer, normalize_email, normalize_phone};

pub struct ImportCustomers<'a, R, H>
where
    R: CustomerRepository + ?Sized,
    H: ImportHistoryRepository + ?Sized,
{
    pub repo: &'a R,
    pub history: &'a H,
}

pub fn parse_row(record: &RawRecord) -> Result<NewCustomer, String> {
    let name = record.require("name")?.to_string();
    let phone = normalize_phone(record.require("phone")?)?;
    let email = match record.get("email") {
        Some(raw) => normalize_email(raw)?,
        None => None,
    };
    let points = match record.get("points") {
        Some(raw) => parse_non_negative_count(raw, "points")?,
        None => 0,
    };
    Ok(NewCustomer {
        name,
        email,
        phone,
        points,
    })
}

impl<'a, R, H> ImportCustomers<'a, R, H>
where
    R: CustomerRepository + ?Sized,
    H: ImportHistoryRepository + ?Sized,
{
    pub async fn execute(&self, payload: &ImportPayload) -> AppResult<ImportReport> {
        let records = load_records(&CUSTOMERS, payload)?;
        let (rows, rejected) = partition(&records, parse_row);
        let imported = if rows.is_empty() {
            0
        } else {
            self.repo.import(&rows).await?
        };
        let report = report(rows.len(), imported, rejected);
        record_history(self.history, ImportKind::Customers, &payload.source, &report).await;
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::dto::imports::ImportBody;
    use crate::application::use_cases::test_support::MemoryStore;

    fn csv(text: &str) -> ImportPayload {
        ImportPayload {
            source: "pelanggan.csv".into(),
            body: ImportBody::Csv(text.into()),
        }
    }

    #[tokio::test]
    async fn mixed_file_imports_valid_rows_and_reports_the_rest() {
        let store = MemoryStore::default();
        store.seed_customer("Siti", "081200000001", 0);
        let uc = ImportCustomers {
            repo: &store,
            history: &store,
        };
        let report = uc
            .execute(&csv(
                "Nama Pelanggan;No. HP;Email;Total Poin\n\
                 Budi;0812-0000-0002;budi@kopi.id;1.200\n\
                 Siti lagi;081200000001;;\n\
                 ;081200000003;;\n\
                 Andi;bukan nomor;;\n",
            ))
            .await
            .unwrap();
        assert_eq!(report.imported, 1);
        assert_eq!(report.skipped, 1);
        let rows: Vec<usize> = report.rejected.iter().map(|r| r.row).collect();
        assert_eq!(rows, vec![4, 5]);
        assert!(report.rejected[0].reason.contains("name"));

        let history = store.history();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].status, "Partial");
        assert_eq!(history[0].kind, "Customers");
        assert_eq!(history[0].source, "pelanggan.csv");
    }

    #[test]
    fn row_parser_defaults_points_to_zero() {
        let record = RawRecord::new(2)
            .with("name", "Rina")
            .with("phone", "+62 811 000 111");
        let row = parse_row(&record).unwrap();
        assert_eq!(row.points, 0);
        assert_eq!(row.phone, "+62811000111");
    }
}
