use crate::application::dto::imports::{ImportKind, ImportPayload, ImportReport};
use crate::application::error::AppResult;
use crate::application::ports::import_history_repository::ImportHistoryRepository;
use crate::application::ports::product_repository::ProductRepository;
use crate::application::services::imports::RawRecord;
use crate::application::services::imports::schemas::PRODUCTS;
use crate::application::services::imports::values::{parse_amount, parse_non_negative_count};
use crate::application::use_cases::import_support::{load_records, partition, record_history, report};
use crate::domain::products::NewProduct;

pub struct ImportProducts<'a, R, H>
where
    R: ProductRepository + ?Sized,
    H: ImportHistoryRepository + ?Sized,
{
    pub repo: &'a R,
    pub history: &'a H,
}

pub fn parse_row(record: &RawRecord) -> Result<NewProduct, String> {
    let name = record.require("name")?.to_string();
    let category = record.require("category")?.to_string();
    let exchange_points = match record.get("points") {
        Some(raw) => parse_non_negative_count(raw, "points")?,
        None => 0,
    };
    let unit_price = record
        .get("price")
        .map(|raw| parse_amount(raw).map_err(|e| format!("price: {}", e)))
        .transpose()?;
    if unit_price.is_some_and(|p| p < 0) {
        return Err("price cannot be negative".into());
    }
    Ok(NewProduct {
        name,
        category,
        notes: record.get("notes").map(str::to_string),
        exchange_points,
        unit_price,
    })
}

impl<'a, R, H> ImportProducts<'a, R, H>
where
    R: ProductRepository + ?Sized,
    H: ImportHistoryRepository + ?Sized,
{
    pub async fn execute(&self, payload: &ImportPayload) -> AppResult<ImportReport> {
        let records = load_records(&PRODUCTS, payload)?;
        let (rows, rejected) = partition(&records, parse_row);
        let imported = if rows.is_empty() {
            0
        } else {
            self.repo.import(&rows).await?
        };
        let report = report(rows.len(), imported, rejected);
        record_history(self.history, ImportKind::Products, &payload.source, &report).await;
        Ok(report)
    }
}
