use std::collections::HashSet;

use crate::application::dto::imports::{ImportKind, ImportPayload, ImportReport, RejectedRow};
use crate::application::error::AppResult;
use crate::application::ports::customer_repository::CustomerRepository;
use crate::application::ports::import_history_repository::ImportHistoryRepository;
use crate::application::ports::notification_repository::NotificationRepository;
use crate::application::services::imports::RawRecord;
use crate::application::services::imports::schemas::NOTIFICATIONS;
use crate::application::services::imports::values::parse_count;
use crate::application::use_cases::import_support::{load_records, partition, record_history, report};
use crate::domain::notifications::NewNotification;

pub struct ImportNotifications<'a, N, C, H>
where
    N: NotificationRepository + ?Sized,
    C: CustomerRepository + ?Sized,
    H: ImportHistoryRepository + ?Sized,
{
    pub repo: &'a N,
    pub customers: &'a C,
    pub history: &'a H,
}

pub fn parse_row(record: &RawRecord) -> Result<(usize, NewNotification), String> {
    let message = record.require("message")?.to_string();
    let customer_id = record
        .get("customerid")
        .map(|raw| parse_count(raw).map_err(|e| format!("customer id: {}", e)))
        .transpose()?;
    Ok((
        record.row,
        NewNotification {
            message,
            customer_id,
        },
    ))
}

impl<'a, N, C, H> ImportNotifications<'a, N, C, H>
where
    N: NotificationRepository + ?Sized,
    C: CustomerRepository + ?Sized,
    H: ImportHistoryRepository + ?Sized,
{
    pub async fn execute(&self, payload: &ImportPayload) -> AppResult<ImportReport> {
        let records = load_records(&NOTIFICATIONS, payload)?;
        let (parsed, mut rejected) = partition(&records, parse_row);

        let mut known = HashSet::new();
        let mut rows = Vec::with_capacity(parsed.len());
        for (row, notification) in parsed {
            if let Some(cid) = notification.customer_id {
                if !known.contains(&cid) {
                    if self.customers.get(cid).await?.is_none() {
                        rejected.push(RejectedRow {
                            row,
                            reason: format!("customer {} not found", cid),
                        });
                        continue;
                    }
                    known.insert(cid);
                }
            }
            rows.push(notification);
        }
        rejected.sort_by_key(|r| r.row);

        let imported = if rows.is_empty() {
            0
        } else {
            self.repo.import(&rows).await?
        };
        let report = report(rows.len(), imported, rejected);
        record_history(self.history, ImportKind::Notifications, &payload.source, &report).await;
        Ok(report)
    }
}
