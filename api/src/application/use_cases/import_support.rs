use crate::application::dto::imports::{
    ImportBody, ImportKind, ImportPayload, ImportReport, RejectedRow,
};
use crate::application::error::{AppError, AppResult};
use crate::application::ports::import_history_repository::ImportHistoryRepository;
use crate::application::services::imports::{
    ImportSchema, RawRecord, records_from_csv, records_from_json,
};

pub fn load_records(schema: &ImportSchema, payload: &ImportPayload) -> AppResult<Vec<RawRecord>> {
    let records = match &payload.body {
        ImportBody::Json(value) => records_from_json(schema, value),
        ImportBody::Csv(text) => records_from_csv(schema, text),
    };
    records.map_err(|e| AppError::Validation(e.to_string()))
}

/// Splits records into parsed rows and per-row rejections.
pub fn partition<T>(
    records: &[RawRecord],
    parse: impl Fn(&RawRecord) -> Result<T, String>,
) -> (Vec<T>, Vec<RejectedRow>) {
    let mut rows = Vec::with_capacity(records.len());
    let mut rejected = Vec::new();
    for record in records {
        if record.is_empty() {
            rejected.push(RejectedRow {
                row: record.row,
                reason: "no recognised columns".into(),
            });
            continue;
        }
        match parse(record) {
            Ok(row) => rows.push(row),
            Err(reason) => rejected.push(RejectedRow {
                row: record.row,
                reason,
            }),
        }
    }
    (rows, rejected)
}

pub fn report(attempted: usize, imported: u64, rejected: Vec<RejectedRow>) -> ImportReport {
    ImportReport {
        imported,
        skipped: (attempted as u64).saturating_sub(imported),
        rejected,
    }
}

/// Appends the history entry. A failed history write never fails the import.
pub async fn record_history<H: ImportHistoryRepository + ?Sized>(
    history: &H,
    kind: ImportKind,
    source: &str,
    report: &ImportReport,
) {
    tracing::info!(
        kind = kind.as_str(),
        source,
        imported = report.imported,
        skipped = report.skipped,
        rejected = report.rejected.len(),
        "import_finished"
    );
    if let Err(err) = history
        .record(kind, report.imported, report.status(), source)
        .await
    {
        tracing::warn!(kind = kind.as_str(), error = ?err, "import_history_write_failed");
    }
}
