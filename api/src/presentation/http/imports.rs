//! Request body handling shared by every `/import` route.
//!
//! A body is accepted as a JSON array, as raw CSV text or as a multipart
//! form whose `file` field holds the spreadsheet. The byte limit applies to
//! the raw body and to the uploaded file alike.

use axum::{
    extract::{FromRequest, Multipart, Request},
    http::{StatusCode, header::CONTENT_TYPE},
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::application::dto::imports::{ImportBody, ImportPayload, ImportReport, RejectedRow};
use crate::application::error::{AppError, AppResult};

const RAW_CSV_SOURCE: &str = "upload.csv";
const JSON_SOURCE: &str = "json";

#[derive(Debug, Serialize, ToSchema)]
pub struct RejectedRowItem {
    pub row: usize,
    pub reason: String,
}

impl From<RejectedRow> for RejectedRowItem {
    fn from(r: RejectedRow) -> Self {
        RejectedRowItem {
            row: r.row,
            reason: r.reason,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ImportReportResponse {
    pub imported: u64,
    pub skipped: u64,
    /// `Success`, `Partial` or `Failed`.
    pub status: String,
    pub rejected: Vec<RejectedRowItem>,
}

impl From<ImportReport> for ImportReportResponse {
    fn from(r: ImportReport) -> Self {
        ImportReportResponse {
            imported: r.imported,
            skipped: r.skipped,
            status: r.status().as_str().to_string(),
            rejected: r.rejected.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(ToSchema)]
#[allow(dead_code)]
pub struct ImportUploadMultipart {
    /// CSV export of the sheet
    #[schema(value_type = String, format = Binary)]
    file: String,
}

pub async fn read_import(req: Request, limit: usize) -> AppResult<ImportPayload> {
    let content_type = req
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_ascii_lowercase();

    if content_type.starts_with("multipart/form-data") {
        let mut multipart = Multipart::from_request(req, &())
            .await
            .map_err(|e| AppError::validation(e.body_text()))?;
        return read_multipart(&mut multipart, limit).await;
    }

    let bytes = axum::body::to_bytes(req.into_body(), limit)
        .await
        .map_err(|_| AppError::PayloadTooLarge { limit })?;
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Err(AppError::validation("import body is empty"));
    }

    if content_type.contains("json") {
        return parse_json(&bytes, JSON_SOURCE);
    }
    if content_type.is_empty()
        || content_type.starts_with("text/")
        || content_type.starts_with("application/csv")
    {
        return parse_csv(bytes.to_vec(), RAW_CSV_SOURCE);
    }
    Err(AppError::validation(format!(
        "unsupported content type '{}'",
        content_type
    )))
}

async fn read_multipart(multipart: &mut Multipart, limit: usize) -> AppResult<ImportPayload> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_error(e, limit))?
    {
        if field.name() != Some("file") {
            continue;
        }
        let source = field
            .file_name()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or(RAW_CSV_SOURCE)
            .to_string();
        let data = field.bytes().await.map_err(|e| multipart_error(e, limit))?;
        if data.len() > limit {
            return Err(AppError::PayloadTooLarge { limit });
        }
        if data.iter().all(u8::is_ascii_whitespace) {
            return Err(AppError::validation("uploaded file is empty"));
        }
        if source.to_ascii_lowercase().ends_with(".json") {
            return parse_json(&data, &source);
        }
        return parse_csv(data.to_vec(), &source);
    }
    Err(AppError::validation("multipart upload needs a 'file' field"))
}

fn multipart_error(err: axum::extract::multipart::MultipartError, limit: usize) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge { limit }
    } else {
        AppError::validation(err.body_text())
    }
}

fn parse_json(bytes: &[u8], source: &str) -> AppResult<ImportPayload> {
    let value = serde_json::from_slice(bytes)
        .map_err(|e| AppError::validation(format!("invalid JSON: {}", e)))?;
    Ok(ImportPayload {
        source: source.to_string(),
        body: ImportBody::Json(value),
    })
}

fn parse_csv(bytes: Vec<u8>, source: &str) -> AppResult<ImportPayload> {
    let text =
        String::from_utf8(bytes).map_err(|_| AppError::validation("CSV must be UTF-8 text"))?;
    Ok(ImportPayload {
        source: source.to_string(),
        body: ImportBody::Csv(text),
    })
}
