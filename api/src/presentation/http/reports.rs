use axum::{
    Json, Router,
    extract::{Query, Request, State, rejection::QueryRejection},
    routing::{get, post},
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::error::{AppError, AppResult};
use crate::application::ports::import_history_repository::ImportHistoryRow;
use crate::application::use_cases::reports::get_sales_summary::GetSalesSummary;
use crate::application::use_cases::reports::import_sales_report::ImportSalesReport;
use crate::application::use_cases::reports::list_import_history::ListImportHistory;
use crate::bootstrap::app_context::AppContext;
use crate::domain::reports::SalesSummary;
use crate::presentation::http::auth::{Bearer, validate_bearer};
use crate::presentation::http::imports::{ImportReportResponse, read_import};

#[derive(Debug, Serialize, ToSchema)]
pub struct ReportStats {
    pub total_revenue: i64,
    pub transaction_count: i64,
    pub total_customers: i64,
    pub points_earned: i64,
    pub points_redeemed: i64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DailySalesItem {
    pub date: NaiveDate,
    pub revenue: i64,
    pub transactions: i64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TierBucketItem {
    pub tier: String,
    pub customers: i64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SalesReportResponse {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub stats: ReportStats,
    pub sales: Vec<DailySalesItem>,
    pub membership: Vec<TierBucketItem>,
}

impl From<SalesSummary> for SalesReportResponse {
    fn from(s: SalesSummary) -> Self {
        SalesReportResponse {
            start_date: s.start,
            end_date: s.end,
            stats: ReportStats {
                total_revenue: s.total_revenue,
                transaction_count: s.transaction_count,
                total_customers: s.total_customers,
                points_earned: s.points.earned,
                points_redeemed: s.points.redeemed,
            },
            sales: s
                .sales
                .into_iter()
                .map(|d| DailySalesItem {
                    date: d.day,
                    revenue: d.revenue,
                    transactions: d.transactions,
                })
                .collect(),
            membership: s
                .membership
                .into_iter()
                .map(|b| TierBucketItem {
                    tier: b.tier,
                    customers: b.customers,
                })
                .collect(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ImportHistoryItem {
    pub id: i64,
    pub kind: String,
    pub row_count: i64,
    pub status: String,
    pub source: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl From<ImportHistoryRow> for ImportHistoryItem {
    fn from(r: ImportHistoryRow) -> Self {
        ImportHistoryItem {
            id: r.id,
            kind: r.kind,
            row_count: r.row_count,
            status: r.status,
            source: r.source,
            created_at: r.created_at,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ImportHistoryListResponse {
    pub items: Vec<ImportHistoryItem>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ReportQuery {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

#[derive(Debug, Default, Deserialize)]
pub struct HistoryQuery {
    pub limit: Option<i64>,
}

pub fn routes(ctx: AppContext) -> Router {
    Router::new()
        .route("/reports", get(sales_report))
        .route("/reports/import", post(import_sales_report))
        .route("/reports/imports", get(import_history))
        .with_state(ctx)
}

#[utoipa::path(get, path = "/api/reports", tag = "Reports",
    params(
        ("start_date" = Option<String>, Query, description = "YYYY-MM-DD; defaults to the configured window before end_date"),
        ("end_date" = Option<String>, Query, description = "YYYY-MM-DD; defaults to today (UTC)")
    ),
    responses((status = 200, body = SalesReportResponse), (status = 400, body = crate::presentation::http::error::ErrorResponse)))]
pub async fn sales_report(
    State(ctx): State<AppContext>,
    bearer: Bearer,
    q: Result<Query<ReportQuery>, QueryRejection>,
) -> AppResult<Json<SalesReportResponse>> {
    validate_bearer(&ctx.cfg, bearer)?;
    let Query(q) = q.map_err(|e| AppError::validation(e.body_text()))?;
    let repo = ctx.report_repo();
    let uc = GetSalesSummary {
        repo: repo.as_ref(),
        default_days: ctx.cfg.report_default_days,
    };
    let summary = uc.execute(q.start_date, q.end_date).await?;
    Ok(Json(summary.into()))
}

#[utoipa::path(post, path = "/api/reports/import", tag = "Reports",
    request_body(content = crate::presentation::http::imports::ImportUploadMultipart, content_type = "multipart/form-data"),
    responses((status = 200, body = ImportReportResponse)))]
pub async fn import_sales_report(
    State(ctx): State<AppContext>,
    bearer: Bearer,
    req: Request,
) -> AppResult<Json<ImportReportResponse>> {
    validate_bearer(&ctx.cfg, bearer)?;
    let payload = read_import(req, ctx.cfg.import_max_bytes).await?;
    let ledger = ctx.transaction_repo();
    let history = ctx.import_history_repo();
    let uc = ImportSalesReport {
        ledger: ledger.as_ref(),
        history: history.as_ref(),
    };
    Ok(Json(uc.execute(&payload).await?.into()))
}

#[utoipa::path(get, path = "/api/reports/imports", tag = "Reports",
    params(("limit" = Option<i64>, Query, description = "Default 20, max 200")),
    responses((status = 200, body = ImportHistoryListResponse)))]
pub async fn import_history(
    State(ctx): State<AppContext>,
    bearer: Bearer,
    q: Result<Query<HistoryQuery>, QueryRejection>,
) -> AppResult<Json<ImportHistoryListResponse>> {
    validate_bearer(&ctx.cfg, bearer)?;
    let Query(q) = q.map_err(|e| AppError::validation(e.body_text()))?;
    let history = ctx.import_history_repo();
    let uc = ListImportHistory {
        history: history.as_ref(),
    };
    let items = uc.execute(q.limit).await?;
    Ok(Json(ImportHistoryListResponse {
        items: items.into_iter().map(Into::into).collect(),
    }))
}
