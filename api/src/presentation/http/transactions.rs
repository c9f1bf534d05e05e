use axum::{
    Json, Router,
    extract::{Query, Request, State, rejection::{JsonRejection, QueryRejection}},
    http::StatusCode,
    routing::{get, post},
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::dto::ledger::LedgerReceipt;
use crate::application::error::{AppError, AppResult};
use crate::application::use_cases::transactions::import_transactions::ImportTransactions;
use crate::application::use_cases::transactions::list_transactions::ListTransactions;
use crate::application::use_cases::transactions::record_transaction::{
    RecordTransaction, RecordTransactionRequest as RecordDto,
};
use crate::bootstrap::app_context::AppContext;
use crate::domain::transactions::{LedgerKind, Transaction};
use crate::presentation::http::auth::{Bearer, validate_bearer};
use crate::presentation::http::imports::{ImportReportResponse, read_import};
use crate::presentation::http::json_body;

#[derive(Debug, Serialize, ToSchema)]
pub struct TransactionResponse {
    pub id: i64,
    pub customer_id: Option<i64>,
    pub product_id: Option<i64>,
    pub reward_id: Option<i64>,
    pub product_name: String,
    pub quantity: i64,
    /// Whole rupiah.
    pub total_price: i64,
    pub payment_method: String,
    pub payment_status: String,
    pub points_delta: i64,
    pub occurred_at: chrono::DateTime<chrono::Utc>,
}

impl From<Transaction> for TransactionResponse {
    fn from(t: Transaction) -> Self {
        TransactionResponse {
            id: t.id,
            customer_id: t.customer_id,
            product_id: t.product_id,
            reward_id: t.reward_id,
            product_name: t.product_name,
            quantity: t.quantity,
            total_price: t.total_price,
            payment_method: t.payment_method,
            payment_status: t.payment_status,
            points_delta: t.points_delta,
            occurred_at: t.occurred_at,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TransactionListResponse {
    pub items: Vec<TransactionResponse>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LedgerReceiptResponse {
    pub transaction: TransactionResponse,
    pub redemption: bool,
    pub earned: i64,
    pub spent: i64,
    pub new_balance: i64,
    pub tier: Option<String>,
}

impl From<LedgerReceipt> for LedgerReceiptResponse {
    fn from(r: LedgerReceipt) -> Self {
        LedgerReceiptResponse {
            transaction: r.transaction.into(),
            redemption: r.kind == LedgerKind::Redemption,
            earned: r.earned,
            spent: r.spent,
            new_balance: r.new_balance,
            tier: r.tier,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct RecordTransactionRequest {
    pub customer_id: Option<i64>,
    pub product_id: Option<i64>,
    pub quantity: Option<i64>,
    /// Defaults to `Cash`.
    pub payment_method: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ListTransactionsQuery {
    pub customer_id: Option<i64>,
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
    pub limit: Option<i64>,
}

pub fn routes(ctx: AppContext) -> Router {
    Router::new()
        .route(
            "/transactions",
            get(list_transactions).post(record_transaction),
        )
        .route("/transactions/import", post(import_transactions))
        .with_state(ctx)
}

#[utoipa::path(get, path = "/api/transactions", tag = "Transactions",
    params(
        ("customer_id" = Option<i64>, Query, description = "Only this customer's entries"),
        ("start" = Option<String>, Query, description = "First day (YYYY-MM-DD, UTC)"),
        ("end" = Option<String>, Query, description = "Last day (YYYY-MM-DD, UTC)"),
        ("limit" = Option<i64>, Query, description = "Default 100, max 500")
    ),
    responses((status = 200, body = TransactionListResponse)))]
pub async fn list_transactions(
    State(ctx): State<AppContext>,
    bearer: Bearer,
    q: Result<Query<ListTransactionsQuery>, QueryRejection>,
) -> AppResult<Json<TransactionListResponse>> {
    validate_bearer(&ctx.cfg, bearer)?;
    let Query(q) = q.map_err(|e| AppError::validation(e.body_text()))?;
    let ledger = ctx.transaction_repo();
    let uc = ListTransactions {
        ledger: ledger.as_ref(),
    };
    let items = uc.execute(q.customer_id, q.start, q.end, q.limit).await?;
    Ok(Json(TransactionListResponse {
        items: items.into_iter().map(Into::into).collect(),
    }))
}

#[utoipa::path(post, path = "/api/transactions", tag = "Transactions", request_body = RecordTransactionRequest,
    responses(
        (status = 201, body = LedgerReceiptResponse),
        (status = 400, description = "Invalid input or insufficient points", body = crate::presentation::http::error::ErrorResponse),
        (status = 404, body = crate::presentation::http::error::ErrorResponse)
    ))]
pub async fn record_transaction(
    State(ctx): State<AppContext>,
    bearer: Bearer,
    body: Result<Json<RecordTransactionRequest>, JsonRejection>,
) -> AppResult<(StatusCode, Json<LedgerReceiptResponse>)> {
    validate_bearer(&ctx.cfg, bearer)?;
    let req = json_body(body)?;
    let products = ctx.product_repo();
    let ledger = ctx.transaction_repo();
    let uc = RecordTransaction {
        products: products.as_ref(),
        ledger: ledger.as_ref(),
        policy: ctx.points_policy(),
    };
    let dto = RecordDto {
        customer_id: req.customer_id,
        product_id: req.product_id,
        quantity: req.quantity,
        payment_method: req.payment_method,
    };
    let receipt = uc.execute(&dto).await?;
    Ok((StatusCode::CREATED, Json(receipt.into())))
}

#[utoipa::path(post, path = "/api/transactions/import", tag = "Transactions",
    request_body(content = crate::presentation::http::imports::ImportUploadMultipart, content_type = "multipart/form-data"),
    responses(
        (status = 200, body = ImportReportResponse),
        (status = 400, description = "A row failed validation; nothing was imported", body = crate::presentation::http::error::ErrorResponse)
    ))]
pub async fn import_transactions(
    State(ctx): State<AppContext>,
    bearer: Bearer,
    req: Request,
) -> AppResult<Json<ImportReportResponse>> {
    validate_bearer(&ctx.cfg, bearer)?;
    let payload = read_import(req, ctx.cfg.import_max_bytes).await?;
    let ledger = ctx.transaction_repo();
    let history = ctx.import_history_repo();
    let uc = ImportTransactions {
        ledger: ledger.as_ref(),
        history: history.as_ref(),
    };
    Ok(Json(uc.execute(&payload).await?.into()))
}
