use axum::{
    Json, Router,
    extract::{Path, Query, Request, State, rejection::{JsonRejection, PathRejection}},
    http::StatusCode,
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::error::AppResult;
use crate::application::use_cases::customers::CustomerInput;
use crate::application::use_cases::customers::create_customer::CreateCustomer;
use crate::application::use_cases::customers::delete_customer::DeleteCustomer;
use crate::application::use_cases::customers::get_customer::GetCustomer;
use crate::application::use_cases::customers::import_customers::ImportCustomers;
use crate::application::use_cases::customers::list_customers::ListCustomers;
use crate::application::use_cases::customers::update_customer::UpdateCustomer;
use crate::bootstrap::app_context::AppContext;
use crate::domain::customers::Customer;
use crate::presentation::http::SearchQuery;
use crate::presentation::http::auth::{Bearer, validate_bearer};
use crate::presentation::http::imports::{ImportReportResponse, read_import};
use crate::presentation::http::{json_body, path_param};

#[derive(Debug, Serialize, ToSchema)]
pub struct CustomerResponse {
    pub id: i64,
    pub name: String,
    pub email: Option<String>,
    pub phone: String,
    pub points: i64,
    /// Highest membership tier the balance qualifies for.
    pub tier: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl From<Customer> for CustomerResponse {
    fn from(c: Customer) -> Self {
        CustomerResponse {
            id: c.id,
            name: c.name,
            email: c.email,
            phone: c.phone,
            points: c.points,
            tier: c.tier,
            created_at: c.created_at,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CustomerListResponse {
    pub items: Vec<CustomerResponse>,
}

/// Create payload; on update absent fields keep their value and an empty
/// `email` clears it.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CustomerRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub points: Option<i64>,
}

impl From<CustomerRequest> for CustomerInput {
    fn from(r: CustomerRequest) -> Self {
        CustomerInput {
            name: r.name,
            email: r.email,
            phone: r.phone,
            points: r.points,
        }
    }
}

pub fn routes(ctx: AppContext) -> Router {
    Router::new()
        .route("/customers", get(list_customers).post(create_customer))
        .route("/customers/import", post(import_customers))
        .route(
            "/customers/:id",
            get(get_customer).put(update_customer).delete(delete_customer),
        )
        .with_state(ctx)
}

#[utoipa::path(get, path = "/api/customers", tag = "Customers",
    params(("search" = Option<String>, Query, description = "Name, email or phone contains")),
    responses((status = 200, body = CustomerListResponse)))]
pub async fn list_customers(
    State(ctx): State<AppContext>,
    bearer: Bearer,
    q: Option<Query<SearchQuery>>,
) -> AppResult<Json<CustomerListResponse>> {
    validate_bearer(&ctx.cfg, bearer)?;
    let search = q.and_then(|Query(v)| v.search);
    let repo = ctx.customer_repo();
    let uc = ListCustomers {
        repo: repo.as_ref(),
    };
    let items = uc.execute(search).await?;
    Ok(Json(CustomerListResponse {
        items: items.into_iter().map(Into::into).collect(),
    }))
}

#[utoipa::path(get, path = "/api/customers/{id}", tag = "Customers",
    params(("id" = i64, Path, description = "Customer ID")),
    responses((status = 200, body = CustomerResponse), (status = 404, body = crate::presentation::http::error::ErrorResponse)))]
pub async fn get_customer(
    State(ctx): State<AppContext>,
    bearer: Bearer,
    id: Result<Path<i64>, PathRejection>,
) -> AppResult<Json<CustomerResponse>> {
    validate_bearer(&ctx.cfg, bearer)?;
    let id = path_param(id)?;
    let repo = ctx.customer_repo();
    let uc = GetCustomer {
        repo: repo.as_ref(),
    };
    Ok(Json(uc.execute(id).await?.into()))
}

#[utoipa::path(post, path = "/api/customers", tag = "Customers", request_body = CustomerRequest,
    responses((status = 201, body = CustomerResponse), (status = 409, body = crate::presentation::http::error::ErrorResponse)))]
pub async fn create_customer(
    State(ctx): State<AppContext>,
    bearer: Bearer,
    body: Result<Json<CustomerRequest>, JsonRejection>,
) -> AppResult<(StatusCode, Json<CustomerResponse>)> {
    validate_bearer(&ctx.cfg, bearer)?;
    let req = json_body(body)?;
    let repo = ctx.customer_repo();
    let uc = CreateCustomer {
        repo: repo.as_ref(),
    };
    let customer = uc.execute(&req.into()).await?;
    Ok((StatusCode::CREATED, Json(customer.into())))
}

#[utoipa::path(put, path = "/api/customers/{id}", tag = "Customers", request_body = CustomerRequest,
    params(("id" = i64, Path, description = "Customer ID")),
    responses((status = 200, body = CustomerResponse), (status = 404, body = crate::presentation::http::error::ErrorResponse)))]
pub async fn update_customer(
    State(ctx): State<AppContext>,
    bearer: Bearer,
    id: Result<Path<i64>, PathRejection>,
    body: Result<Json<CustomerRequest>, JsonRejection>,
) -> AppResult<Json<CustomerResponse>> {
    validate_bearer(&ctx.cfg, bearer)?;
    let id = path_param(id)?;
    let req = json_body(body)?;
    let repo = ctx.customer_repo();
    let uc = UpdateCustomer {
        repo: repo.as_ref(),
    };
    Ok(Json(uc.execute(id, &req.into()).await?.into()))
}

#[utoipa::path(delete, path = "/api/customers/{id}", tag = "Customers",
    params(("id" = i64, Path, description = "Customer ID")),
    responses((status = 204), (status = 409, body = crate::presentation::http::error::ErrorResponse)))]
pub async fn delete_customer(
    State(ctx): State<AppContext>,
    bearer: Bearer,
    id: Result<Path<i64>, PathRejection>,
) -> AppResult<StatusCode> {
    validate_bearer(&ctx.cfg, bearer)?;
    let id = path_param(id)?;
    let repo = ctx.customer_repo();
    let uc = DeleteCustomer {
        repo: repo.as_ref(),
    };
    uc.execute(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(post, path = "/api/customers/import", tag = "Customers",
    request_body(content = crate::presentation::http::imports::ImportUploadMultipart, content_type = "multipart/form-data"),
    responses((status = 200, body = ImportReportResponse), (status = 413, body = crate::presentation::http::error::ErrorResponse)))]
pub async fn import_customers(
    State(ctx): State<AppContext>,
    bearer: Bearer,
    req: Request,
) -> AppResult<Json<ImportReportResponse>> {
    validate_bearer(&ctx.cfg, bearer)?;
    let payload = read_import(req, ctx.cfg.import_max_bytes).await?;
    let repo = ctx.customer_repo();
    let history = ctx.import_history_repo();
    let uc = ImportCustomers {
        repo: repo.as_ref(),
        history: history.as_ref(),
    };
    Ok(Json(uc.execute(&payload).await?.into()))
}
