use axum::{
    Json, Router,
    extract::{Path, Query, Request, State, rejection::{JsonRejection, PathRejection}},
    http::StatusCode,
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::error::AppResult;
use crate::application::use_cases::products::ProductInput;
use crate::application::use_cases::products::create_product::CreateProduct;
use crate::application::use_cases::products::delete_product::DeleteProduct;
use crate::application::use_cases::products::get_product::GetProduct;
use crate::application::use_cases::products::import_products::ImportProducts;
use crate::application::use_cases::products::list_products::ListProducts;
use crate::application::use_cases::products::update_product::UpdateProduct;
use crate::bootstrap::app_context::AppContext;
use crate::domain::products::Product;
use crate::presentation::http::SearchQuery;
use crate::presentation::http::auth::{Bearer, validate_bearer};
use crate::presentation::http::imports::{ImportReportResponse, read_import};
use crate::presentation::http::{json_body, path_param};

#[derive(Debug, Serialize, ToSchema)]
pub struct ProductResponse {
    pub id: i64,
    pub name: String,
    pub category: String,
    pub notes: Option<String>,
    pub exchange_points: i64,
    pub unit_price: Option<i64>,
    /// True when the product is paid for with points.
    pub redeemable: bool,
}

impl From<Product> for ProductResponse {
    fn from(p: Product) -> Self {
        let redeemable = p.is_redeemable();
        ProductResponse {
            id: p.id,
            name: p.name,
            category: p.category,
            notes: p.notes,
            exchange_points: p.exchange_points,
            unit_price: p.unit_price,
            redeemable,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ProductListResponse {
    pub items: Vec<ProductResponse>,
}

/// Name and category are required. `PUT` replaces the whole product, so
/// omitted fields are cleared.
#[derive(Debug, Deserialize, ToSchema)]
pub struct ProductRequest {
    pub name: Option<String>,
    pub category: Option<String>,
    pub notes: Option<String>,
    pub exchange_points: Option<i64>,
    /// Whole rupiah.
    pub unit_price: Option<i64>,
}

impl From<ProductRequest> for ProductInput {
    fn from(r: ProductRequest) -> Self {
        ProductInput {
            name: r.name,
            category: r.category,
            notes: r.notes,
            exchange_points: r.exchange_points,
            unit_price: r.unit_price,
        }
    }
}

pub fn routes(ctx: AppContext) -> Router {
    Router::new()
        .route("/products", get(list_products).post(create_product))
        .route("/products/import", post(import_products))
        .route(
            "/products/:id",
            get(get_product).put(update_product).delete(delete_product),
        )
        .with_state(ctx)
}

#[utoipa::path(get, path = "/api/products", tag = "Products",
    params(("search" = Option<String>, Query, description = "Name or category contains; a number also matches the id")),
    responses((status = 200, body = ProductListResponse)))]
pub async fn list_products(
    State(ctx): State<AppContext>,
    bearer: Bearer,
    q: Option<Query<SearchQuery>>,
) -> AppResult<Json<ProductListResponse>> {
    validate_bearer(&ctx.cfg, bearer)?;
    let search = q.and_then(|Query(v)| v.search);
    let repo = ctx.product_repo();
    let uc = ListProducts {
        repo: repo.as_ref(),
    };
    let items = uc.execute(search).await?;
    Ok(Json(ProductListResponse {
        items: items.into_iter().map(Into::into).collect(),
    }))
}

#[utoipa::path(get, path = "/api/products/{id}", tag = "Products",
    params(("id" = i64, Path, description = "Product ID")),
    responses((status = 200, body = ProductResponse)))]
pub async fn get_product(
    State(ctx): State<AppContext>,
    bearer: Bearer,
    id: Result<Path<i64>, PathRejection>,
) -> AppResult<Json<ProductResponse>> {
    validate_bearer(&ctx.cfg, bearer)?;
    let id = path_param(id)?;
    let repo = ctx.product_repo();
    let uc = GetProduct {
        repo: repo.as_ref(),
    };
    Ok(Json(uc.execute(id).await?.into()))
}

#[utoipa::path(post, path = "/api/products", tag = "Products", request_body = ProductRequest,
    responses((status = 201, body = ProductResponse)))]
pub async fn create_product(
    State(ctx): State<AppContext>,
    bearer: Bearer,
    body: Result<Json<ProductRequest>, JsonRejection>,
) -> AppResult<(StatusCode, Json<ProductResponse>)> {
    validate_bearer(&ctx.cfg, bearer)?;
    let req = json_body(body)?;
    let repo = ctx.product_repo();
    let uc = CreateProduct {
        repo: repo.as_ref(),
    };
    let product = uc.execute(&req.into()).await?;
    Ok((StatusCode::CREATED, Json(product.into())))
}

#[utoipa::path(put, path = "/api/products/{id}", tag = "Products", request_body = ProductRequest,
    params(("id" = i64, Path, description = "Product ID")),
    responses((status = 200, body = ProductResponse)))]
pub async fn update_product(
    State(ctx): State<AppContext>,
    bearer: Bearer,
    id: Result<Path<i64>, PathRejection>,
    body: Result<Json<ProductRequest>, JsonRejection>,
) -> AppResult<Json<ProductResponse>> {
    validate_bearer(&ctx.cfg, bearer)?;
    let id = path_param(id)?;
    let req = json_body(body)?;
    let repo = ctx.product_repo();
    let uc = UpdateProduct {
        repo: repo.as_ref(),
    };
    Ok(Json(uc.execute(id, &req.into()).await?.into()))
}

#[utoipa::path(delete, path = "/api/products/{id}", tag = "Products",
    params(("id" = i64, Path, description = "Product ID")),
    responses((status = 204), (status = 409, body = crate::presentation::http::error::ErrorResponse)))]
pub async fn delete_product(
    State(ctx): State<AppContext>,
    bearer: Bearer,
    id: Result<Path<i64>, PathRejection>,
) -> AppResult<StatusCode> {
    validate_bearer(&ctx.cfg, bearer)?;
    let id = path_param(id)?;
    let repo = ctx.product_repo();
    let uc = DeleteProduct {
        repo: repo.as_ref(),
    };
    uc.execute(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(post, path = "/api/products/import", tag = "Products",
    request_body(content = crate::presentation::http::imports::ImportUploadMultipart, content_type = "multipart/form-data"),
    responses((status = 200, body = ImportReportResponse)))]
pub async fn import_products(
    State(ctx): State<AppContext>,
    bearer: Bearer,
    req: Request,
) -> AppResult<Json<ImportReportResponse>> {
    validate_bearer(&ctx.cfg, bearer)?;
    let payload = read_import(req, ctx.cfg.import_max_bytes).await?;
    let repo = ctx.product_repo();
    let history = ctx.import_history_repo();
    let uc = ImportProducts {
        repo: repo.as_ref(),
        history: history.as_ref(),
    };
    Ok(Json(uc.execute(&payload).await?.into()))
}
