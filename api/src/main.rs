use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::extract::MatchedPath;
use dotenvy::dotenv;
use http::HeaderValue;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use loyalty_api::bootstrap::app_context::{AppContext, AppServices};
use loyalty_api::bootstrap::config::Config;
use loyalty_api::infrastructure::db::repositories::{
    account_repository_sqlx::SqlxAccountRepository,
    customer_repository_sqlx::SqlxCustomerRepository,
    import_history_repository_sqlx::SqlxImportHistoryRepository,
    membership_repository_sqlx::SqlxMembershipRepository,
    notification_repository_sqlx::SqlxNotificationRepository,
    product_repository_sqlx::SqlxProductRepository, report_repository_sqlx::SqlxReportRepository,
    reward_repository_sqlx::SqlxRewardRepository,
    transaction_repository_sqlx::SqlxTransactionRepository,
};
use loyalty_api::presentation::http as api_http;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
        paths(
            loyalty_api::presentation::http::health::health,
            loyalty_api::presentation::http::auth::register,
            loyalty_api::presentation::http::auth::login,
            loyalty_api::presentation::http::auth::forgot_password,
            loyalty_api::presentation::http::auth::me,
            loyalty_api::presentation::http::customers::list_customers,
            loyalty_api::presentation::http::customers::get_customer,
            loyalty_api::presentation::http::customers::create_customer,
            loyalty_api::presentation::http::customers::update_customer,
            loyalty_api::presentation::http::customers::delete_customer,
            loyalty_api::presentation::http::customers::import_customers,
            loyalty_api::presentation::http::products::list_products,
            loyalty_api::presentation::http::products::get_product,
            loyalty_api::presentation::http::products::create_product,
            loyalty_api::presentation::http::products::update_product,
            loyalty_api::presentation::http::products::delete_product,
            loyalty_api::presentation::http::products::import_products,
            loyalty_api::presentation::http::memberships::list_memberships,
            loyalty_api::presentation::http::memberships::get_membership,
            loyalty_api::presentation::http::memberships::create_membership,
            loyalty_api::presentation::http::memberships::update_membership,
            loyalty_api::presentation::http::memberships::delete_membership,
            loyalty_api::presentation::http::memberships::import_memberships,
            loyalty_api::presentation::http::rewards::list_rewards,
            loyalty_api::presentation::http::rewards::get_reward,
            loyalty_api::presentation::http::rewards::create_reward,
            loyalty_api::presentation::http::rewards::update_reward,
            loyalty_api::presentation::http::rewards::delete_reward,
            loyalty_api::presentation::http::rewards::redeem_reward,
            loyalty_api::presentation::http::rewards::import_rewards,
            loyalty_api::presentation::http::notifications::list_notifications,
            loyalty_api::presentation::http::notifications::get_notification,
            loyalty_api::presentation::http::notifications::create_notification,
            loyalty_api::presentation::http::notifications::update_notification,
            loyalty_api::presentation::http::notifications::delete_notification,
            loyalty_api::presentation::http::notifications::import_notifications,
            loyalty_api::presentation::http::transactions::list_transactions,
            loyalty_api::presentation::http::transactions::record_transaction,
            loyalty_api::presentation::http::transactions::import_transactions,
            loyalty_api::presentation::http::reports::sales_report,
            loyalty_api::presentation::http::reports::import_sales_report,
            loyalty_api::presentation::http::reports::import_history,
        ),
        components(schemas(
            loyalty_api::presentation::http::health::HealthResp,
            loyalty_api::presentation::http::error::ErrorResponse,
            loyalty_api::presentation::http::imports::RejectedRowItem,
            loyalty_api::presentation::http::imports::ImportReportResponse,
            loyalty_api::presentation::http::imports::ImportUploadMultipart,
            loyalty_api::presentation::http::auth::RegisterRequest,
            loyalty_api::presentation::http::auth::LoginRequest,
            loyalty_api::presentation::http::auth::LoginResponse,
            loyalty_api::presentation::http::auth::ForgotPasswordRequest,
            loyalty_api::presentation::http::auth::AccountResponse,
            loyalty_api::presentation::http::customers::CustomerResponse,
            loyalty_api::presentation::http::customers::CustomerListResponse,
            loyalty_api::presentation::http::customers::CustomerRequest,
            loyalty_api::presentation::http::products::ProductResponse,
            loyalty_api::presentation::http::products::ProductListResponse,
            loyalty_api::presentation::http::products::ProductRequest,
            loyalty_api::presentation::http::memberships::MembershipResponse,
            loyalty_api::presentation::http::memberships::MembershipListResponse,
            loyalty_api::presentation::http::memberships::CreateMembershipRequest,
            loyalty_api::presentation::http::memberships::UpdateMembershipRequest,
            loyalty_api::presentation::http::rewards::RewardResponse,
            loyalty_api::presentation::http::rewards::RewardListResponse,
            loyalty_api::presentation::http::rewards::RewardRequest,
            loyalty_api::presentation::http::rewards::RedeemRequest,
            loyalty_api::presentation::http::notifications::NotificationResponse,
            loyalty_api::presentation::http::notifications::NotificationListResponse,
            loyalty_api::presentation::http::notifications::CreateNotificationRequest,
            loyalty_api::presentation::http::notifications::UpdateNotificationRequest,
            loyalty_api::presentation::http::transactions::TransactionResponse,
            loyalty_api::presentation::http::transactions::TransactionListResponse,
            loyalty_api::presentation::http::transactions::LedgerReceiptResponse,
            loyalty_api::presentation::http::transactions::RecordTransactionRequest,
            loyalty_api::presentation::http::reports::ReportStats,
            loyalty_api::presentation::http::reports::DailySalesItem,
            loyalty_api::presentation::http::reports::TierBucketItem,
            loyalty_api::presentation::http::reports::SalesReportResponse,
            loyalty_api::presentation::http::reports::ImportHistoryItem,
            loyalty_api::presentation::http::reports::ImportHistoryListResponse,
        )),
        tags(
            (name = "Auth", description = "Owner and staff accounts"),
            (name = "Customers", description = "Loyalty members"),
            (name = "Products", description = "Menu catalogue"),
            (name = "Memberships", description = "Membership tiers"),
            (name = "Rewards", description = "Point exchange catalogue"),
            (name = "Notifications", description = "Customer messages"),
            (name = "Transactions", description = "Sales and points ledger"),
            (name = "Reports", description = "Sales reports and import history"),
            (name = "Health", description = "System health checks")
        )
    )]
struct ApiDoc;

fn build_cors(cfg: &Config) -> CorsLayer {
    let base = CorsLayer::new()
        .allow_methods([
            http::Method::GET,
            http::Method::POST,
            http::Method::PUT,
            http::Method::DELETE,
            http::Method::PATCH,
            http::Method::OPTIONS,
        ])
        .allow_headers([http::header::CONTENT_TYPE, http::header::AUTHORIZATION]);

    match cfg.frontend_url.as_deref().map(HeaderValue::from_str) {
        Some(Ok(origin)) => base.allow_origin(origin),
        Some(Err(_)) | None if !cfg.is_production => {
            base.allow_origin(AllowOrigin::mirror_request())
        }
        // Production without a usable FRONTEND_URL answers no origin.
        _ => base.allow_origin(AllowOrigin::exact(HeaderValue::from_static(
            "http://invalid",
        ))),
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = ?e, "shutdown_signal_failed");
    }
    info!("shutting_down");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "loyalty_api=debug,axum=info,tower_http=info".into()),
        )
        .init();

    let cfg = Config::from_env()?;
    info!(
        api_port = cfg.api_port,
        frontend_url = ?cfg.frontend_url,
        points_earning_rate = cfg.points_earning_rate,
        production = cfg.is_production,
        "Starting loyalty backend"
    );

    // Database
    let pool = loyalty_api::infrastructure::db::connect_pool(&cfg.database_url).await?;
    loyalty_api::infrastructure::db::migrate(&pool).await?;

    let services = AppServices::new(
        Arc::new(SqlxAccountRepository::new(pool.clone())),
        Arc::new(SqlxCustomerRepository::new(pool.clone())),
        Arc::new(SqlxProductRepository::new(pool.clone())),
        Arc::new(SqlxMembershipRepository::new(pool.clone())),
        Arc::new(SqlxRewardRepository::new(pool.clone())),
        Arc::new(SqlxNotificationRepository::new(pool.clone())),
        Arc::new(SqlxTransactionRepository::new(pool.clone())),
        Arc::new(SqlxReportRepository::new(pool.clone())),
        Arc::new(SqlxImportHistoryRepository::new(pool.clone())),
    );
    let ctx = AppContext::new(cfg.clone(), services);

    let api_router = Router::new()
        .nest("/api", api_http::health::routes(pool.clone()))
        .nest("/api/auth", api_http::auth::routes(ctx.clone()))
        .nest("/api", api_http::customers::routes(ctx.clone()))
        .nest("/api", api_http::products::routes(ctx.clone()))
        .nest("/api", api_http::memberships::routes(ctx.clone()))
        .nest("/api", api_http::rewards::routes(ctx.clone()))
        .nest("/api", api_http::notifications::routes(ctx.clone()))
        .nest("/api", api_http::transactions::routes(ctx.clone()))
        .nest("/api", api_http::reports::routes(ctx.clone()))
        .merge(SwaggerUi::new("/api/docs").url("/api/openapi.json", ApiDoc::openapi()))
        .layer(build_cors(&cfg))
        // Multipart uploads are capped again per file by the import handlers
        .layer(DefaultBodyLimit::max(cfg.import_max_bytes))
        .layer(
            TraceLayer::new_for_http().make_span_with(|req: &http::Request<_>| {
                let method = req.method().clone();
                let uri = req.uri().clone();
                let matched = req
                    .extensions()
                    .get::<MatchedPath>()
                    .map(|p| p.as_str().to_string())
                    .unwrap_or_default();
                tracing::info_span!("http", %method, %uri, matched_path = %matched)
            }),
        );

    let api_addr = SocketAddr::from(([0, 0, 0, 0], cfg.api_port));
    info!(%api_addr, "HTTP API listening");
    let listener = tokio::net::TcpListener::bind(api_addr).await?;
    axum::serve(listener, api_router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}
