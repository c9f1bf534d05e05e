use axum::{
    Json, Router,
    extract::{Path, Query, Request, State, rejection::{JsonRejection, PathRejection}},
    http::StatusCode,
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::error::AppResult;
use crate::application::use_cases::rewards::create_reward::CreateReward;
use crate::application::use_cases::rewards::delete_reward::DeleteReward;
use crate::application::use_cases::rewards::get_reward::GetReward;
use crate::application::use_cases::rewards::import_rewards::ImportRewards;
use crate::application::use_cases::rewards::list_rewards::ListRewards;
use crate::application::use_cases::rewards::redeem_reward::RedeemReward;
use crate::application::use_cases::rewards::update_reward::UpdateReward;
use crate::bootstrap::app_context::AppContext;
use crate::domain::rewards::{Reward, RewardPatch};
use crate::presentation::http::SearchQuery;
use crate::presentation::http::auth::{Bearer, validate_bearer};
use crate::presentation::http::imports::{ImportReportResponse, read_import};
use crate::presentation::http::transactions::LedgerReceiptResponse;
use crate::presentation::http::{json_body, path_param};

#[derive(Debug, Serialize, ToSchema)]
pub struct RewardResponse {
    pub id: i64,
    pub name: String,
    pub points_required: i64,
    pub stock: i64,
    pub claimed: i64,
}

impl From<Reward> for RewardResponse {
    fn from(r: Reward) -> Self {
        RewardResponse {
            id: r.id,
            name: r.name,
            points_required: r.points_required,
            stock: r.stock,
            claimed: r.claimed,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RewardListResponse {
    pub items: Vec<RewardResponse>,
}

/// All fields are required on create; on update absent fields are kept.
#[derive(Debug, Deserialize, ToSchema)]
pub struct RewardRequest {
    pub name: Option<String>,
    pub points_required: Option<i64>,
    pub stock: Option<i64>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct RedeemRequest {
    pub customer_id: Option<i64>,
    /// Defaults to 1.
    pub quantity: Option<i64>,
}

pub fn routes(ctx: AppContext) -> Router {
    Router::new()
        .route("/rewards", get(list_rewards).post(create_reward))
        .route("/rewards/import", post(import_rewards))
        .route(
            "/rewards/:id",
            get(get_reward).put(update_reward).delete(delete_reward),
        )
        .route("/rewards/:id/redeem", post(redeem_reward))
        .with_state(ctx)
}

#[utoipa::path(get, path = "/api/rewards", tag = "Rewards",
    params(("search" = Option<String>, Query, description = "Name contains")),
    responses((status = 200, body = RewardListResponse)))]
pub async fn list_rewards(
    State(ctx): State<AppContext>,
    bearer: Bearer,
    q: Option<Query<SearchQuery>>,
) -> AppResult<Json<RewardListResponse>> {
    validate_bearer(&ctx.cfg, bearer)?;
    let search = q.and_then(|Query(v)| v.search);
    let repo = ctx.reward_repo();
    let uc = ListRewards {
        repo: repo.as_ref(),
    };
    let items = uc.execute(search).await?;
    Ok(Json(RewardListResponse {
        items: items.into_iter().map(Into::into).collect(),
    }))
}

#[utoipa::path(get, path = "/api/rewards/{id}", tag = "Rewards",
    params(("id" = i64, Path, description = "Reward ID")),
    responses((status = 200, body = RewardResponse)))]
pub async fn get_reward(
    State(ctx): State<AppContext>,
    bearer: Bearer,
    id: Result<Path<i64>, PathRejection>,
) -> AppResult<Json<RewardResponse>> {
    validate_bearer(&ctx.cfg, bearer)?;
    let id = path_param(id)?;
    let repo = ctx.reward_repo();
    let uc = GetReward {
        repo: repo.as_ref(),
    };
    Ok(Json(uc.execute(id).await?.into()))
}

#[utoipa::path(post, path = "/api/rewards", tag = "Rewards", request_body = RewardRequest,
    responses((status = 201, body = RewardResponse)))]
pub async fn create_reward(
    State(ctx): State<AppContext>,
    bearer: Bearer,
    body: Result<Json<RewardRequest>, JsonRejection>,
) -> AppResult<(StatusCode, Json<RewardResponse>)> {
    validate_bearer(&ctx.cfg, bearer)?;
    let req = json_body(body)?;
    let repo = ctx.reward_repo();
    let uc = CreateReward {
        repo: repo.as_ref(),
    };
    let reward = uc
        .execute(req.name.as_deref(), req.points_required, req.stock)
        .await?;
    Ok((StatusCode::CREATED, Json(reward.into())))
}

#[utoipa::path(put, path = "/api/rewards/{id}", tag = "Rewards", request_body = RewardRequest,
    params(("id" = i64, Path, description = "Reward ID")),
    responses((status = 200, body = RewardResponse)))]
pub async fn update_reward(
    State(ctx): State<AppContext>,
    bearer: Bearer,
    id: Result<Path<i64>, PathRejection>,
    body: Result<Json<RewardRequest>, JsonRejection>,
) -> AppResult<Json<RewardResponse>> {
    validate_bearer(&ctx.cfg, bearer)?;
    let id = path_param(id)?;
    let req = json_body(body)?;
    let repo = ctx.reward_repo();
    let uc = UpdateReward {
        repo: repo.as_ref(),
    };
    let patch = RewardPatch {
        name: req.name,
        points_required: req.points_required,
        stock: req.stock,
    };
    Ok(Json(uc.execute(id, patch).await?.into()))
}

#[utoipa::path(delete, path = "/api/rewards/{id}", tag = "Rewards",
    params(("id" = i64, Path, description = "Reward ID")),
    responses((status = 204)))]
pub async fn delete_reward(
    State(ctx): State<AppContext>,
    bearer: Bearer,
    id: Result<Path<i64>, PathRejection>,
) -> AppResult<StatusCode> {
    validate_bearer(&ctx.cfg, bearer)?;
    let id = path_param(id)?;
    let repo = ctx.reward_repo();
    let uc = DeleteReward {
        repo: repo.as_ref(),
    };
    uc.execute(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(post, path = "/api/rewards/{id}/redeem", tag = "Rewards", request_body = RedeemRequest,
    params(("id" = i64, Path, description = "Reward ID")),
    responses(
        (status = 201, body = LedgerReceiptResponse),
        (status = 400, description = "Insufficient points", body = crate::presentation::http::error::ErrorResponse),
        (status = 409, description = "Out of stock", body = crate::presentation::http::error::ErrorResponse)
    ))]
pub async fn redeem_reward(
    State(ctx): State<AppContext>,
    bearer: Bearer,
    id: Result<Path<i64>, PathRejection>,
    body: Result<Json<RedeemRequest>, JsonRejection>,
) -> AppResult<(StatusCode, Json<LedgerReceiptResponse>)> {
    validate_bearer(&ctx.cfg, bearer)?;
    let id = path_param(id)?;
    let req = json_body(body)?;
    let rewards = ctx.reward_repo();
    let ledger = ctx.transaction_repo();
    let uc = RedeemReward {
        rewards: rewards.as_ref(),
        ledger: ledger.as_ref(),
        policy: ctx.points_policy(),
    };
    let receipt = uc.execute(id, req.customer_id, req.quantity).await?;
    Ok((StatusCode::CREATED, Json(receipt.into())))
}

#[utoipa::path(post, path = "/api/rewards/import", tag = "Rewards",
    request_body(content = crate::presentation::http::imports::ImportUploadMultipart, content_type = "multipart/form-data"),
    responses((status = 200, body = ImportReportResponse)))]
pub async fn import_rewards(
    State(ctx): State<AppContext>,
    bearer: Bearer,
    req: Request,
) -> AppResult<Json<ImportReportResponse>> {
    validate_bearer(&ctx.cfg, bearer)?;
    let payload = read_import(req, ctx.cfg.import_max_bytes).await?;
    let repo = ctx.reward_repo();
    let history = ctx.import_history_repo();
    let uc = ImportRewards {
        repo: repo.as_ref(),
        history: history.as_ref(),
    };
    Ok(Json(uc.execute(&payload).await?.into()))
}
