use axum::{
    Json, Router,
    extract::{Path, Query, Request, State, rejection::{JsonRejection, PathRejection}},
    http::StatusCode,
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::error::AppResult;
use crate::application::use_cases::memberships::create_membership::{
    CreateMembership, MembershipInput,
};
use crate::application::use_cases::memberships::delete_membership::DeleteMembership;
use crate::application::use_cases::memberships::get_membership::GetMembership;
use crate::application::use_cases::memberships::import_memberships::ImportMemberships;
use crate::application::use_cases::memberships::list_memberships::ListMemberships;
use crate::application::use_cases::memberships::update_membership::UpdateMembership;
use crate::bootstrap::app_context::AppContext;
use crate::domain::memberships::Membership;
use crate::presentation::http::SearchQuery;
use crate::presentation::http::auth::{Bearer, validate_bearer};
use crate::presentation::http::imports::{ImportReportResponse, read_import};
use crate::presentation::http::{json_body, path_param};

#[derive(Debug, Serialize, ToSchema)]
pub struct MembershipResponse {
    pub tier: String,
    pub required_points: i64,
    pub discount_percent: f64,
    pub member_count: i64,
}

impl From<Membership> for MembershipResponse {
    fn from(m: Membership) -> Self {
        MembershipResponse {
            tier: m.tier,
            required_points: m.required_points,
            discount_percent: m.discount_percent,
            member_count: m.member_count,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct MembershipListResponse {
    pub items: Vec<MembershipResponse>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateMembershipRequest {
    pub tier: Option<String>,
    pub required_points: Option<i64>,
    pub discount_percent: Option<f64>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateMembershipRequest {
    pub required_points: Option<i64>,
    pub discount_percent: Option<f64>,
}

pub fn routes(ctx: AppContext) -> Router {
    Router::new()
        .route("/memberships", get(list_memberships).post(create_membership))
        .route("/memberships/import", post(import_memberships))
        .route(
            "/memberships/:tier",
            get(get_membership)
                .put(update_membership)
                .delete(delete_membership),
        )
        .with_state(ctx)
}

#[utoipa::path(get, path = "/api/memberships", tag = "Memberships",
    params(("search" = Option<String>, Query, description = "Tier name contains")),
    responses((status = 200, body = MembershipListResponse)))]
pub async fn list_memberships(
    State(ctx): State<AppContext>,
    bearer: Bearer,
    q: Option<Query<SearchQuery>>,
) -> AppResult<Json<MembershipListResponse>> {
    validate_bearer(&ctx.cfg, bearer)?;
    let search = q.and_then(|Query(v)| v.search);
    let repo = ctx.membership_repo();
    let uc = ListMemberships {
        repo: repo.as_ref(),
    };
    let items = uc.execute(search).await?;
    Ok(Json(MembershipListResponse {
        items: items.into_iter().map(Into::into).collect(),
    }))
}

#[utoipa::path(get, path = "/api/memberships/{tier}", tag = "Memberships",
    params(("tier" = String, Path, description = "Tier name")),
    responses((status = 200, body = MembershipResponse)))]
pub async fn get_membership(
    State(ctx): State<AppContext>,
    bearer: Bearer,
    tier: Result<Path<String>, PathRejection>,
) -> AppResult<Json<MembershipResponse>> {
    validate_bearer(&ctx.cfg, bearer)?;
    let tier = path_param(tier)?;
    let repo = ctx.membership_repo();
    let uc = GetMembership {
        repo: repo.as_ref(),
    };
    Ok(Json(uc.execute(&tier).await?.into()))
}

#[utoipa::path(post, path = "/api/memberships", tag = "Memberships", request_body = CreateMembershipRequest,
    responses((status = 201, body = MembershipResponse), (status = 409, body = crate::presentation::http::error::ErrorResponse)))]
pub async fn create_membership(
    State(ctx): State<AppContext>,
    bearer: Bearer,
    body: Result<Json<CreateMembershipRequest>, JsonRejection>,
) -> AppResult<(StatusCode, Json<MembershipResponse>)> {
    validate_bearer(&ctx.cfg, bearer)?;
    let req = json_body(body)?;
    let repo = ctx.membership_repo();
    let uc = CreateMembership {
        repo: repo.as_ref(),
    };
    let input = MembershipInput {
        tier: req.tier,
        required_points: req.required_points,
        discount_percent: req.discount_percent,
    };
    let membership = uc.execute(&input).await?;
    Ok((StatusCode::CREATED, Json(membership.into())))
}

#[utoipa::path(put, path = "/api/memberships/{tier}", tag = "Memberships", request_body = UpdateMembershipRequest,
    params(("tier" = String, Path, description = "Tier name")),
    responses((status = 200, body = MembershipResponse)))]
pub async fn update_membership(
    State(ctx): State<AppContext>,
    bearer: Bearer,
    tier: Result<Path<String>, PathRejection>,
    body: Result<Json<UpdateMembershipRequest>, JsonRejection>,
) -> AppResult<Json<MembershipResponse>> {
    validate_bearer(&ctx.cfg, bearer)?;
    let tier = path_param(tier)?;
    let req = json_body(body)?;
    let repo = ctx.membership_repo();
    let uc = UpdateMembership {
        repo: repo.as_ref(),
    };
    let membership = uc
        .execute(&tier, req.required_points, req.discount_percent)
        .await?;
    Ok(Json(membership.into()))
}

#[utoipa::path(delete, path = "/api/memberships/{tier}", tag = "Memberships",
    params(("tier" = String, Path, description = "Tier name")),
    responses((status = 204), (status = 409, body = crate::presentation::http::error::ErrorResponse)))]
pub async fn delete_membership(
    State(ctx): State<AppContext>,
    bearer: Bearer,
    tier: Result<Path<String>, PathRejection>,
) -> AppResult<StatusCode> {
    validate_bearer(&ctx.cfg, bearer)?;
    let tier = path_param(tier)?;
    let repo = ctx.membership_repo();
    let uc = DeleteMembership {
        repo: repo.as_ref(),
    };
    uc.execute(&tier).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(post, path = "/api/memberships/import", tag = "Memberships",
    request_body(content = crate::presentation::http::imports::ImportUploadMultipart, content_type = "multipart/form-data"),
    responses((status = 200, body = ImportReportResponse)))]
pub async fn import_memberships(
    State(ctx): State<AppContext>,
    bearer: Bearer,
    req: Request,
) -> AppResult<Json<ImportReportResponse>> {
    validate_bearer(&ctx.cfg, bearer)?;
    let payload = read_import(req, ctx.cfg.import_max_bytes).await?;
    let repo = ctx.membership_repo();
    let history = ctx.import_history_repo();
    let uc = ImportMemberships {
        repo: repo.as_ref(),
        history: history.as_ref(),
    };
    Ok(Json(uc.execute(&payload).await?.into()))
}
