use axum::{
    Json, Router,
    extract::{FromRequestParts, State, rejection::JsonRejection},
    http::{StatusCode, request::Parts},
    routing::{get, post},
};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::error::{AppError, AppResult};
use crate::application::use_cases::auth::login::{Login as LoginUc, LoginRequest as LoginDto};
use crate::application::use_cases::auth::me::GetMe;
use crate::application::use_cases::auth::register::{
    Register as RegisterUc, RegisterRequest as RegisterDto,
};
use crate::application::use_cases::auth::reset_password::{
    ResetPassword, ResetPasswordRequest as ResetDto,
};
use crate::bootstrap::app_context::AppContext;
use crate::bootstrap::config::Config;
use crate::domain::accounts::{Account, Role};
use crate::presentation::http::json_body;

#[derive(Debug, Deserialize, ToSchema)]
pub struct RegisterRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    /// `owner` or `staff` (`karyawan` is accepted too).
    pub role: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AccountResponse {
    pub id: i64,
    pub role: String,
    pub name: String,
    pub email: String,
    pub username: String,
    pub phone: Option<String>,
}

impl From<Account> for AccountResponse {
    fn from(a: Account) -> Self {
        AccountResponse {
            id: a.id,
            role: a.role.as_str().to_string(),
            name: a.name,
            email: a.email,
            username: a.username,
            phone: a.phone,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LoginResponse {
    pub access_token: String,
    pub account: AccountResponse,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct ForgotPasswordRequest {
    /// Email address or username of the account.
    #[serde(default)]
    pub identifier: String,
    #[serde(default)]
    pub new_password: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub role: Role,
    pub exp: usize,
}

/// Identity carried by a verified bearer token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthUser {
    pub id: i64,
    pub role: Role,
}

pub fn routes(ctx: AppContext) -> Router {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/forgot", post(forgot_password))
        .route("/me", get(me))
        .with_state(ctx)
}

/// Without a bearer token only the first owner account can be created.
#[utoipa::path(post, path = "/api/auth/register", tag = "Auth", request_body = RegisterRequest, responses(
    (status = 201, body = AccountResponse),
    (status = 401, description = "An owner exists and no owner token was sent", body = crate::presentation::http::error::ErrorResponse),
    (status = 403, description = "Staff cannot create accounts", body = crate::presentation::http::error::ErrorResponse),
    (status = 409, body = crate::presentation::http::error::ErrorResponse)
))]
pub async fn register(
    State(ctx): State<AppContext>,
    bearer: Option<Bearer>,
    body: Result<Json<RegisterRequest>, JsonRejection>,
) -> AppResult<(StatusCode, Json<AccountResponse>)> {
    let caller = bearer
        .map(|b| validate_bearer(&ctx.cfg, b))
        .transpose()?
        .map(|user| user.role);
    let req = json_body(body)?;
    let repo = ctx.account_repo();
    let uc = RegisterUc {
        repo: repo.as_ref(),
    };
    let dto = RegisterDto {
        name: req.name,
        email: req.email,
        phone: req.phone,
        username: req.username,
        password: req.password,
        role: req.role,
    };
    let account = uc.execute(caller, &dto).await?;
    Ok((StatusCode::CREATED, Json(account.into())))
}

#[utoipa::path(post, path = "/api/auth/login", tag = "Auth", request_body = LoginRequest, security(()), responses(
    (status = 200, body = LoginResponse),
    (status = 401, body = crate::presentation::http::error::ErrorResponse),
    (status = 404, body = crate::presentation::http::error::ErrorResponse)
))]
pub async fn login(
    State(ctx): State<AppContext>,
    body: Result<Json<LoginRequest>, JsonRejection>,
) -> AppResult<Json<LoginResponse>> {
    let req = json_body(body)?;
    let repo = ctx.account_repo();
    let uc = LoginUc {
        repo: repo.as_ref(),
    };
    let dto = LoginDto {
        username: req.username,
        password: req.password,
    };
    let account = uc.execute(&dto).await?;
    let token = issue_token(&ctx.cfg, &account)?;
    Ok(Json(LoginResponse {
        access_token: token,
        account: account.into(),
    }))
}

#[utoipa::path(post, path = "/api/auth/forgot", tag = "Auth", request_body = ForgotPasswordRequest, responses(
    (status = 204),
    (status = 403, body = crate::presentation::http::error::ErrorResponse),
    (status = 404, body = crate::presentation::http::error::ErrorResponse)
))]
pub async fn forgot_password(
    State(ctx): State<AppContext>,
    bearer: Bearer,
    body: Result<Json<ForgotPasswordRequest>, JsonRejection>,
) -> AppResult<StatusCode> {
    let user = validate_bearer(&ctx.cfg, bearer)?;
    let req = json_body(body)?;
    let repo = ctx.account_repo();
    let uc = ResetPassword {
        repo: repo.as_ref(),
    };
    let dto = ResetDto {
        identifier: req.identifier,
        new_password: req.new_password,
    };
    uc.execute(user.role, &dto).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(get, path = "/api/auth/me", tag = "Auth", responses((status = 200, body = AccountResponse)))]
pub async fn me(State(ctx): State<AppContext>, bearer: Bearer) -> AppResult<Json<AccountResponse>> {
    let user = validate_bearer(&ctx.cfg, bearer)?;
    let repo = ctx.account_repo();
    let uc = GetMe {
        repo: repo.as_ref(),
    };
    let account = uc.execute(user.role, user.id).await?;
    Ok(Json(account.into()))
}

// --- Bearer extractor & JWT utils ---

pub struct Bearer(pub String);

#[axum::async_trait]
impl<S> FromRequestParts<S> for Bearer
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .headers
            .get(axum::http::header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|auth| auth.strip_prefix("Bearer "))
            .map(|t| Bearer(t.trim().to_string()))
            .filter(|b| !b.0.is_empty())
            .ok_or_else(|| AppError::Unauthorized("missing bearer token".into()))
    }
}

pub(crate) fn issue_token(cfg: &Config, account: &Account) -> AppResult<String> {
    let now = chrono::Utc::now().timestamp() as usize;
    let ttl = usize::try_from(cfg.jwt_expires_secs)
        .map_err(|_| AppError::Internal(anyhow::anyhow!("JWT_EXPIRES_SECS is negative")))?;
    let claims = Claims {
        sub: account.id.to_string(),
        role: account.role,
        exp: now.saturating_add(ttl),
    };
    jsonwebtoken::encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(cfg.jwt_secret.as_bytes()),
    )
    .map_err(|e| AppError::Internal(e.into()))
}

pub(crate) fn validate_bearer(cfg: &Config, bearer: Bearer) -> AppResult<AuthUser> {
    let unauthorized = || AppError::Unauthorized("invalid or expired token".into());
    let data = jsonwebtoken::decode::<Claims>(
        &bearer.0,
        &DecodingKey::from_secret(cfg.jwt_secret.as_bytes()),
        &Validation::default(),
    )
    .map_err(|_| unauthorized())?;
    let id = data.claims.sub.parse::<i64>().map_err(|_| unauthorized())?;
    Ok(AuthUser {
        id,
        role: data.claims.role,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bootstrap::config::test_config;

    fn owner() -> Account {
        Account {
            id: 42,
            role: Role::Owner,
            name: "Dewi".into(),
            email: "dewi@kopi.id".into(),
            username: "dewi".into(),
            phone: None,
            password_hash: None,
        }
    }

    #[test]
    fn token_round_trips_id_and_role() {
        let cfg = test_config();
        let token = issue_token(&cfg, &owner()).unwrap();
        let user = validate_bearer(&cfg, Bearer(token)).unwrap();
        assert_eq!(
            user,
            AuthUser {
                id: 42,
                role: Role::Owner
            }
        );
    }

    #[test]
    fn token_signed_with_another_secret_is_rejected() {
        let mut other = test_config();
        other.jwt_secret = "some-other-secret-some-other-secret".into();
        let token = issue_token(&other, &owner()).unwrap();
        let err = validate_bearer(&test_config(), Bearer(token)).unwrap_err();
        assert!(matches!(err, AppError::Unauthorized(_)));
    }

    #[test]
    fn negative_lifetime_never_issues_a_token() {
        let mut cfg = test_config();
        cfg.jwt_expires_secs = -1;
        assert!(matches!(
            issue_token(&cfg, &owner()),
            Err(AppError::Internal(_))
        ));
    }

    #[test]
    fn expired_token_is_rejected() {
        let cfg = test_config();
        let claims = Claims {
            sub: "42".into(),
            role: Role::Staff,
            exp: 1_000,
        };
        let token = jsonwebtoken::encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(cfg.jwt_secret.as_bytes()),
        )
        .unwrap();
        assert!(validate_bearer(&cfg, Bearer(token)).is_err());
    }

    #[tokio::test]
    async fn bearer_is_read_from_authorization_header() {
        let req = axum::http::Request::builder()
            .header("authorization", "Bearer abc.def")
            .body(())
            .unwrap();
        let (mut parts, _) = req.into_parts();
        let bearer = Bearer::from_request_parts(&mut parts, &()).await.unwrap();
        assert_eq!(bearer.0, "abc.def");

        let req = axum::http::Request::builder().body(()).unwrap();
        let (mut parts, _) = req.into_parts();
        assert!(Bearer::from_request_parts(&mut parts, &()).await.is_err());
    }
}
