use axum::{
    Json, Router,
    extract::{Path, Query, Request, State, rejection::{JsonRejection, PathRejection}},
    http::StatusCode,
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::error::AppResult;
use crate::application::use_cases::notifications::create_notification::CreateNotification;
use crate::application::use_cases::notifications::delete_notification::DeleteNotification;
use crate::application::use_cases::notifications::get_notification::GetNotification;
use crate::application::use_cases::notifications::import_notifications::ImportNotifications;
use crate::application::use_cases::notifications::list_notifications::ListNotifications;
use crate::application::use_cases::notifications::update_notification::UpdateNotification;
use crate::bootstrap::app_context::AppContext;
use crate::domain::notifications::Notification;
use crate::presentation::http::auth::{Bearer, validate_bearer};
use crate::presentation::http::imports::{ImportReportResponse, read_import};
use crate::presentation::http::{json_body, path_param};

#[derive(Debug, Serialize, ToSchema)]
pub struct NotificationResponse {
    pub id: i64,
    pub message: String,
    pub customer_id: Option<i64>,
    pub customer_name: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl From<Notification> for NotificationResponse {
    fn from(n: Notification) -> Self {
        NotificationResponse {
            id: n.id,
            message: n.message,
            customer_id: n.customer_id,
            customer_name: n.customer_name,
            created_at: n.created_at,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct NotificationListResponse {
    pub items: Vec<NotificationResponse>,
}

#[derive(Debug, Deserialize)]
pub struct ListNotificationsQuery {
    pub customer_id: Option<i64>,
    pub search: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateNotificationRequest {
    pub message: Option<String>,
    pub customer_id: Option<i64>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateNotificationRequest {
    pub message: Option<String>,
    /// Omit to keep, `null` to detach from the customer.
    #[serde(default, deserialize_with = "deserialize_double_option")]
    #[schema(value_type = Option<i64>)]
    pub customer_id: DoubleOption<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DoubleOption<T> {
    #[default]
    NotProvided,
    Null,
    Some(T),
}

impl<T> DoubleOption<T> {
    fn into_patch(self) -> Option<Option<T>> {
        match self {
            DoubleOption::NotProvided => None,
            DoubleOption::Null => Some(None),
            DoubleOption::Some(v) => Some(Some(v)),
        }
    }
}

fn deserialize_double_option<'de, D, T>(deserializer: D) -> Result<DoubleOption<T>, D::Error>
where
    D: serde::Deserializer<'de>,
    T: serde::Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(|opt| match opt {
        None => DoubleOption::Null,
        Some(value) => DoubleOption::Some(value),
    })
}

pub fn routes(ctx: AppContext) -> Router {
    Router::new()
        .route(
            "/notifications",
            get(list_notifications).post(create_notification),
        )
        .route("/notifications/import", post(import_notifications))
        .route(
            "/notifications/:id",
            get(get_notification)
                .put(update_notification)
                .delete(delete_notification),
        )
        .with_state(ctx)
}

#[utoipa::path(get, path = "/api/notifications", tag = "Notifications",
    params(
        ("customer_id" = Option<i64>, Query, description = "Only this customer's messages"),
        ("search" = Option<String>, Query, description = "Message or customer name contains")
    ),
    responses((status = 200, body = NotificationListResponse)))]
pub async fn list_notifications(
    State(ctx): State<AppContext>,
    bearer: Bearer,
    q: Option<Query<ListNotificationsQuery>>,
) -> AppResult<Json<NotificationListResponse>> {
    validate_bearer(&ctx.cfg, bearer)?;
    let (customer_id, search) = q
        .map(|Query(v)| (v.customer_id, v.search))
        .unwrap_or((None, None));
    let repo = ctx.notification_repo();
    let uc = ListNotifications {
        repo: repo.as_ref(),
    };
    let items = uc.execute(customer_id, search).await?;
    Ok(Json(NotificationListResponse {
        items: items.into_iter().map(Into::into).collect(),
    }))
}

#[utoipa::path(get, path = "/api/notifications/{id}", tag = "Notifications",
    params(("id" = i64, Path, description = "Notification ID")),
    responses((status = 200, body = NotificationResponse)))]
pub async fn get_notification(
    State(ctx): State<AppContext>,
    bearer: Bearer,
    id: Result<Path<i64>, PathRejection>,
) -> AppResult<Json<NotificationResponse>> {
    validate_bearer(&ctx.cfg, bearer)?;
    let id = path_param(id)?;
    let repo = ctx.notification_repo();
    let uc = GetNotification {
        repo: repo.as_ref(),
    };
    Ok(Json(uc.execute(id).await?.into()))
}

#[utoipa::path(post, path = "/api/notifications", tag = "Notifications", request_body = CreateNotificationRequest,
    responses((status = 201, body = NotificationResponse), (status = 404, body = crate::presentation::http::error::ErrorResponse)))]
pub async fn create_notification(
    State(ctx): State<AppContext>,
    bearer: Bearer,
    body: Result<Json<CreateNotificationRequest>, JsonRejection>,
) -> AppResult<(StatusCode, Json<NotificationResponse>)> {
    validate_bearer(&ctx.cfg, bearer)?;
    let req = json_body(body)?;
    let repo = ctx.notification_repo();
    let customers = ctx.customer_repo();
    let uc = CreateNotification {
        repo: repo.as_ref(),
        customers: customers.as_ref(),
    };
    let created = uc.execute(req.message.as_deref(), req.customer_id).await?;
    Ok((StatusCode::CREATED, Json(created.into())))
}

#[utoipa::path(put, path = "/api/notifications/{id}", tag = "Notifications", request_body = UpdateNotificationRequest,
    params(("id" = i64, Path, description = "Notification ID")),
    responses((status = 200, body = NotificationResponse)))]
pub async fn update_notification(
    State(ctx): State<AppContext>,
    bearer: Bearer,
    id: Result<Path<i64>, PathRejection>,
    body: Result<Json<UpdateNotificationRequest>, JsonRejection>,
) -> AppResult<Json<NotificationResponse>> {
    validate_bearer(&ctx.cfg, bearer)?;
    let id = path_param(id)?;
    let req = json_body(body)?;
    let repo = ctx.notification_repo();
    let customers = ctx.customer_repo();
    let uc = UpdateNotification {
        repo: repo.as_ref(),
        customers: customers.as_ref(),
    };
    let updated = uc
        .execute(id, req.message.as_deref(), req.customer_id.into_patch())
        .await?;
    Ok(Json(updated.into()))
}

#[utoipa::path(delete, path = "/api/notifications/{id}", tag = "Notifications",
    params(("id" = i64, Path, description = "Notification ID")),
    responses((status = 204)))]
pub async fn delete_notification(
    State(ctx): State<AppContext>,
    bearer: Bearer,
    id: Result<Path<i64>, PathRejection>,
) -> AppResult<StatusCode> {
    validate_bearer(&ctx.cfg, bearer)?;
    let id = path_param(id)?;
    let repo = ctx.notification_repo();
    let uc = DeleteNotification {
        repo: repo.as_ref(),
    };
    uc.execute(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(post, path = "/api/notifications/import", tag = "Notifications",
    request_body(content = crate::presentation::http::imports::ImportUploadMultipart, content_type = "multipart/form-data"),
    responses((status = 200, body = ImportReportResponse)))]
pub async fn import_notifications(
    State(ctx): State<AppContext>,
    bearer: Bearer,
    req: Request,
) -> AppResult<Json<ImportReportResponse>> {
    validate_bearer(&ctx.cfg, bearer)?;
    let payload = read_import(req, ctx.cfg.import_max_bytes).await?;
    let repo = ctx.notification_repo();
    let customers = ctx.customer_repo();
    let history = ctx.import_history_repo();
    let uc = ImportNotifications {
        repo: repo.as_ref(),
        customers: customers.as_ref(),
        history: history.as_ref(),
    };
    Ok(Json(uc.execute(&payload).await?.into()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn customer_id_distinguishes_absent_from_null() {
        let absent: UpdateNotificationRequest =
            serde_json::from_str(r#"{"message":"Promo"}"#).unwrap();
        assert_eq!(absent.customer_id.into_patch(), None);

        let null: UpdateNotificationRequest =
            serde_json::from_str(r#"{"customer_id":null}"#).unwrap();
        assert_eq!(null.customer_id.into_patch(), Some(None));

        let set: UpdateNotificationRequest =
            serde_json::from_str(r#"{"customer_id":7}"#).unwrap();
        assert_eq!(set.customer_id.into_patch(), Some(Some(7)));
    }
}
