pub mod auth;
pub mod customers;
pub mod error;
pub mod health;
pub mod imports;
pub mod memberships;
pub mod notifications;
pub mod products;
pub mod reports;
pub mod rewards;
pub mod transactions;

use axum::Json;
use axum::extract::Path;
use axum::extract::rejection::{JsonRejection, PathRejection};
use serde::Deserialize;

use crate::application::error::{AppError, AppResult};

/// `?search=` on list endpoints.
#[derive(Debug, Default, Deserialize)]
pub struct SearchQuery {
    pub search: Option<String>,
}

/// Body rejections answer with the JSON error shape instead of axum's plain text.
pub(crate) fn json_body<T>(body: Result<Json<T>, JsonRejection>) -> AppResult<T> {
    body.map(|Json(v)| v)
        .map_err(|e| AppError::validation(e.body_text()))
}

pub(crate) fn path_param<T>(param: Result<Path<T>, PathRejection>) -> AppResult<T> {
    param
        .map(|Path(v)| v)
        .map_err(|e| AppError::validation(e.body_text()))
}
