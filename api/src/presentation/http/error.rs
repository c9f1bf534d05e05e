use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::application::error::AppError;
use crate::presentation::http::imports::RejectedRowItem;

#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub available: Option<i64>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub rejected: Vec<RejectedRowItem>,
}

impl ErrorResponse {
    fn message(error: String) -> Self {
        Self {
            error,
            required: None,
            available: None,
            rejected: Vec::new(),
        }
    }
}

pub(crate) fn status_of(err: &AppError) -> StatusCode {
    match err {
        AppError::Validation(_) => StatusCode::BAD_REQUEST,
        AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
        AppError::Forbidden(_) => StatusCode::FORBIDDEN,
        AppError::NotFound(_) => StatusCode::NOT_FOUND,
        AppError::Conflict(_) => StatusCode::CONFLICT,
        AppError::InsufficientPoints { .. } => StatusCode::BAD_REQUEST,
        AppError::OutOfStock { .. } => StatusCode::CONFLICT,
        AppError::PayloadTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
        AppError::ImportRejected { .. } => StatusCode::BAD_REQUEST,
        AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn body_of(err: AppError) -> ErrorResponse {
    let message = err.to_string();
    match err {
        AppError::InsufficientPoints {
            required,
            available,
        } => ErrorResponse {
            required: Some(required),
            available: Some(available),
            ..ErrorResponse::message(message)
        },
        AppError::OutOfStock { available } => ErrorResponse {
            available: Some(available),
            ..ErrorResponse::message(message)
        },
        AppError::ImportRejected { rejected } => ErrorResponse {
            rejected: rejected.into_iter().map(Into::into).collect(),
            ..ErrorResponse::message(message)
        },
        AppError::Internal(source) => {
            tracing::error!(error = ?source, "request_failed");
            ErrorResponse::message(message)
        }
        _ => ErrorResponse::message(message),
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = status_of(&self);
        (status, Json(body_of(self))).into_response()
    }
}
