use crate::application::dto::imports::RejectedRow;
use crate::application::ports::constraint::{ConstraintKind, ConstraintViolation};

#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    Unauthorized(String),
    #[error("{0}")]
    Forbidden(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Conflict(String),
    #[error("insufficient points: {required} required, {available} available")]
    InsufficientPoints { required: i64, available: i64 },
    #[error("not enough stock: {available} available")]
    OutOfStock { available: i64 },
    #[error("payload exceeds the {limit} byte limit")]
    PayloadTooLarge { limit: usize },
    #[error("{} rows failed validation; nothing was imported", rejected.len())]
    ImportRejected { rejected: Vec<RejectedRow> },
    #[error("internal server error")]
    Internal(#[source] anyhow::Error),
}

pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    pub fn validation(msg: impl Into<String>) -> Self {
        AppError::Validation(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        AppError::NotFound(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        AppError::Conflict(msg.into())
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        if let Some(v) = err.downcast_ref::<ConstraintViolation>() {
            return match v.kind {
                ConstraintKind::Unique | ConstraintKind::ForeignKey => {
                    AppError::Conflict(v.describe())
                }
                ConstraintKind::Check => AppError::Validation(v.describe()),
            };
        }
        AppError::Internal(err)
    }
}
