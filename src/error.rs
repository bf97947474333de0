use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::models::{ApiMessage, MovieField};

#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("Field '{0}' is missing in the request body.")]
    MissingField(MovieField),
    #[error("Field '{field}' is invalid: {reason}")]
    InvalidField { field: MovieField, reason: &'static str },
    #[error("no updatable fields supplied")]
    EmptyPatch,
}

impl ValidationError {
    pub fn field(&self) -> Option<MovieField> {
        match self {
            ValidationError::MissingField(field) => Some(*field),
            ValidationError::InvalidField { field, .. } => Some(*field),
            ValidationError::EmptyPatch => None,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("movie {0} not found")]
    NotFound(i32),
    #[error("cannot sort by '{0}'")]
    InvalidSortField(String),
    #[error("storage error: {0}")]
    Storage(#[from] sea_orm::DbErr),
}

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("{0}")]
    BadRequest(String),
    #[error("not found")]
    RouteNotFound,
    #[error("method not allowed")]
    MethodNotAllowed,
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Store(StoreError::InvalidSortField(_)) => StatusCode::BAD_REQUEST,
            AppError::Store(StoreError::NotFound(_)) | AppError::RouteNotFound => {
                StatusCode::NOT_FOUND
            },
            AppError::Store(StoreError::Storage(_)) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self {
            AppError::Store(StoreError::Storage(err)) => {
                tracing::error!(error = %err, "storage failure");
                "internal server error".to_string()
            },
            other => other.to_string(),
        };
        (status, Json(ApiMessage::new(status.as_u16(), message))).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;
