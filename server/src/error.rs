use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use todo_model::ErrorBody;
use tracing::error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("todo ID is required")]
    MissingId,

    #[error("invalid todo ID")]
    InvalidId,

    #[error("{0} is required")]
    MissingField(&'static str),

    #[error("todo not found")]
    NotFound,

    #[error("server error")]
    Store(#[from] mongodb::error::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match self {
            AppError::MissingId | AppError::InvalidId | AppError::MissingField(_) => {
                StatusCode::BAD_REQUEST
            }
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::Store(ref source) => {
                // Logged here only; the response body stays generic.
                error!("store operation failed: {source}");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let body = ErrorBody {
            error: self.to_string(),
        };

        (status, Json(body)).into_response()
    }
}
