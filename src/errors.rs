use axum::{http::StatusCode, Json};
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("invalid input")]
    InvalidInput,
    #[error("unknown action")]
    UnknownAction,
    #[error("path outside root")]
    PathOutsideRoot,
    #[error("not found")]
    NotFound,
    #[error("execution failed")]
    ExecFailure,
    // Detail is logged at the boundary, never serialized into the body.
    #[error("internal error")]
    Internal(String),
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: &'static str,
    pub message: String,
}

impl AppError {
    pub fn code(&self) -> &'static str {
        match self {
            AppError::InvalidInput => "InvalidInput",
            AppError::UnknownAction => "UnknownAction",
            AppError::PathOutsideRoot => "PathOutsideRoot",
            AppError::NotFound => "NotFound",
            AppError::ExecFailure => "ExecFailure",
            AppError::Internal(_) => "Internal",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::InvalidInput | AppError::UnknownAction => StatusCode::BAD_REQUEST,
            AppError::PathOutsideRoot => StatusCode::FORBIDDEN,
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::ExecFailure | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;

pub fn into_response(err: AppError) -> (StatusCode, Json<ErrorBody>) {
    if let AppError::Internal(detail) = &err {
        tracing::error!(detail = %detail, "internal error");
    }
    // Display gives the generic message only; carried detail stays in the log.
    let body = ErrorBody { code: err.code(), message: err.to_string() };
    (err.status(), Json(body))
}
