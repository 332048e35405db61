use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use sanve_domain::booking::ValidationError;
use sanve_domain::repository::RepoError;

use crate::token::AuthError;

#[derive(Debug)]
pub enum AppError {
    Validation(ValidationError),
    Auth(AuthError),
    UsernameTaken,
    MissingField,
    MissingLookupKey,
    MissingStatus,
    NotFound(String),
    Storage(String),
    Internal(String),
}

impl AppError {
    pub fn storage(err: RepoError) -> Self {
        AppError::Storage(err.to_string())
    }
}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        AppError::Validation(err)
    }
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        AppError::Auth(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::Validation(err) => (StatusCode::BAD_REQUEST, err.to_string()),
            AppError::Auth(err) => (StatusCode::UNAUTHORIZED, err.to_string()),
            AppError::UsernameTaken => {
                (StatusCode::BAD_REQUEST, "Tên đăng nhập đã tồn tại".to_string())
            }
            AppError::MissingField => (StatusCode::BAD_REQUEST, "Thiếu thông tin".to_string()),
            AppError::MissingLookupKey => (
                StatusCode::BAD_REQUEST,
                "Thiếu số căn cước công dân".to_string(),
            ),
            AppError::MissingStatus => (StatusCode::BAD_REQUEST, "Thiếu trạng thái".to_string()),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            // An internal admin tool: the underlying message is surfaced on
            // purpose. Do not reuse this mapping on a hardened public API.
            AppError::Storage(msg) | AppError::Internal(msg) => {
                tracing::error!("Internal Server Error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, msg)
            }
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}
