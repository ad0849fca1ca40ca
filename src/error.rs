/*
 * Responsibility
 * - アプリ共通の AppError 定義
 * - IntoResponse 実装 (HTTP status / JSON error body)
 * - AuthRejection の HTTP 表現 (missing/malformed は 401、invalid は 400)
 * - RepoError を統一的に変換
 */
use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::json;
use thiserror::Error;

use crate::repos::error::RepoError;
use crate::services::auth::AuthRejection;

pub const MISSING_TOKEN_MESSAGE: &str = "Token não fornecido";
pub const MALFORMED_TOKEN_MESSAGE: &str = "Token mal formatado";
pub const INVALID_TOKEN_MESSAGE: &str = "Token inválido ou erro de autenticação";
pub const INVALID_BODY_MESSAGE: &str = "Corpo da requisição inválido";

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug, Serialize)]
pub struct ValidationErrorResponse {
    pub errors: Vec<&'static str>,
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("validation failed: {0:?}")]
    Validation(Vec<&'static str>),
    #[error("forbidden: {0}")]
    Forbidden(&'static str),
    #[error("not found: {0}")]
    NotFound(&'static str),
    #[error("internal server error")]
    Internal,
}

impl AppError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest(message.into())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::Validation(errors) => {
                return (
                    StatusCode::BAD_REQUEST,
                    Json(ValidationErrorResponse { errors }),
                )
                    .into_response();
            }
            AppError::BadRequest(message) => (StatusCode::BAD_REQUEST, message),
            AppError::Forbidden(message) => (StatusCode::FORBIDDEN, message.to_string()),
            AppError::NotFound(message) => (StatusCode::NOT_FOUND, message.to_string()),
            AppError::Internal => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Erro interno do servidor".to_string(),
            ),
        };

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        match self {
            AuthRejection::MissingToken => (
                StatusCode::UNAUTHORIZED,
                Json(json!({ "error": MISSING_TOKEN_MESSAGE })),
            ),
            AuthRejection::MalformedToken => (
                StatusCode::UNAUTHORIZED,
                Json(json!({ "error": MALFORMED_TOKEN_MESSAGE })),
            ),
            AuthRejection::InvalidToken => (
                StatusCode::BAD_REQUEST,
                Json(json!({ "message": INVALID_TOKEN_MESSAGE })),
            ),
        }
        .into_response()
    }
}

impl From<RepoError> for AppError {
    fn from(e: RepoError) -> Self {
        // Real cause goes to the log, the client gets a generic 500
        tracing::error!(error = ?e, "repository call failed");
        match e {
            RepoError::Db(_) => AppError::Internal,
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        // Missing content-type, syntax and shape errors all share the `{"error": ...}` body
        tracing::debug!(status = %rejection.status(), reason = %rejection.body_text(), "json body rejected");
        AppError::bad_request(INVALID_BODY_MESSAGE)
    }
}
