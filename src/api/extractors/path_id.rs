/*
 * Responsibility
 * - Path の String を数値 / UUID の ID 型として受け取る
 * - 失敗時は 400 {"error": "ID inválido"} に変換
 * - dicas / temas / usuario で共通利用
 */
use std::str::FromStr;

use axum::extract::{FromRequestParts, Path};
use axum::http::request::Parts;

use crate::error::AppError;

pub const INVALID_ID_MESSAGE: &str = "ID inválido";

#[derive(Debug, Clone, Copy)]
pub struct PathId<T>(pub T);

/// Parse one raw path segment as an id.
pub fn parse_id<T: FromStr>(raw: &str) -> Result<T, AppError> {
    raw.parse::<T>()
        .map_err(|_| AppError::bad_request(INVALID_ID_MESSAGE))
}

impl<S, T> FromRequestParts<S> for PathId<T>
where
    S: Send + Sync,
    T: FromStr + Send,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|_| AppError::bad_request(INVALID_ID_MESSAGE))?;

        parse_id(&raw).map(PathId)
    }
}
