/*
 * Responsibility
 * - /tema 系 handler (一覧 / 存在確認 / 削除 / subtemas)
 * - ID が数値でなければ PathId が 400 を返す
 */
use axum::{Json, extract::State, http::StatusCode};

use crate::{
    api::{
        dto::temas::{SubtemaResponse, TemaExistsResponse, TemaResponse},
        extractors::PathId,
    },
    error::AppError,
    state::AppState,
};

pub async fn list_temas(
    State(state): State<AppState>,
) -> Result<Json<Vec<TemaResponse>>, AppError> {
    let rows = state.temas.list().await?;
    Ok(Json(rows.into_iter().map(TemaResponse::from).collect()))
}

pub async fn tema_exists(
    State(state): State<AppState>,
    PathId(id): PathId<i32>,
) -> Result<(StatusCode, Json<TemaExistsResponse>), AppError> {
    let exists = state.temas.get(id).await?.is_some();
    let status = if exists {
        StatusCode::OK
    } else {
        StatusCode::NOT_FOUND
    };

    Ok((status, Json(TemaExistsResponse { exists })))
}

pub async fn list_subtemas(
    State(state): State<AppState>,
    PathId(id): PathId<i32>,
) -> Result<Json<Vec<SubtemaResponse>>, AppError> {
    state
        .temas
        .get(id)
        .await?
        .ok_or(AppError::NotFound("Tema não encontrado"))?;

    let rows = state.temas.subtemas(id).await?;
    Ok(Json(rows.into_iter().map(SubtemaResponse::from).collect()))
}

pub async fn delete_tema(
    State(state): State<AppState>,
    PathId(id): PathId<i32>,
) -> Result<StatusCode, AppError> {
    if state.temas.delete(id).await? {
        tracing::info!(tema_id = id, "tema deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound("Tema não encontrado"))
    }
}
