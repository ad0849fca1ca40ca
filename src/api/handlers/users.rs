/*
 * Responsibility
 * - /usuario 系 handler
 * - Path の id は UUID (PathId で 400 に変換)
 * - 更新 / 削除は本人のみ (AuthCtx.user_id と一致するか)
 */
use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
};
use uuid::Uuid;

use crate::{
    api::{
        dto::users::{UpdateUserRequest, UserResponse},
        extractors::{AuthCtx, AuthCtxExtractor, PathId},
    },
    error::AppError,
    state::AppState,
};

const USER_NOT_FOUND: &str = "Usuário não encontrado";

fn ensure_self(ctx: &AuthCtx, user_id: Uuid) -> Result<(), AppError> {
    match Uuid::parse_str(&ctx.user_id) {
        Ok(own) if own == user_id => Ok(()),
        _ => Err(AppError::Forbidden("Acesso negado")),
    }
}

pub async fn get_profile(
    State(state): State<AppState>,
    AuthCtxExtractor(ctx): AuthCtxExtractor,
) -> Result<Json<UserResponse>, AppError> {
    let user_id =
        Uuid::parse_str(&ctx.user_id).map_err(|_| AppError::NotFound(USER_NOT_FOUND))?;

    let row = state
        .users
        .get(user_id)
        .await?
        .ok_or(AppError::NotFound(USER_NOT_FOUND))?;

    Ok(Json(row.into()))
}

pub async fn list_users(
    State(state): State<AppState>,
) -> Result<Json<Vec<UserResponse>>, AppError> {
    let rows = state.users.list().await?;
    Ok(Json(rows.into_iter().map(UserResponse::from).collect()))
}

pub async fn get_user(
    State(state): State<AppState>,
    PathId(user_id): PathId<Uuid>,
) -> Result<Json<UserResponse>, AppError> {
    let row = state
        .users
        .get(user_id)
        .await?
        .ok_or(AppError::NotFound(USER_NOT_FOUND))?;

    Ok(Json(row.into()))
}

pub async fn update_user(
    State(state): State<AppState>,
    AuthCtxExtractor(ctx): AuthCtxExtractor,
    PathId(user_id): PathId<Uuid>,
    payload: Result<Json<UpdateUserRequest>, JsonRejection>,
) -> Result<Json<UserResponse>, AppError> {
    ensure_self(&ctx, user_id)?;
    let Json(req) = payload?;
    req.validate().map_err(AppError::bad_request)?;

    let row = state
        .users
        .update(user_id, req.into_changes())
        .await?
        .ok_or(AppError::NotFound(USER_NOT_FOUND))?;

    Ok(Json(row.into()))
}

pub async fn delete_user(
    State(state): State<AppState>,
    AuthCtxExtractor(ctx): AuthCtxExtractor,
    PathId(user_id): PathId<Uuid>,
) -> Result<StatusCode, AppError> {
    ensure_self(&ctx, user_id)?;

    if state.users.delete(user_id).await? {
        tracing::info!(%user_id, "user deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound(USER_NOT_FOUND))
    }
}
