/*
 * Responsibility
 * - /dicas 系 CRUD handler と tema 別の一覧
 * - 作成者 / 検証者は AuthCtx から受け取る (body の値は信用しない)
 * - tema / subtema の存在・所属チェックは repo 呼び出し前に行う
 */
use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
};
use uuid::Uuid;

use crate::{
    api::{
        dto::{
            DataResponse,
            dicas::{
                CreateDicaRequest, DicaResponse, MAX_SUBTEMAS, UpdateDicaRequest, dedup_subtemas,
            },
        },
        extractors::{AuthCtx, AuthCtxExtractor, PathId, parse_id},
    },
    error::AppError,
    repos::{DicaChanges, DicaFilter, DicaRow, NewDica},
    state::AppState,
};

const DICA_NOT_FOUND: &str = "Dica não encontrada";
const TEMA_NOT_FOUND: &str = "Tema não encontrado";
const USER_NOT_FOUND: &str = "Usuário não encontrado";

type DicaList = Json<DataResponse<Vec<DicaResponse>>>;

fn to_list(rows: Vec<DicaRow>) -> DicaList {
    Json(DataResponse::new(
        rows.into_iter().map(DicaResponse::from).collect(),
    ))
}

async fn ensure_tema(state: &AppState, tema_id: i32) -> Result<(), AppError> {
    state
        .temas
        .get(tema_id)
        .await?
        .map(|_| ())
        .ok_or(AppError::NotFound(TEMA_NOT_FOUND))
}

async fn ensure_subtemas(state: &AppState, tema_id: i32, ids: &[i32]) -> Result<(), AppError> {
    if ids.len() > MAX_SUBTEMAS {
        return Err(AppError::bad_request(format!(
            "Uma dica pode ter no máximo {MAX_SUBTEMAS} subtemas"
        )));
    }
    if ids.is_empty() {
        return Ok(());
    }

    let known = state.temas.subtemas(tema_id).await?;
    if ids.iter().all(|id| known.iter().any(|s| s.id == *id)) {
        Ok(())
    } else {
        Err(AppError::bad_request("O subtema não pertence ao tema"))
    }
}

async fn find_authored(state: &AppState, ctx: &AuthCtx, id: i64) -> Result<DicaRow, AppError> {
    let row = state
        .dicas
        .get(id)
        .await?
        .ok_or(AppError::NotFound(DICA_NOT_FOUND))?;

    if row.usuario_id != ctx.user_id {
        return Err(AppError::Forbidden(
            "Apenas o autor pode alterar ou remover a dica",
        ));
    }

    Ok(row)
}

pub async fn list_dicas(State(state): State<AppState>) -> Result<DicaList, AppError> {
    let rows = state.dicas.list().await?;
    Ok(to_list(rows))
}

pub async fn get_dica(
    State(state): State<AppState>,
    PathId(id): PathId<i64>,
) -> Result<Json<DataResponse<DicaResponse>>, AppError> {
    let row = state
        .dicas
        .get(id)
        .await?
        .ok_or(AppError::NotFound(DICA_NOT_FOUND))?;

    Ok(Json(DataResponse::new(row.into())))
}

pub async fn create_dica(
    State(state): State<AppState>,
    AuthCtxExtractor(ctx): AuthCtxExtractor,
    payload: Result<Json<CreateDicaRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<DataResponse<DicaResponse>>), AppError> {
    let Json(req) = payload?;
    req.validate(&ctx.user_id).map_err(AppError::Validation)?;

    let subtemas = dedup_subtemas(req.subtemas);
    ensure_tema(&state, req.tema).await?;
    ensure_subtemas(&state, req.tema, &subtemas).await?;

    let row = state
        .dicas
        .create(NewDica {
            usuario_id: ctx.user_id.clone(),
            conteudo: req.conteudo,
            tema_id: req.tema,
            subtema_ids: subtemas,
        })
        .await?;

    tracing::info!(dica_id = row.id, user_id = %ctx.user_id, "dica created");

    Ok((
        StatusCode::CREATED,
        Json(DataResponse::with_message(
            "A dica foi criada com sucesso!",
            row.into(),
        )),
    ))
}

pub async fn update_dica(
    State(state): State<AppState>,
    AuthCtxExtractor(ctx): AuthCtxExtractor,
    PathId(id): PathId<i64>,
    payload: Result<Json<UpdateDicaRequest>, JsonRejection>,
) -> Result<Json<DataResponse<DicaResponse>>, AppError> {
    let Json(req) = payload?;
    let existing = find_authored(&state, &ctx, id).await?;
    req.validate(&existing.usuario_id)
        .map_err(AppError::Validation)?;

    // Subtemas must belong to the tema the dica ends up with.
    let tema_id = req.tema.unwrap_or(existing.tema_id);
    if req.tema.is_some() {
        ensure_tema(&state, tema_id).await?;
    }
    let new_subtemas = req.subtemas.map(dedup_subtemas);
    let subtemas = new_subtemas
        .as_deref()
        .unwrap_or(existing.subtema_ids.as_slice());
    ensure_subtemas(&state, tema_id, subtemas).await?;

    let row = state
        .dicas
        .update(
            id,
            DicaChanges {
                conteudo: req.conteudo,
                tema_id: req.tema,
                subtema_ids: new_subtemas,
            },
        )
        .await?
        .ok_or(AppError::NotFound(DICA_NOT_FOUND))?;

    tracing::info!(dica_id = id, user_id = %ctx.user_id, "dica updated");

    Ok(Json(DataResponse::with_message(
        "A dica foi atualizada com sucesso!",
        row.into(),
    )))
}

pub async fn delete_dica(
    State(state): State<AppState>,
    AuthCtxExtractor(ctx): AuthCtxExtractor,
    PathId(id): PathId<i64>,
) -> Result<StatusCode, AppError> {
    find_authored(&state, &ctx, id).await?;

    if state.dicas.delete(id).await? {
        tracing::info!(dica_id = id, user_id = %ctx.user_id, "dica deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound(DICA_NOT_FOUND))
    }
}

pub async fn verify_dica(
    State(state): State<AppState>,
    AuthCtxExtractor(ctx): AuthCtxExtractor,
    PathId(id): PathId<i64>,
) -> Result<Json<DataResponse<DicaResponse>>, AppError> {
    let user_id =
        Uuid::parse_str(&ctx.user_id).map_err(|_| AppError::NotFound(USER_NOT_FOUND))?;
    let user = state
        .users
        .get(user_id)
        .await?
        .ok_or(AppError::NotFound(USER_NOT_FOUND))?;

    if !user.is_monitor {
        return Err(AppError::Forbidden(
            "O usuário não tem permissão para verificar a dica",
        ));
    }

    let row = state
        .dicas
        .verify(id, &ctx.email)
        .await?
        .ok_or(AppError::NotFound(DICA_NOT_FOUND))?;

    tracing::info!(dica_id = id, verify_by = %ctx.email, "dica verified");

    Ok(Json(DataResponse::with_message(
        "A dica foi verificada com sucesso!",
        row.into(),
    )))
}

async fn list_for_tema(
    state: &AppState,
    tema_id: i32,
    filter: DicaFilter,
) -> Result<DicaList, AppError> {
    ensure_tema(state, tema_id).await?;
    let rows = state.dicas.list_by_tema(tema_id, filter).await?;
    Ok(to_list(rows))
}

pub async fn list_dicas_by_tema(
    State(state): State<AppState>,
    PathId(tema_id): PathId<i32>,
) -> Result<DicaList, AppError> {
    list_for_tema(&state, tema_id, DicaFilter::All).await
}

pub async fn list_verified_dicas(
    State(state): State<AppState>,
    PathId(tema_id): PathId<i32>,
) -> Result<DicaList, AppError> {
    list_for_tema(&state, tema_id, DicaFilter::Verified).await
}

pub async fn list_unverified_dicas(
    State(state): State<AppState>,
    PathId(tema_id): PathId<i32>,
) -> Result<DicaList, AppError> {
    list_for_tema(&state, tema_id, DicaFilter::NotVerified).await
}

pub async fn list_specialist_dicas(
    State(state): State<AppState>,
    PathId(tema_id): PathId<i32>,
) -> Result<DicaList, AppError> {
    list_for_tema(&state, tema_id, DicaFilter::Specialists).await
}

pub async fn list_dicas_by_tema_and_subtema(
    State(state): State<AppState>,
    Path((tema, subtema)): Path<(String, String)>,
) -> Result<DicaList, AppError> {
    let tema_id: i32 = parse_id(&tema)?;
    let subtema_id: i32 = parse_id(&subtema)?;

    ensure_tema(&state, tema_id).await?;
    let known = state.temas.subtemas(tema_id).await?;
    if !known.iter().any(|s| s.id == subtema_id) {
        return Err(AppError::NotFound("Subtema não encontrado"));
    }

    let rows = state
        .dicas
        .list_by_tema_and_subtema(tema_id, subtema_id)
        .await?;
    Ok(to_list(rows))
}
