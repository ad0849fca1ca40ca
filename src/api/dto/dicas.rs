/*
 * Responsibility
 * - Dicas の request/response DTO
 * - 作成者 / 内容の長さチェック (validate)
 * - 作成者 (usuarioId) は body ではなく AuthCtx から受け取る
 */
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::repos::DicaRow;

pub const MAX_SUBTEMAS: usize = 5;

pub const INVALID_AUTHOR_MESSAGE: &str =
    "Nome do criador deve ser um texto e ter entre 3 e 50 caracteres.";
pub const INVALID_CONTENT_MESSAGE: &str =
    "Conteúdo deve ser um texto e ter entre 3 e 1000 caracteres.";

fn within(value: &str, min: usize, max: usize) -> bool {
    let len = value.chars().count();
    (min..=max).contains(&len)
}

/// Length rules of a dica. Every failing rule is reported.
pub fn validate_dica(usuario_id: &str, conteudo: &str) -> Result<(), Vec<&'static str>> {
    let mut errors = Vec::new();

    if !within(usuario_id, 3, 50) {
        errors.push(INVALID_AUTHOR_MESSAGE);
    }
    if !within(conteudo, 3, 1000) {
        errors.push(INVALID_CONTENT_MESSAGE);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Drop repeated subtema ids, keeping first-seen order.
pub fn dedup_subtemas(ids: Vec<i32>) -> Vec<i32> {
    let mut seen = Vec::with_capacity(ids.len());
    for id in ids {
        if !seen.contains(&id) {
            seen.push(id);
        }
    }
    seen
}

#[derive(Debug, Deserialize)]
pub struct CreateDicaRequest {
    pub conteudo: String,
    pub tema: i32,
    #[serde(default)]
    pub subtemas: Vec<i32>,
}

impl CreateDicaRequest {
    pub fn validate(&self, usuario_id: &str) -> Result<(), Vec<&'static str>> {
        validate_dica(usuario_id, &self.conteudo)
    }
}

#[derive(Debug, Deserialize)]
pub struct UpdateDicaRequest {
    pub conteudo: Option<String>,
    pub tema: Option<i32>,
    pub subtemas: Option<Vec<i32>>,
}

impl UpdateDicaRequest {
    pub fn validate(&self, usuario_id: &str) -> Result<(), Vec<&'static str>> {
        match &self.conteudo {
            Some(conteudo) => validate_dica(usuario_id, conteudo),
            None => Ok(()),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DicaResponse {
    pub id: i64,
    pub usuario_id: String,
    pub conteudo: String,
    pub tema_id: i32,
    pub subtema_ids: Vec<i32>,
    pub is_verify: bool,
    pub verify_by: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<DicaRow> for DicaResponse {
    fn from(row: DicaRow) -> Self {
        Self {
            id: row.id,
            usuario_id: row.usuario_id,
            conteudo: row.conteudo,
            tema_id: row.tema_id,
            subtema_ids: row.subtema_ids,
            is_verify: row.is_verify,
            verify_by: row.verify_by,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}
