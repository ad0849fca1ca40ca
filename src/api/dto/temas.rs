/*
 * Responsibility
 * - Temas / Subtemas の response DTO
 */
use serde::Serialize;

use crate::repos::{SubtemaRow, TemaRow};

#[derive(Debug, Serialize)]
pub struct TemaResponse {
    pub id: i32,
    pub descricao: String,
}

impl From<TemaRow> for TemaResponse {
    fn from(row: TemaRow) -> Self {
        Self {
            id: row.id,
            descricao: row.descricao,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubtemaResponse {
    pub id: i32,
    pub descricao: String,
    pub tema_id: i32,
}

impl From<SubtemaRow> for SubtemaResponse {
    fn from(row: SubtemaRow) -> Self {
        Self {
            id: row.id,
            descricao: row.descricao,
            tema_id: row.tema_id,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct TemaExistsResponse {
    pub exists: bool,
}
