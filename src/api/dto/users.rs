/*
 * Responsibility
 * - Usuario の request/response DTO
 * - validation (形式チェック) 用の validate()
 */
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use crate::repos::{UserChanges, UserRow};

// Distinguish a missing field (None) from an explicit null (Some(None)).
fn double_option<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
    pub nome: Option<String>,
    // Tri-state:
    // - None: field missing (do not update)
    // - Some(None): null (set NULL)
    // - Some(Some(v)): set value
    #[serde(default, deserialize_with = "double_option")]
    pub telefone: Option<Option<String>>,
    pub nivel_consciencia: Option<i32>,
}

impl UpdateUserRequest {
    pub fn validate(&self) -> Result<(), &'static str> {
        if let Some(nome) = &self.nome
            && nome.trim().is_empty()
        {
            return Err("nome não pode ser vazio");
        }
        if let Some(Some(telefone)) = &self.telefone
            && telefone.len() > 20
        {
            return Err("telefone deve ter no máximo 20 caracteres");
        }
        if let Some(nivel) = self.nivel_consciencia
            && !(1..=5).contains(&nivel)
        {
            return Err("nivelConsciencia deve estar entre 1 e 5");
        }
        Ok(())
    }

    pub fn into_changes(self) -> UserChanges {
        UserChanges {
            nome: self.nome,
            telefone: self.telefone,
            nivel_consciencia: self.nivel_consciencia,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: Uuid,
    pub email: String,
    pub nome: String,
    pub telefone: Option<String>,
    pub nivel_consciencia: i32,
    pub is_monitor: bool,
}

impl From<UserRow> for UserResponse {
    fn from(row: UserRow) -> Self {
        Self {
            id: row.id,
            email: row.email,
            nome: row.nome,
            telefone: row.telefone,
            nivel_consciencia: row.nivel_consciencia,
            is_monitor: row.is_monitor,
        }
    }
}
