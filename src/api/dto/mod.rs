/*
 * Responsibility
 * - request/response DTO の公開 (re-export はしない、resource ごとに path で参照)
 * - 複数 resource で共通の envelope
 */
use serde::Serialize;

pub mod dicas;
pub mod temas;
pub mod users;

/// `{"message": "...", "data": ...}` envelope used by the dicas endpoints.
#[derive(Debug, Serialize)]
pub struct DataResponse<T> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<&'static str>,
    pub data: T,
}

impl<T> DataResponse<T> {
    pub fn new(data: T) -> Self {
        Self {
            message: None,
            data,
        }
    }

    pub fn with_message(message: &'static str, data: T) -> Self {
        Self {
            message: Some(message),
            data,
        }
    }
}
