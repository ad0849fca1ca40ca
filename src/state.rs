/*
 * Responsibility
 * - Router に紐づける共有コンテキスト (AppState)
 *   - auth: AuthGate (検証鍵は起動時に注入済み、以後 read-only)
 *   - dicas / temas / users: repository (PgPool を内部に持つ)
 * - Clone 前提で持つ (内部は Arc/Clone cheap)
 */
use std::sync::Arc;

use crate::repos::{DicaRepository, TemaRepository, UserRepository};
use crate::services::auth::AuthGate;

#[derive(Clone)]
pub struct AppState {
    pub auth: Arc<AuthGate>,
    pub dicas: Arc<dyn DicaRepository>,
    pub temas: Arc<dyn TemaRepository>,
    pub users: Arc<dyn UserRepository>,
}

impl AppState {
    pub fn new(
        auth: Arc<AuthGate>,
        dicas: Arc<dyn DicaRepository>,
        temas: Arc<dyn TemaRepository>,
        users: Arc<dyn UserRepository>,
    ) -> Self {
        Self {
            auth,
            dicas,
            temas,
            users,
        }
    }
}
