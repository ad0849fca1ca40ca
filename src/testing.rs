//! Shared test support: token issuing, in-memory repositories and request helpers.

use std::sync::{Arc, Mutex};
use std::time::{SystemTime, UNIX_EPOCH};

use async_trait::async_trait;
use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Method, Request, StatusCode, header},
};
use chrono::Utc;
use jsonwebtoken::{EncodingKey, Header, encode};
use serde::Serialize;
use serde_json::{Value, json};
use tower::ServiceExt;
use uuid::Uuid;

use crate::config::Config;
use crate::repos::{
    DicaChanges, DicaFilter, DicaRepository, DicaRow, NewDica, SubtemaRow, TemaRepository,
    TemaRow, UserChanges, UserRepository, UserRow, error::RepoResult,
};
use crate::services::auth::AuthGate;
use crate::state::AppState;

pub const TEST_SECRET: &str = "test-secret";

pub const MONITOR_ID: Uuid = Uuid::from_u128(0x1111_1111_1111_4111_8111_1111_1111_1111);
pub const MONITOR_EMAIL: &str = "monitor@dicas.dev";
pub const MEMBER_ID: Uuid = Uuid::from_u128(0x2222_2222_2222_4222_8222_2222_2222_2222);
pub const MEMBER_EMAIL: &str = "membro@dicas.dev";

pub fn now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_secs()
}

pub fn sign_with_secret(claims: &impl Serialize, secret: &str) -> String {
    encode(
        &Header::default(),
        claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .unwrap()
}

pub fn sign(claims: &impl Serialize) -> String {
    sign_with_secret(claims, TEST_SECRET)
}

pub fn issue_token_with_secret(secret: &str, user_id: &str, email: &str) -> String {
    let now = now();
    sign_with_secret(
        &json!({ "userId": user_id, "email": email, "iat": now, "exp": now + 600 }),
        secret,
    )
}

pub fn issue_token(user_id: &str, email: &str) -> String {
    issue_token_with_secret(TEST_SECRET, user_id, email)
}

pub fn monitor_token() -> String {
    issue_token(&MONITOR_ID.to_string(), MONITOR_EMAIL)
}

pub fn member_token() -> String {
    issue_token(&MEMBER_ID.to_string(), MEMBER_EMAIL)
}

pub fn config() -> Config {
    Config::from_lookup(|key| match key {
        "DATABASE_URL" => Some("postgres://localhost/dicas_test".to_string()),
        "JWT_SECRET" => Some(TEST_SECRET.to_string()),
        _ => None,
    })
    .unwrap()
}

// ---- in-memory repositories ----

#[derive(Default)]
pub struct MemoryUsers {
    rows: Mutex<Vec<UserRow>>,
}

impl MemoryUsers {
    pub fn seeded() -> Self {
        let rows = vec![
            UserRow {
                id: MONITOR_ID,
                email: MONITOR_EMAIL.to_string(),
                nome: "Monitora".to_string(),
                telefone: None,
                nivel_consciencia: 5,
                is_monitor: true,
            },
            UserRow {
                id: MEMBER_ID,
                email: MEMBER_EMAIL.to_string(),
                nome: "Membro".to_string(),
                telefone: Some("11999990000".to_string()),
                nivel_consciencia: 2,
                is_monitor: false,
            },
        ];
        Self {
            rows: Mutex::new(rows),
        }
    }

    fn is_monitor(&self, user_id: &str) -> bool {
        self.rows
            .lock()
            .unwrap()
            .iter()
            .any(|u| u.is_monitor && u.id.to_string() == user_id)
    }
}

#[async_trait]
impl UserRepository for MemoryUsers {
    async fn list(&self) -> RepoResult<Vec<UserRow>> {
        Ok(self.rows.lock().unwrap().clone())
    }

    async fn get(&self, user_id: Uuid) -> RepoResult<Option<UserRow>> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.id == user_id)
            .cloned())
    }

    async fn update(&self, user_id: Uuid, changes: UserChanges) -> RepoResult<Option<UserRow>> {
        let mut rows = self.rows.lock().unwrap();
        let Some(row) = rows.iter_mut().find(|u| u.id == user_id) else {
            return Ok(None);
        };
        if let Some(nome) = changes.nome {
            row.nome = nome;
        }
        if let Some(telefone) = changes.telefone {
            row.telefone = telefone;
        }
        if let Some(nivel) = changes.nivel_consciencia {
            row.nivel_consciencia = nivel;
        }
        Ok(Some(row.clone()))
    }

    async fn delete(&self, user_id: Uuid) -> RepoResult<bool> {
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|u| u.id != user_id);
        Ok(rows.len() != before)
    }
}

#[derive(Default)]
pub struct MemoryTemas {
    temas: Mutex<Vec<TemaRow>>,
    subtemas: Mutex<Vec<SubtemaRow>>,
}

impl MemoryTemas {
    /// tema 1 (subtemas 10, 11), tema 2 (subtema 20), tema 3 (no subtemas)
    pub fn seeded() -> Self {
        let tema = |id, descricao: &str| TemaRow {
            id,
            descricao: descricao.to_string(),
        };
        let subtema = |id, descricao: &str, tema_id| SubtemaRow {
            id,
            descricao: descricao.to_string(),
            tema_id,
        };
        Self {
            temas: Mutex::new(vec![
                tema(1, "Ansiedade"),
                tema(2, "Depressão"),
                tema(3, "Sono"),
            ]),
            subtemas: Mutex::new(vec![
                subtema(10, "Respiração", 1),
                subtema(11, "Meditação", 1),
                subtema(20, "Rotina", 2),
            ]),
        }
    }
}

#[async_trait]
impl TemaRepository for MemoryTemas {
    async fn list(&self) -> RepoResult<Vec<TemaRow>> {
        Ok(self.temas.lock().unwrap().clone())
    }

    async fn get(&self, id: i32) -> RepoResult<Option<TemaRow>> {
        Ok(self
            .temas
            .lock()
            .unwrap()
            .iter()
            .find(|t| t.id == id)
            .cloned())
    }

    async fn delete(&self, id: i32) -> RepoResult<bool> {
        let mut temas = self.temas.lock().unwrap();
        let before = temas.len();
        temas.retain(|t| t.id != id);
        if temas.len() == before {
            return Ok(false);
        }
        self.subtemas.lock().unwrap().retain(|s| s.tema_id != id);
        Ok(true)
    }

    async fn subtemas(&self, tema_id: i32) -> RepoResult<Vec<SubtemaRow>> {
        Ok(self
            .subtemas
            .lock()
            .unwrap()
            .iter()
            .filter(|s| s.tema_id == tema_id)
            .cloned()
            .collect())
    }
}

pub struct MemoryDicas {
    rows: Mutex<Vec<DicaRow>>,
    users: Arc<MemoryUsers>,
}

impl MemoryDicas {
    pub fn new(users: Arc<MemoryUsers>) -> Self {
        Self {
            rows: Mutex::new(Vec::new()),
            users,
        }
    }

    /// dica 1: monitor, tema 1, subtema 10, not verified
    /// dica 2: member, tema 1, verified by the monitor
    /// dica 3: member, tema 2, subtema 20
    pub fn seeded(users: Arc<MemoryUsers>) -> Self {
        let dica = |id, author: Uuid, tema_id, subtema_ids: Vec<i32>, verify_by: Option<&str>| {
            DicaRow {
                id,
                usuario_id: author.to_string(),
                conteudo: format!("Dica número {id}"),
                tema_id,
                subtema_ids,
                is_verify: verify_by.is_some(),
                verify_by: verify_by.map(str::to_string),
                created_at: Utc::now(),
                updated_at: Utc::now(),
            }
        };
        Self {
            rows: Mutex::new(vec![
                dica(1, MONITOR_ID, 1, vec![10], None),
                dica(2, MEMBER_ID, 1, vec![], Some(MONITOR_EMAIL)),
                dica(3, MEMBER_ID, 2, vec![20], None),
            ]),
            users,
        }
    }

    fn sorted(mut rows: Vec<DicaRow>) -> Vec<DicaRow> {
        rows.sort_by(|a, b| b.id.cmp(&a.id));
        rows
    }
}

#[async_trait]
impl DicaRepository for MemoryDicas {
    async fn list(&self) -> RepoResult<Vec<DicaRow>> {
        Ok(Self::sorted(self.rows.lock().unwrap().clone()))
    }

    async fn get(&self, id: i64) -> RepoResult<Option<DicaRow>> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .find(|d| d.id == id)
            .cloned())
    }

    async fn create(&self, dica: NewDica) -> RepoResult<DicaRow> {
        let mut rows = self.rows.lock().unwrap();
        let id = rows.iter().map(|d| d.id).max().unwrap_or(0) + 1;
        let row = DicaRow {
            id,
            usuario_id: dica.usuario_id,
            conteudo: dica.conteudo,
            tema_id: dica.tema_id,
            subtema_ids: dica.subtema_ids,
            is_verify: false,
            verify_by: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        rows.push(row.clone());
        Ok(row)
    }

    async fn update(&self, id: i64, changes: DicaChanges) -> RepoResult<Option<DicaRow>> {
        let mut rows = self.rows.lock().unwrap();
        let Some(row) = rows.iter_mut().find(|d| d.id == id) else {
            return Ok(None);
        };
        if let Some(conteudo) = changes.conteudo {
            row.conteudo = conteudo;
        }
        if let Some(tema_id) = changes.tema_id {
            row.tema_id = tema_id;
        }
        if let Some(subtema_ids) = changes.subtema_ids {
            row.subtema_ids = subtema_ids;
        }
        row.updated_at = Utc::now();
        Ok(Some(row.clone()))
    }

    async fn delete(&self, id: i64) -> RepoResult<bool> {
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|d| d.id != id);
        Ok(rows.len() != before)
    }

    async fn verify(&self, id: i64, verify_by: &str) -> RepoResult<Option<DicaRow>> {
        let mut rows = self.rows.lock().unwrap();
        let Some(row) = rows.iter_mut().find(|d| d.id == id) else {
            return Ok(None);
        };
        row.is_verify = true;
        row.verify_by = Some(verify_by.to_string());
        row.updated_at = Utc::now();
        Ok(Some(row.clone()))
    }

    async fn list_by_tema(&self, tema_id: i32, filter: DicaFilter) -> RepoResult<Vec<DicaRow>> {
        let rows: Vec<DicaRow> = self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|d| d.tema_id == tema_id)
            .filter(|d| match filter {
                DicaFilter::All => true,
                DicaFilter::Verified => d.is_verify,
                DicaFilter::NotVerified => !d.is_verify,
                DicaFilter::Specialists => self.users.is_monitor(&d.usuario_id),
            })
            .cloned()
            .collect();
        Ok(Self::sorted(rows))
    }

    async fn list_by_tema_and_subtema(
        &self,
        tema_id: i32,
        subtema_id: i32,
    ) -> RepoResult<Vec<DicaRow>> {
        let rows: Vec<DicaRow> = self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|d| d.tema_id == tema_id && d.subtema_ids.contains(&subtema_id))
            .cloned()
            .collect();
        Ok(Self::sorted(rows))
    }
}

/// AppState wired to seeded in-memory repositories and a gate using `TEST_SECRET`.
pub fn state() -> AppState {
    let users = Arc::new(MemoryUsers::seeded());
    AppState::new(
        Arc::new(AuthGate::from_secret(TEST_SECRET, 0)),
        Arc::new(MemoryDicas::seeded(users.clone())),
        Arc::new(MemoryTemas::seeded()),
        users,
    )
}

// ---- request helpers ----

pub fn request(
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

/// Run one request through the router. An empty body yields `Value::Null`.
pub async fn send(app: Router, req: Request<Body>) -> (StatusCode, Value) {
    let res = app.oneshot(req).await.unwrap();
    let status = res.status();
    let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}
