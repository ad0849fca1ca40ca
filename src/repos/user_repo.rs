/*
 * Responsibility
 * - users テーブル向け SQLx 操作
 * - PgPool を受け取り CRUD を提供 (作成 / パスワードは認証サービス側の責務)
 * - DB エラーは RepoError/AppError に変換しやすい形で返す
 */
use async_trait::async_trait;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::repos::error::RepoResult;

#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct UserRow {
    #[sqlx(rename = "userId")]
    pub id: Uuid,
    pub email: String,
    pub nome: String,
    pub telefone: Option<String>,
    #[sqlx(rename = "nivelConsciencia")]
    pub nivel_consciencia: i32,
    #[sqlx(rename = "isMonitor")]
    pub is_monitor: bool,
}

#[derive(Debug, Clone, Default)]
pub struct UserChanges {
    pub nome: Option<String>,
    // telefone tri-state:
    // - None: do not update
    // - Some(None): set NULL
    // - Some(Some(v)): set v
    pub telefone: Option<Option<String>>,
    pub nivel_consciencia: Option<i32>,
}

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn list(&self) -> RepoResult<Vec<UserRow>>;

    async fn get(&self, user_id: Uuid) -> RepoResult<Option<UserRow>>;

    async fn update(&self, user_id: Uuid, changes: UserChanges) -> RepoResult<Option<UserRow>>;

    async fn delete(&self, user_id: Uuid) -> RepoResult<bool>;
}

#[derive(Clone)]
pub struct PgUserRepository {
    db: PgPool,
}

impl PgUserRepository {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn list(&self) -> RepoResult<Vec<UserRow>> {
        let rows = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT "userId", email, nome, telefone, "nivelConsciencia", "isMonitor"
            FROM users
            ORDER BY "createdAt" DESC
            "#,
        )
        .fetch_all(&self.db)
        .await?;

        Ok(rows)
    }

    async fn get(&self, user_id: Uuid) -> RepoResult<Option<UserRow>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT "userId", email, nome, telefone, "nivelConsciencia", "isMonitor"
            FROM users
            WHERE "userId" = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.db)
        .await?;

        Ok(row)
    }

    async fn update(&self, user_id: Uuid, changes: UserChanges) -> RepoResult<Option<UserRow>> {
        let telefone = changes.telefone.as_ref().map(|inner| inner.as_deref());

        let row = sqlx::query_as::<_, UserRow>(
            r#"
            UPDATE users
            SET
                nome = COALESCE($2, nome),
                telefone = CASE
                    WHEN $3 = false THEN telefone
                    ELSE $4
                END,
                "nivelConsciencia" = COALESCE($5, "nivelConsciencia")
            WHERE "userId" = $1
            RETURNING "userId", email, nome, telefone, "nivelConsciencia", "isMonitor"
            "#,
        )
        .bind(user_id)
        .bind(changes.nome.as_deref())
        .bind(telefone.is_some()) // $3: flag to set telefone
        .bind(telefone.flatten()) // $4: new telefone value
        .bind(changes.nivel_consciencia)
        .fetch_optional(&self.db)
        .await?;

        Ok(row)
    }

    async fn delete(&self, user_id: Uuid) -> RepoResult<bool> {
        let result = sqlx::query(
            r#"
            DELETE FROM users
            WHERE "userId" = $1
            "#,
        )
        .bind(user_id)
        .execute(&self.db)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
