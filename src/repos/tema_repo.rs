/*
 * Responsibility
 * - temas / subtemas テーブル向け SQLx 操作
 * - subtemas は temaId の FK (CASCADE) 前提で削除挙動を意識
 */
use async_trait::async_trait;
use sqlx::{FromRow, PgPool};

use crate::repos::error::RepoResult;

#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct TemaRow {
    #[sqlx(rename = "temaId")]
    pub id: i32,
    pub descricao: String,
}

#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct SubtemaRow {
    #[sqlx(rename = "subtemaId")]
    pub id: i32,
    pub descricao: String,
    #[sqlx(rename = "temaId")]
    pub tema_id: i32,
}

#[async_trait]
pub trait TemaRepository: Send + Sync {
    async fn list(&self) -> RepoResult<Vec<TemaRow>>;

    async fn get(&self, id: i32) -> RepoResult<Option<TemaRow>>;

    async fn delete(&self, id: i32) -> RepoResult<bool>;

    async fn subtemas(&self, tema_id: i32) -> RepoResult<Vec<SubtemaRow>>;
}

#[derive(Clone)]
pub struct PgTemaRepository {
    db: PgPool,
}

impl PgTemaRepository {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl TemaRepository for PgTemaRepository {
    async fn list(&self) -> RepoResult<Vec<TemaRow>> {
        let rows = sqlx::query_as::<_, TemaRow>(
            r#"
            SELECT "temaId", descricao
            FROM temas
            ORDER BY "temaId"
            "#,
        )
        .fetch_all(&self.db)
        .await?;

        Ok(rows)
    }

    async fn get(&self, id: i32) -> RepoResult<Option<TemaRow>> {
        let row = sqlx::query_as::<_, TemaRow>(
            r#"
            SELECT "temaId", descricao
            FROM temas
            WHERE "temaId" = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await?;

        Ok(row)
    }

    async fn delete(&self, id: i32) -> RepoResult<bool> {
        let result = sqlx::query(
            r#"
            DELETE FROM temas
            WHERE "temaId" = $1
            "#,
        )
        .bind(id)
        .execute(&self.db)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn subtemas(&self, tema_id: i32) -> RepoResult<Vec<SubtemaRow>> {
        let rows = sqlx::query_as::<_, SubtemaRow>(
            r#"
            SELECT "subtemaId", descricao, "temaId"
            FROM subtemas
            WHERE "temaId" = $1
            ORDER BY "subtemaId"
            "#,
        )
        .bind(tema_id)
        .fetch_all(&self.db)
        .await?;

        Ok(rows)
    }
}
