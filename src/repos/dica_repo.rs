/*
 * Responsibility
 * - dicas テーブル向け SQLx 操作
 * - 作成者 (usuarioId) は users.userId の文字列表現
 * - 「especialistas」= 作成者が monitor (users.isMonitor) のもの
 */
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};

use crate::repos::error::RepoResult;

#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct DicaRow {
    #[sqlx(rename = "dicaId")]
    pub id: i64,
    #[sqlx(rename = "usuarioId")]
    pub usuario_id: String,
    pub conteudo: String,
    #[sqlx(rename = "temaId")]
    pub tema_id: i32,
    #[sqlx(rename = "subtemaIds")]
    pub subtema_ids: Vec<i32>,
    #[sqlx(rename = "isVerify")]
    pub is_verify: bool,
    #[sqlx(rename = "verifyBy")]
    pub verify_by: Option<String>,
    #[sqlx(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[sqlx(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewDica {
    pub usuario_id: String,
    pub conteudo: String,
    pub tema_id: i32,
    pub subtema_ids: Vec<i32>,
}

/// Partial update; `None` keeps the stored value.
#[derive(Debug, Clone, Default)]
pub struct DicaChanges {
    pub conteudo: Option<String>,
    pub tema_id: Option<i32>,
    pub subtema_ids: Option<Vec<i32>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DicaFilter {
    All,
    Verified,
    NotVerified,
    Specialists,
}

#[async_trait]
pub trait DicaRepository: Send + Sync {
    async fn list(&self) -> RepoResult<Vec<DicaRow>>;

    async fn get(&self, id: i64) -> RepoResult<Option<DicaRow>>;

    async fn create(&self, dica: NewDica) -> RepoResult<DicaRow>;

    async fn update(&self, id: i64, changes: DicaChanges) -> RepoResult<Option<DicaRow>>;

    async fn delete(&self, id: i64) -> RepoResult<bool>;

    // Mark as verified by `verify_by` (the verifier's email).
    async fn verify(&self, id: i64, verify_by: &str) -> RepoResult<Option<DicaRow>>;

    async fn list_by_tema(&self, tema_id: i32, filter: DicaFilter) -> RepoResult<Vec<DicaRow>>;

    async fn list_by_tema_and_subtema(
        &self,
        tema_id: i32,
        subtema_id: i32,
    ) -> RepoResult<Vec<DicaRow>>;
}

const DICA_COLUMNS: &str = r#"
    d."dicaId", d."usuarioId", d.conteudo, d."temaId", d."subtemaIds",
    d."isVerify", d."verifyBy", d."createdAt", d."updatedAt"
"#;

#[derive(Clone)]
pub struct PgDicaRepository {
    db: PgPool,
}

impl PgDicaRepository {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl DicaRepository for PgDicaRepository {
    async fn list(&self) -> RepoResult<Vec<DicaRow>> {
        let sql = format!(
            r#"SELECT {DICA_COLUMNS} FROM dicas d ORDER BY d."dicaId" DESC"#
        );
        let rows = sqlx::query_as::<_, DicaRow>(&sql).fetch_all(&self.db).await?;

        Ok(rows)
    }

    async fn get(&self, id: i64) -> RepoResult<Option<DicaRow>> {
        let sql = format!(r#"SELECT {DICA_COLUMNS} FROM dicas d WHERE d."dicaId" = $1"#);
        let row = sqlx::query_as::<_, DicaRow>(&sql)
            .bind(id)
            .fetch_optional(&self.db)
            .await?;

        Ok(row)
    }

    async fn create(&self, dica: NewDica) -> RepoResult<DicaRow> {
        let sql = format!(
            r#"
            INSERT INTO dicas AS d ("usuarioId", conteudo, "temaId", "subtemaIds")
            VALUES ($1, $2, $3, $4)
            RETURNING {DICA_COLUMNS}
            "#
        );
        let row = sqlx::query_as::<_, DicaRow>(&sql)
            .bind(&dica.usuario_id)
            .bind(&dica.conteudo)
            .bind(dica.tema_id)
            .bind(&dica.subtema_ids)
            .fetch_one(&self.db)
            .await?;

        Ok(row)
    }

    async fn update(&self, id: i64, changes: DicaChanges) -> RepoResult<Option<DicaRow>> {
        let sql = format!(
            r#"
            UPDATE dicas AS d
            SET
                conteudo = COALESCE($2, d.conteudo),
                "temaId" = COALESCE($3, d."temaId"),
                "subtemaIds" = COALESCE($4, d."subtemaIds"),
                "updatedAt" = now()
            WHERE d."dicaId" = $1
            RETURNING {DICA_COLUMNS}
            "#
        );
        let row = sqlx::query_as::<_, DicaRow>(&sql)
            .bind(id)
            .bind(changes.conteudo.as_deref())
            .bind(changes.tema_id)
            .bind(changes.subtema_ids.as_deref())
            .fetch_optional(&self.db)
            .await?;

        Ok(row)
    }

    async fn delete(&self, id: i64) -> RepoResult<bool> {
        let result = sqlx::query(
            r#"
            DELETE FROM dicas
            WHERE "dicaId" = $1
            "#,
        )
        .bind(id)
        .execute(&self.db)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn verify(&self, id: i64, verify_by: &str) -> RepoResult<Option<DicaRow>> {
        let sql = format!(
            r#"
            UPDATE dicas AS d
            SET "isVerify" = true, "verifyBy" = $2, "updatedAt" = now()
            WHERE d."dicaId" = $1
            RETURNING {DICA_COLUMNS}
            "#
        );
        let row = sqlx::query_as::<_, DicaRow>(&sql)
            .bind(id)
            .bind(verify_by)
            .fetch_optional(&self.db)
            .await?;

        Ok(row)
    }

    async fn list_by_tema(&self, tema_id: i32, filter: DicaFilter) -> RepoResult<Vec<DicaRow>> {
        let condition = match filter {
            DicaFilter::All => "",
            DicaFilter::Verified => r#"AND d."isVerify" = true"#,
            DicaFilter::NotVerified => r#"AND d."isVerify" = false"#,
            DicaFilter::Specialists => {
                r#"AND EXISTS (
                    SELECT 1 FROM users u
                    WHERE u."userId"::text = d."usuarioId" AND u."isMonitor" = true
                )"#
            }
        };
        let sql = format!(
            r#"
            SELECT {DICA_COLUMNS}
            FROM dicas d
            WHERE d."temaId" = $1 {condition}
            ORDER BY d."dicaId" DESC
            "#
        );
        let rows = sqlx::query_as::<_, DicaRow>(&sql)
            .bind(tema_id)
            .fetch_all(&self.db)
            .await?;

        Ok(rows)
    }

    async fn list_by_tema_and_subtema(
        &self,
        tema_id: i32,
        subtema_id: i32,
    ) -> RepoResult<Vec<DicaRow>> {
        let sql = format!(
            r#"
            SELECT {DICA_COLUMNS}
            FROM dicas d
            WHERE d."temaId" = $1 AND $2 = ANY(d."subtemaIds")
            ORDER BY d."dicaId" DESC
            "#
        );
        let rows = sqlx::query_as::<_, DicaRow>(&sql)
            .bind(tema_id)
            .bind(subtema_id)
            .fetch_all(&self.db)
            .await?;

        Ok(rows)
    }
}
