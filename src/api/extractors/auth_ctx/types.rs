/*
 * Responsibility
 * - Handler から見える「認証済みコンテキスト」の型
 * - middleware が検証して request extensions に格納し、handler はこの型だけを受け取る
 *
 * Notes
 * - token の検証ロジックは services::auth 側の責務
 */
use crate::services::auth::IdentityClaim;

/// 認証済みのリクエストに付与されるコンテキスト
///
/// - `user_id` / `email` は token の claim そのまま (空文字列でないことは検証済み)
/// - `issued_at` / `expires_at` は監査/ログ相関用
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthCtx {
    pub user_id: String,
    pub email: String,
    pub issued_at: Option<u64>,
    pub expires_at: u64,
    pub issuer: Option<String>,
    pub subject: Option<String>,
}

impl From<IdentityClaim> for AuthCtx {
    fn from(claim: IdentityClaim) -> Self {
        Self {
            user_id: claim.user_id,
            email: claim.email,
            issued_at: claim.iat,
            expires_at: claim.exp,
            issuer: claim.iss,
            subject: claim.sub,
        }
    }
}
