//! Bearer token 検証 → AuthCtx を extensions に入れる
//!
//! - `Authorization` ヘッダを AuthGate に渡し、結果に応じて拒否 or 続行する
//! - 拒否時のレスポンス (401 / 400) は `AuthRejection` の IntoResponse が決める
//! - 成功時は `AuthCtx` を request extensions に格納し、handler は extractor で受け取る

use axum::{
    Router,
    body::Body,
    extract::State,
    http::{Request, header},
    middleware::{self, Next},
    response::Response,
};

use crate::api::extractors::AuthCtx;
use crate::services::auth::AuthRejection;
use crate::state::AppState;

/// 認証必須の route に access middleware を適用する。
///
/// `route_layer` なので、どの route にも一致しないリクエストは 401 ではなく 404 になる。
///
/// 例：
/// ```ignore
/// let protected = Router::new().route("/usuario/me", get(get_profile));
/// let protected = middleware::auth::access::apply(protected, state.clone());
/// ```
pub fn apply(router: Router<AppState>, state: AppState) -> Router<AppState> {
    // axum 0.8 の from_fn は State extractor を受け取れないため、`from_fn_with_state` で明示的に state を渡す
    router.route_layer(middleware::from_fn_with_state(state, access_middleware))
}

async fn access_middleware(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AuthRejection> {
    // Non-visible-ASCII header values cannot be split into scheme + token.
    let header = match req.headers().get(header::AUTHORIZATION) {
        Some(value) => Some(value.to_str().map_err(|_| {
            tracing::debug!("authorization header is not valid ascii");
            AuthRejection::MalformedToken
        })?),
        None => None,
    };

    let claim = state.auth.authenticate(header).map_err(|rejection| {
        tracing::debug!(
            method = %req.method(),
            path = %req.uri().path(),
            ?rejection,
            "request rejected by auth gate"
        );
        rejection
    })?;

    tracing::debug!(user_id = %claim.user_id, "request authenticated");

    // middleware → extractor への受け渡し
    req.extensions_mut().insert(AuthCtx::from(claim));

    Ok(next.run(req).await)
}
