/*
 * Responsibility
 * - /api の URL 構造を定義
 * - 公開 route と認証必須 route を分けて組み立て、認証側にだけ access middleware を route_layer で掛ける
 * - 同じ path で method ごとに公開/認証が分かれるもの (GET /dicas と POST /dicas など) は merge で合成
 */
use axum::{
    Router,
    routing::{get, patch, post, put},
};

use crate::middleware;
use crate::state::AppState;

use crate::api::handlers::{
    dicas::{
        create_dica, delete_dica, get_dica, list_dicas, list_dicas_by_tema,
        list_dicas_by_tema_and_subtema, list_specialist_dicas, list_unverified_dicas,
        list_verified_dicas, update_dica, verify_dica,
    },
    temas::{delete_tema, list_subtemas, list_temas, tema_exists},
    users::{delete_user, get_profile, get_user, list_users, update_user},
};

pub fn routes(state: AppState) -> Router<AppState> {
    // `/dicas/{id}/{subtema}` is the tema/subtema listing; the first segment keeps
    // the `{id}` name so it shares the node with `/dicas/{id}/verificar`.
    let public = Router::new()
        .route("/dicas", get(list_dicas))
        .route("/dicas/{id}", get(get_dica))
        .route("/dicas/{id}/{subtema}", get(list_dicas_by_tema_and_subtema))
        .route("/{tema}/dicas", get(list_dicas_by_tema))
        .route("/{tema}/dicas/verificadas", get(list_verified_dicas))
        .route("/{tema}/dicas/nao-verificadas", get(list_unverified_dicas))
        .route("/{tema}/dicas/especialistas", get(list_specialist_dicas));

    let protected = Router::new()
        .route("/dicas", post(create_dica))
        .route("/dicas/{id}", put(update_dica).delete(delete_dica))
        .route("/dicas/{id}/verificar", patch(verify_dica))
        .route("/tema", get(list_temas))
        .route("/tema/{id}", get(tema_exists).delete(delete_tema))
        .route("/tema/{id}/subtemas", get(list_subtemas))
        .route("/usuario/me", get(get_profile))
        .route("/usuario", get(list_users))
        .route(
            "/usuario/{id}",
            get(get_user).put(update_user).delete(delete_user),
        );

    let protected = middleware::auth::access::apply(protected, state);

    public.merge(protected)
}
