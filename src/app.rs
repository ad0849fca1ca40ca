/*
 * Responsibility
 * - tracing / panic hook 初期化
 * - Config 読み込み → PgPool + migration → 依存生成 (AppState) → Router 組み立て
 * - Middleware の適用 (http / CORS / security headers)
 * - axum::serve() で起動
 */
use std::{panic, process, sync::Arc};

use anyhow::Result;
use axum::{Router, routing::get};
use sqlx::{PgPool, postgres::PgPoolOptions};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::api::{self, handlers::health::health};
use crate::config::Config;
use crate::middleware;
use crate::repos::{PgDicaRepository, PgTemaRepository, PgUserRepository};
use crate::services::auth::build_auth_gate;
use crate::state::AppState;

fn init_tracing() {
    // RUST_LOG があればそれを優先する
    // 例: RUST_LOG=info,dicas_api=debug,tower_http=debug cargo run
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,tower_http=info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn init_panic_hook(abort_on_panic: bool) {
    let default_hook = panic::take_hook();

    panic::set_hook(Box::new(move |info| {
        tracing::error!(?info, "panic");

        // development は即死させて気づけるようにする
        if abort_on_panic {
            process::abort();
        } else {
            default_hook(info);
        }
    }))
}

pub async fn run() -> Result<()> {
    init_tracing();
    let config = Config::from_env()?;
    init_panic_hook(!config.app_env.is_production());

    tracing::info!(?config, "starting API in {:?} mode on {}", config.app_env, config.addr);

    let pool = PgPoolOptions::new()
        .max_connections(config.database_max_connections)
        .connect(&config.database_url)
        .await?;
    sqlx::migrate!().run(&pool).await?;
    tracing::info!("database migrations applied");

    let state = build_state(&config, pool);
    let app = build_router(state, &config);

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn build_state(config: &Config, pool: PgPool) -> AppState {
    // JWT_SECRET はここで AuthGate に一度だけ注入する
    let auth = build_auth_gate(config);

    AppState::new(
        auth,
        Arc::new(PgDicaRepository::new(pool.clone())),
        Arc::new(PgTemaRepository::new(pool.clone())),
        Arc::new(PgUserRepository::new(pool)),
    )
}

fn build_router(state: AppState, config: &Config) -> Router {
    let router = Router::new()
        .route("/health", get(health))
        .nest("/api", api::routes(state.clone()))
        .with_state(state);

    let router = middleware::http::apply(router, config);
    let router = middleware::cors::apply(router, config);
    middleware::security_headers::apply(router)
}
