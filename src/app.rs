/*
 * Responsibility
 * - tracing / panic hook の初期化
 * - Config読み込み → 依存生成 (store, auth, pipeline) → Router 組み立て
 * - Middleware の適用 (authorizer / security headers / CORS / http)
 * - axum::serve() で起動
 */
use std::{panic, process, sync::Arc};

use anyhow::{Context, Result};
use axum::Router;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::{Config, ConfigError, StoreBackend};
use crate::pipeline::{ErrorResponder, RequestPipeline, TracingErrorCapture, responder};
use crate::repos::{MemoryWorkspaceStore, PgWorkspaceStore, WorkspaceStore};
use crate::services::auth::build_auth_service;
use crate::state::AppState;
use crate::{api, middleware};

fn init_tracing() {
    // Prefer RUST_LOG if set; otherwise use a sensible default.
    // Ex:
    // RUST_LOG=info,workspaces_api=debug,tower_http=debug cargo run
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,tower_http=info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Installs the process panic hook.
///
/// Panics raised inside an error capture are only logged: the responder
/// catches them and still sends the response.
pub fn init_panic_hook(abort_on_panic: bool) {
    // Keep the default hook as a fallback (prints to stderr with location/payload).
    let default_hook = panic::take_hook();

    panic::set_hook(Box::new(move |info| {
        // Always surface panics via tracing so they don't get "lost".
        tracing::error!(?info, "panic");

        if responder::capture_in_progress() {
            return;
        }

        // Development: fail fast. Production: default behavior, keep serving.
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

    let abort_on_panic = !config.app_env.is_production();
    init_panic_hook(abort_on_panic);

    tracing::info!(
        "starting workspaces API in {:?} mode on {}",
        config.app_env,
        config.addr
    );

    let state = build_state(&config).await?;
    let app = build_router(state, &config);

    let listener = tokio::net::TcpListener::bind(config.addr)
        .await
        .with_context(|| format!("failed to bind {}", config.addr))?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("server stopped");
    Ok(())
}

/// Process-level services, built once and shared by every request.
pub async fn build_state(config: &Config) -> Result<AppState> {
    let store = build_store(config).await?;
    tracing::info!(backend = store.backend_name(), "workspace store ready");

    let auth = build_auth_service(config).context("failed to build auth service")?;
    let responder = ErrorResponder::new(Arc::new(TracingErrorCapture));
    let pipeline = RequestPipeline::new(store, responder);

    Ok(AppState::new(pipeline, auth, config.scopes.clone()))
}

async fn build_store(config: &Config) -> Result<Arc<dyn WorkspaceStore>> {
    match config.store_backend {
        StoreBackend::Memory => {
            tracing::warn!("using the in-memory workspace store; data is lost on restart");
            Ok(Arc::new(MemoryWorkspaceStore::new()))
        }
        StoreBackend::Postgres => {
            let url = config
                .database_url
                .as_deref()
                .ok_or(ConfigError::Missing("DATABASE_URL"))?;

            let pool = PgPoolOptions::new()
                .max_connections(config.database_max_connections)
                .connect(url)
                .await
                .context("failed to connect to postgres")?;

            Ok(Arc::new(PgWorkspaceStore::new(pool)))
        }
    }
}

pub fn build_router(state: AppState, config: &Config) -> Router {
    let router = Router::new()
        .nest("/api/v1", api::v1::routes(state.clone()))
        .fallback(api::v1::handlers::fallback::route_not_found)
        .with_state(state);

    let router = middleware::security_headers::apply(router);
    let router = middleware::cors::apply(router, config);
    middleware::http::apply(router)
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received");
}
