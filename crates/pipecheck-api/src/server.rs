//! API server assembly and lifecycle.

use std::future::Future;
use std::sync::Arc;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use tokio::net::TcpListener;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::Result;
use crate::config::{CorsConfig, ServerConfig};
use crate::routes::{self, AppState};

/// Builds the full application router: routes, body limit, request
/// tracing and CORS.
pub fn build_router(config: &ServerConfig) -> Result<Router> {
    let state = Arc::new(AppState::from(config));

    let router = routes::router()
        .with_state(state)
        .layer(DefaultBodyLimit::max(config.max_body_bytes))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(&config.cors)?);

    Ok(router)
}

/// Builds the CORS layer for the configured origins.
///
/// A wildcard combined with credentials mirrors the caller's origin, since
/// browsers reject `*` on credentialed requests.
pub fn cors_layer(cors: &CorsConfig) -> Result<CorsLayer> {
    let origin = if cors.allows_any_origin() {
        if cors.allow_credentials {
            AllowOrigin::mirror_request()
        } else {
            AllowOrigin::any()
        }
    } else {
        AllowOrigin::list(cors.origin_header_values()?)
    };

    Ok(CorsLayer::new()
        .allow_origin(origin)
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(cors.allow_credentials))
}

/// Binds the configured address and serves until Ctrl-C or SIGTERM.
pub async fn serve(config: ServerConfig) -> Result<()> {
    config.validate()?;

    let addr = config.socket_addr()?;
    let listener = TcpListener::bind(addr).await?;
    let router = build_router(&config)?;

    if config.cors.allows_any_origin() {
        tracing::warn!("CORS allows any origin; restrict cors.allowed_origins for production");
    }

    serve_on(listener, router, shutdown_signal()).await
}

/// Serves `router` on an already-bound listener until `shutdown` resolves.
pub async fn serve_on<F>(listener: TcpListener, router: Router, shutdown: F) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let local_addr = listener.local_addr()?;
    tracing::info!(%local_addr, "Pipecheck API listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown)
        .await?;

    tracing::info!("Pipecheck API stopped");
    Ok(())
}

/// Resolves on the first of Ctrl-C or (on Unix) SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
