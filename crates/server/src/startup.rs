use std::{net::SocketAddr, sync::Arc};

use axum::Router;
use configs::{AppConfig, ServerConfig};
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::routes::{self, ServerState};
use service::item::{open_repository, ItemRepository};

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

fn bind_addr(server: &ServerConfig) -> anyhow::Result<SocketAddr> {
    Ok(format!("{}:{}", server.host, server.port).parse()?)
}

/// Router over an already-opened repository; used by `run` and by tests.
pub fn build_app(repo: Arc<dyn ItemRepository>, cfg: &AppConfig) -> Router {
    routes::build_router(ServerState::new(repo), &cfg.routes, build_cors())
}

/// Resolves on Ctrl+C, or SIGTERM on unix.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if tokio::signal::ctrl_c().await.is_err() {
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => { sig.recv().await; }
            Err(_) => std::future::pending::<()>().await,
        }
    };
    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    info!(event = "shutdown_signal", "shutdown signal received, draining connections");
}

/// Public entry: open storage, then serve until a shutdown signal.
/// Logging and config loading are the caller's job.
pub async fn run(cfg: AppConfig) -> anyhow::Result<()> {
    // one storage handle for the whole process, injected into the service
    let repo = open_repository(&cfg.database).await?;
    let app = build_app(Arc::clone(&repo), &cfg);

    let addr = bind_addr(&cfg.server)?;
    info!(%addr, health = cfg.routes.health, items = cfg.routes.items, "starting item service");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    repo.close().await?;
    info!(event = "storage_closed", "storage released");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bind_addr_from_config() {
        let s = ServerConfig { host: "0.0.0.0".into(), port: 3000, worker_threads: None };
        assert_eq!(bind_addr(&s).unwrap().port(), 3000);

        let bad = ServerConfig { host: "not a host".into(), port: 3000, worker_threads: None };
        assert!(bind_addr(&bad).is_err());
    }

    #[tokio::test]
    async fn run_uses_the_supplied_config() {
        // never reaches serve: the injected host cannot be bound
        let cfg = AppConfig {
            server: ServerConfig { host: "not a host".into(), port: 3000, worker_threads: None },
            database: configs::DatabaseConfig::memory(),
            ..AppConfig::default()
        };
        let err = run(cfg).await.expect_err("invalid host must fail");
        assert!(err.to_string().contains("invalid socket address"), "{err}");
    }
}
