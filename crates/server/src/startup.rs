use std::net::SocketAddr;

use axum::Router;
use configs::AppConfig;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tracing::{error, info};

use crate::routes;
use crate::state::AppState;

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Router wired to a fresh in-memory store according to `cfg`.
pub fn build_app(cfg: &AppConfig) -> Router {
    routes::build_router(AppState::in_memory(cfg.store.seed), build_cors())
}

/// Serve `app` on an already bound listener until `shutdown` resolves,
/// then drain in-flight requests.
pub async fn serve<F>(listener: TcpListener, app: Router, shutdown: F) -> anyhow::Result<()>
where
    F: std::future::Future<Output = ()> + Send + 'static,
{
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;
    Ok(())
}

/// Public entry: build the app and run the HTTP server until Ctrl-C / SIGTERM.
pub async fn run(cfg: AppConfig) -> anyhow::Result<()> {
    let addr: SocketAddr = cfg.bind_addr().parse()?;
    let app = build_app(&cfg);

    let listener = TcpListener::bind(addr).await?;
    info!(%addr, seeded = cfg.store.seed, "post store api listening");
    serve(listener, app, shutdown_signal()).await?;
    info!("post store api stopped");
    Ok(())
}

/// Resolves on the first of Ctrl-C or (on Unix) SIGTERM. A signal that cannot
/// be installed is logged and never fires.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "failed to install Ctrl-C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let sigterm = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let sigterm = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => info!("received Ctrl-C, shutting down"),
        () = sigterm => info!("received SIGTERM, shutting down"),
    }
}
