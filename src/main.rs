use anyhow::Context;
use dotenvy::dotenv;
use tokio::signal;
use tracing::{error, info};

use lessons::lessons_config::ServerConfig;
use lessons::logging::{init_tracing, shutdown_tracer};
use lessons::metrics::{init_metrics, metrics_app};
use lessons::router::init_router;
use lessons::state::init_app_state;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    init_tracing()?;

    let server = ServerConfig::from_env();
    let state = init_app_state().await?;

    lessons::lessons_db::run_migrations(&state.db)
        .await
        .context("Failed to run database migrations")?;

    info!(
        endpoint = %state.introspection.endpoint(),
        "Token introspection configured"
    );

    if let Some(handle) = init_metrics() {
        let metrics_addr = format!("{}:{}", server.host, server.metrics_port);
        let listener = tokio::net::TcpListener::bind(&metrics_addr)
            .await
            .with_context(|| format!("Failed to bind metrics listener on {metrics_addr}"))?;
        info!(addr = %metrics_addr, "Metrics server listening");

        tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, metrics_app(handle)).await {
                error!(error = %e, "Metrics server error");
            }
        });
    }

    let app = init_router(state);

    let addr = server.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!(addr = %addr, "Server running");
    info!("Swagger UI available at http://{addr}/api/v1/docs");
    info!("Scalar UI available at http://{addr}/api/v1/docs/scalar");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    shutdown_tracer().await;
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl+C, initiating graceful shutdown"),
        _ = terminate => info!("Received SIGTERM, initiating graceful shutdown"),
    }
}
