use dotenvy::dotenv;
use tracing::{error, info};
use warden::logging::init_tracing;
use warden::metrics::{init_metrics, metrics_app};
use warden::router::init_router;
use warden::state::init_app_state;
use warden_config::ServerConfig;

#[tokio::main]
async fn main() {
    dotenv().ok();

    let _log_guards = init_tracing();

    if let Err(e) = run().await {
        error!(error = %format!("{:#}", e), "Server failed to start");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let server_config = ServerConfig::from_env()?;
    let state = init_app_state().await?;

    let mut app = init_router(state);
    if let Some(handle) = init_metrics() {
        app = app.merge(metrics_app(handle));
        info!("Prometheus metrics available at /metrics");
    }

    let address = server_config.bind_address();
    let listener = tokio::net::TcpListener::bind(&address).await?;
    info!(address = %address, "Server running");
    info!("Swagger UI available at /swagger-ui, Scalar at /scalar");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
