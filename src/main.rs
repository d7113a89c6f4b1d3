use cake_or_rocket::{config::log_filter_from_env, router, ActivityStore, AppState, ServerConfig};
use tracing::info;
use tracing_subscriber::fmt;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    fmt().with_env_filter(log_filter_from_env()).init();

    let config = ServerConfig::from_env();
    let store = ActivityStore::with_samples();
    info!(activities = store.records().len(), "seeded activity list");

    let app = router(AppState::new(store));

    info!("listening on http://{}", config.addr);
    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("shutting down"),
        Err(err) => {
            tracing::error!("failed to listen for ctrl-c: {err}");
            std::future::pending::<()>().await;
        }
    }
}
