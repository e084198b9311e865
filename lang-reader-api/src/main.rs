use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use crate::{app_state::AppState, routes::ErrorDetails};

mod adapters;
mod app_state;
mod config;
mod domain;
mod factory;
mod router;
mod routes;
mod startup;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("lang_reader_api=info,tower_http=info")),
        )
        .init();

    let environment = config::current_environment()?;
    let settings = config::read_config(&environment)?;
    tracing::info!("Starting in {} environment", environment);

    let project_service =
        factory::project_service(settings.application.storage, &settings.database).await?;
    let app_state = AppState::new(project_service, ErrorDetails::from(&environment));
    let app = router::create(app_state, &settings.application.app_url);

    let addr = format!("{}:{}", settings.application.host, settings.application.port);
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!("Server running on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", err);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
