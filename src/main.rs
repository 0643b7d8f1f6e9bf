use std::sync::Arc;

use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use frontend::config::ConsoleConfig;
use frontend::gateway::HttpGateway;
use frontend::routes::router;
use frontend::services::TaskBoard;
use frontend::state::AppState;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "frontend=debug".to_string()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ConsoleConfig::new_from_env()?;
    info!("backend at {}", config.backend_base_url);
    if config.map_api_key.is_none() {
        info!("MAP_API_KEY not set; panels will show without geocoded locations");
    }

    let gateway = Arc::new(HttpGateway::new(config.backend_base_url.clone())?);
    let board = TaskBoard::new(gateway, config.map_api_key.clone());
    let state = AppState { board: Arc::new(board) };

    let app = router(state);

    info!("listening on http://{}", config.addr);
    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
