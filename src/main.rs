use clap::Parser;
use tokio::net::TcpListener;
use tracing::info;

use blobgate::config::{Cli, Config};
use blobgate::{routes::create_router, utils::init_logger, AppState, Backend};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logger();

    // Load configuration
    let config = Config::from_env(&cli)?;
    info!("Configuration loaded: {:?}", config.server);
    info!("Storage configuration: {:?}", config.storage);

    let backend = Backend::init(&config.storage)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to initialize storage: {}", e))?;

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let state = AppState::new(config, backend);
    let app = create_router(state);

    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app)
        .await
        .map_err(|e| anyhow::anyhow!("Server error: {}", e))?;

    Ok(())
}
