//! Server setup with Tower middleware

use tokio::net::TcpListener;
use tracing::{error, info, warn};

use crate::{Error, ServerConfig, create_router};

/// Run the axum server until Ctrl+C.
///
/// # Errors
///
/// Returns an error if the router cannot be built, the address cannot be
/// bound, or the server fails while running.
pub async fn run_server(config: ServerConfig) -> Result<(), Error> {
    if !config.pages_dir.is_dir() {
        warn!(
            "Pages directory {} does not exist; page routes will return 404",
            config.pages_dir.display()
        );
    }

    let app = create_router(&config)?;

    let listener = TcpListener::bind(config.bind_address.as_str()).await?;
    info!("InsightDash listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("InsightDash stopped");
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Received Ctrl+C, initiating graceful shutdown"),
        Err(err) => error!("Failed to listen for shutdown signal: {}", err),
    }
}
