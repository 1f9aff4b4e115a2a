//! talkbridge-server - webhook server binary.

use std::net::SocketAddr;

use talkbridge_core::{BridgeConfig, TalkClient};
use talkbridge_server::{create_server, AppState};
use tokio::signal;
use tracing::{error, info, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(
            EnvFilter::from_default_env()
                .add_directive(Level::INFO.into())
                .add_directive("talkbridge_server=debug".parse().unwrap()),
        )
        .init();

    // Get configuration from environment
    let host = std::env::var("BRIDGE_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port: u16 = std::env::var("BRIDGE_PORT")
        .unwrap_or_else(|_| "8080".to_string())
        .parse()
        .expect("BRIDGE_PORT must be a valid port number");

    // Talk endpoint and signing secret are required; refuse to start without them
    let config = match BridgeConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("Required environment variables WEBHOOK_URL and SHARED_SECRET must be set: {e}");
            std::process::exit(1);
        }
    };
    let client = TalkClient::new(config)?;
    info!(endpoint = %client.endpoint(), "Delivering notifications to Nextcloud Talk");
    let state = AppState::new(client);
    let app = create_server(state);

    // Start server
    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;
    info!("Starting talkbridge-server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    // Serve with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped cleanly");
    Ok(())
}
