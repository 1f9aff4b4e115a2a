//! talkbridge-server - webhook HTTP server for talkbridge.
//!
//! Receives FluxCD notification webhooks, formats them, and relays them to
//! a Nextcloud Talk room via `talkbridge-core`.
//!
//! # Example
//!
//! ```ignore
//! use talkbridge_server::{create_server, AppState};
//! use talkbridge_core::{BridgeConfig, TalkClient};
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = BridgeConfig::from_env().unwrap();
//!     let state = AppState::new(TalkClient::new(config).unwrap());
//!     let app = create_server(state);
//!
//!     let listener = tokio::net::TcpListener::bind("0.0.0.0:8080").await.unwrap();
//!     axum::serve(listener, app).await.unwrap();
//! }
//! ```

pub mod error;
pub mod middleware;
pub mod routes;
pub mod state;

pub use error::{ApiError, ApiResult};
pub use state::AppState;

use axum::{middleware as axum_middleware, Router};
use tower_http::trace::TraceLayer;

/// Create the server with all routes and middleware.
pub fn create_server(state: AppState) -> Router {
    routes::create_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(middleware::cors_layer())
        .layer(axum_middleware::from_fn(middleware::logging_middleware))
}
