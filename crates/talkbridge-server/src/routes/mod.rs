//! Route definitions for the webhook server.

mod health;
mod webhook;

use axum::{
    routing::{get, post},
    Router,
};

use crate::state::AppState;

/// Create the main application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health::health_check))
        // Inbound FluxCD webhook
        .route("/webhook", post(webhook::handle_webhook))
        // Attach state
        .with_state(state)
}

pub use health::*;
pub use webhook::*;
