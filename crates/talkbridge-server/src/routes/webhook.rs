//! Inbound FluxCD webhook endpoint.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use serde::Serialize;
use tracing::{error, info};

use talkbridge_core::{format_alert, AlertEvent, TalkMessage};

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// Response for a relayed notification.
#[derive(Debug, Serialize)]
pub struct WebhookResponse {
    pub status: String,
    pub message: String,
}

/// Receive a FluxCD alert and relay it to the Talk room.
/// POST /webhook
///
/// Partial payloads are fine (missing fields default in the formatter);
/// only a body that is not JSON at all is an error.
pub async fn handle_webhook(
    State(state): State<AppState>,
    event: Result<Json<AlertEvent>, JsonRejection>,
) -> ApiResult<Json<WebhookResponse>> {
    let Json(event) = event.map_err(|e| ApiError::internal(e.body_text()))?;

    info!(
        severity = event.severity.as_deref().unwrap_or("info"),
        reason = event.reason.as_deref().unwrap_or("Unknown"),
        "Received FluxCD alert"
    );

    let text = format_alert(&event);

    state.client.send(&TalkMessage::new(text)).await.map_err(|e| {
        error!(error = %e, "Delivery to Talk failed");
        ApiError::from(e)
    })?;

    Ok(Json(WebhookResponse {
        status: "success".to_string(),
        message: "Notification sent to Nextcloud Talk".to_string(),
    }))
}
