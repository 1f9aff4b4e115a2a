//! Delivery of signed messages to the Nextcloud Talk bot API.
//!
//! One attempt per message: a failed delivery is returned to the caller as
//! a [`DeliveryError`], never retried and never raised as a panic.

use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::config::BridgeConfig;
use crate::error::DeliveryError;
use crate::signer::sign;

/// A message to post to the Talk room.
///
/// Optional fields are omitted from the JSON body when unset; the Talk API
/// treats an explicit null differently from an absent key.
#[derive(Debug, Clone, Serialize)]
pub struct TalkMessage {
    pub message: String,
    #[serde(rename = "replyTo", skip_serializing_if = "Option::is_none")]
    pub reply_to: Option<i64>,
    #[serde(rename = "referenceId", skip_serializing_if = "Option::is_none")]
    pub reference_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub silent: Option<bool>,
}

impl TalkMessage {
    /// Create a plain message with no reply/reference/silent options.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            reply_to: None,
            reference_id: None,
            silent: None,
        }
    }

    /// Builder: reply to an existing message.
    pub fn with_reply_to(mut self, message_id: i64) -> Self {
        self.reply_to = Some(message_id);
        self
    }

    /// Builder: attach a reference ID for later lookup.
    pub fn with_reference_id(mut self, reference_id: impl Into<String>) -> Self {
        self.reference_id = Some(reference_id.into());
        self
    }

    /// Builder: deliver without triggering notifications.
    pub fn silent(mut self) -> Self {
        self.silent = Some(true);
        self
    }
}

/// Client for the Talk bot message-posting endpoint.
#[derive(Clone)]
pub struct TalkClient {
    client: Client,
    config: BridgeConfig,
}

impl TalkClient {
    /// Create a new delivery client with the configured request timeout.
    pub fn new(config: BridgeConfig) -> Result<Self, DeliveryError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| DeliveryError::Client(e.to_string()))?;

        Ok(Self { client, config })
    }

    /// Post a signed message to the configured Talk endpoint.
    ///
    /// The request carries a fresh nonce and an HMAC-SHA256 signature over
    /// nonce || message text in the Talk bot headers. Success is HTTP 201,
    /// or an OCS envelope whose `ocs.meta.status` is `"success"`. The Talk
    /// API has been observed reporting success both ways, so both checks
    /// are kept.
    pub async fn send(&self, msg: &TalkMessage) -> Result<(), DeliveryError> {
        let signed = sign(self.config.shared_secret.as_bytes(), &msg.message);

        debug!(url = %self.config.talk_url, "Posting message to Talk bot API");

        let response = self
            .client
            .post(&self.config.talk_url)
            .header("Content-Type", "application/json")
            .header("OCS-APIRequest", "true")
            .header("Accept", "application/json")
            .header("X-Nextcloud-Talk-Bot-Random", &signed.nonce)
            .header("X-Nextcloud-Talk-Bot-Signature", &signed.signature)
            .json(msg)
            .send()
            .await
            .map_err(|e| DeliveryError::Network(e.to_string()))?;

        let status = response.status();
        let body: Value = response
            .json()
            .await
            .map_err(|e| DeliveryError::InvalidResponse(e.to_string()))?;

        if status.as_u16() == 201 || ocs_status(&body) == Some("success") {
            debug!(status = %status.as_u16(), "Talk API accepted message");
            Ok(())
        } else {
            Err(DeliveryError::Rejected {
                status: status.as_u16(),
                body: body.to_string(),
            })
        }
    }

    /// The endpoint this client delivers to.
    pub fn endpoint(&self) -> &str {
        &self.config.talk_url
    }
}

/// Extract `ocs.meta.status` from an OCS response envelope.
fn ocs_status(body: &Value) -> Option<&str> {
    body.get("ocs")?.get("meta")?.get("status")?.as_str()
}
