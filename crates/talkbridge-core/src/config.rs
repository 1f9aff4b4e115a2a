//! Bridge configuration, loaded once at startup.

use std::fmt;
use std::time::Duration;

use crate::error::{BridgeError, BridgeResult};

/// Fixed timeout for outbound Talk API requests.
pub const DELIVERY_TIMEOUT: Duration = Duration::from_secs(10);

/// Immutable bridge configuration.
///
/// Constructed once at process start and passed explicitly to the delivery
/// client; nothing reads the environment after startup.
#[derive(Clone)]
pub struct BridgeConfig {
    /// Nextcloud Talk bot message-posting URL.
    pub talk_url: String,
    /// Shared secret used as the HMAC signing key.
    pub shared_secret: String,
    /// Outbound request timeout.
    pub timeout: Duration,
}

impl BridgeConfig {
    /// Create a config from explicit values.
    pub fn new(talk_url: impl Into<String>, shared_secret: impl Into<String>) -> BridgeResult<Self> {
        let talk_url = talk_url.into();
        let shared_secret = shared_secret.into();

        if talk_url.is_empty() {
            return Err(BridgeError::Configuration(
                "Talk endpoint URL must not be empty".to_string(),
            ));
        }
        if shared_secret.is_empty() {
            return Err(BridgeError::Configuration(
                "shared secret must not be empty".to_string(),
            ));
        }

        Ok(Self {
            talk_url,
            shared_secret,
            timeout: DELIVERY_TIMEOUT,
        })
    }

    /// Load configuration from environment variables.
    ///
    /// Requires `WEBHOOK_URL` (the Talk bot endpoint) and `SHARED_SECRET`
    /// (the bot's signing secret). Missing or empty values are a startup
    /// error, not a per-request one.
    pub fn from_env() -> BridgeResult<Self> {
        let talk_url = std::env::var("WEBHOOK_URL")
            .map_err(|_| BridgeError::Configuration("WEBHOOK_URL not set".to_string()))?;
        let shared_secret = std::env::var("SHARED_SECRET")
            .map_err(|_| BridgeError::Configuration("SHARED_SECRET not set".to_string()))?;

        Self::new(talk_url, shared_secret)
    }
}

// Manual Debug so the signing secret never reaches the logs.
impl fmt::Debug for BridgeConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BridgeConfig")
            .field("talk_url", &self.talk_url)
            .field("shared_secret", &"<redacted>")
            .field("timeout", &self.timeout)
            .finish()
    }
}
