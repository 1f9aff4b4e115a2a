//! talkbridge-core - Core library for talkbridge.
//!
//! This crate provides the domain logic for the FluxCD → Nextcloud Talk
//! notification bridge: inbound alert types and formatting, request signing
//! for the Talk bot API, and the delivery client.
//!
//! # Example
//!
//! ```ignore
//! use talkbridge_core::{format_alert, AlertEvent, BridgeConfig, TalkClient, TalkMessage};
//!
//! let config = BridgeConfig::from_env()?;
//! let client = TalkClient::new(config)?;
//!
//! let text = format_alert(&event);
//! client.send(&TalkMessage::new(text)).await?;
//! ```

pub mod config;
pub mod delivery;
pub mod error;
pub mod format;
pub mod signer;

// Re-export commonly used types
pub use config::BridgeConfig;
pub use delivery::{TalkClient, TalkMessage};
pub use error::{BridgeError, BridgeResult, DeliveryError};
pub use format::{format_alert, AlertEvent, InvolvedObject};
pub use signer::{sign, SignedPayload};
