//! Server state management.

use std::sync::Arc;

use talkbridge_core::TalkClient;

/// Shared application state.
///
/// Holds only the delivery client (which owns the immutable configuration);
/// requests share nothing mutable with each other.
#[derive(Clone)]
pub struct AppState {
    pub client: Arc<TalkClient>,
}

impl AppState {
    /// Create application state around a configured delivery client.
    pub fn new(client: TalkClient) -> Self {
        Self {
            client: Arc::new(client),
        }
    }
}
