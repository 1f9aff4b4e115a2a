//! Inbound FluxCD alert payloads and chat message formatting.

use serde::Deserialize;

const DEFAULT_SEVERITY: &str = "info";
const DEFAULT_FIELD: &str = "Unknown";
const DEFAULT_MESSAGE: &str = "No message provided";

/// A FluxCD notification event, as POSTed to `/webhook`.
///
/// Every field is optional: malformed or partial payloads are handled by
/// defaulting, never rejected.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AlertEvent {
    pub severity: Option<String>,
    #[serde(rename = "involvedObject")]
    pub involved_object: Option<InvolvedObject>,
    pub reason: Option<String>,
    pub message: Option<String>,
}

/// The Kubernetes resource an alert refers to.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct InvolvedObject {
    pub kind: Option<String>,
    pub name: Option<String>,
}

/// Map a severity to its display icon, case-insensitively.
fn severity_icon(severity: &str) -> &'static str {
    match severity.to_lowercase().as_str() {
        "info" => "ℹ️",
        "error" => "❌",
        "warning" => "⚠️",
        _ => "🔔",
    }
}

/// Format an alert as a Talk chat message.
///
/// Layout: an icon + severity headline naming the resource, a reason line,
/// a blank line, then the free-text message.
pub fn format_alert(event: &AlertEvent) -> String {
    let severity = event.severity.as_deref().unwrap_or(DEFAULT_SEVERITY);
    let (kind, name) = match &event.involved_object {
        Some(obj) => (
            obj.kind.as_deref().unwrap_or(DEFAULT_FIELD),
            obj.name.as_deref().unwrap_or(DEFAULT_FIELD),
        ),
        None => (DEFAULT_FIELD, DEFAULT_FIELD),
    };
    let reason = event.reason.as_deref().unwrap_or(DEFAULT_FIELD);
    let message = event.message.as_deref().unwrap_or(DEFAULT_MESSAGE);

    format!(
        "{} {}: {}/{}\nReason: {}\n\n{}",
        severity_icon(severity),
        severity.to_uppercase(),
        kind,
        name,
        reason,
        message
    )
}
