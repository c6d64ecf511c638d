//! Activation gate
//!
//! One-time per-device handshake: the device id is posted to the backend,
//! which answers with a literal marker when the device is allowed to
//! browse the menu.

use shared::ErrorCode;

use crate::http::{Endpoint, HttpClient};
use crate::session::{Session, SessionStore};
use crate::store::KeyValueStore;

/// Response body the backend sends for an accepted device
pub const ACTIVATION_SUCCESS: &str = "Activation Success";

/// Outcome of an activation attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActivationResult {
    /// Backend accepted the device, flag persisted
    Activated,
    /// Device was already active; nothing was sent
    AlreadyActivated,
    /// Backend answered with something other than the marker
    Rejected { reason: String },
    /// Request failed (network, timeout, missing endpoint)
    Failed { error: String },
}

impl ActivationResult {
    pub fn is_activated(&self) -> bool {
        matches!(self, Self::Activated | Self::AlreadyActivated)
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            Self::Activated | Self::AlreadyActivated => ErrorCode::Success,
            Self::Rejected { .. } => ErrorCode::ActivationRejected,
            Self::Failed { .. } => ErrorCode::NotActivated,
        }
    }

    /// Text for the rendering layer, if any
    pub fn message(&self) -> String {
        match self {
            Self::Activated => {
                "Your account has been activated. You can now access the menu.".to_string()
            }
            Self::AlreadyActivated => "This device is already activated.".to_string(),
            Self::Rejected { reason } => format!("{}. Please try again.", reason),
            Self::Failed { error } => format!("Activation failed: {}", error),
        }
    }
}

/// Whether an activation response body is the success marker
///
/// Accepts the marker both as plain text and as a JSON string literal.
pub fn is_success_marker(body: &str) -> bool {
    if body == ACTIVATION_SUCCESS {
        return true;
    }
    serde_json::from_str::<String>(body).is_ok_and(|s| s == ACTIVATION_SUCCESS)
}

/// Activate this device against the session's endpoint
///
/// Never returns an error: every failure is folded into the result and
/// leaves `session.activated` false.
pub async fn activate<H, S>(http: &H, store: &mut S, session: &mut Session) -> ActivationResult
where
    H: HttpClient + ?Sized,
    S: KeyValueStore + ?Sized,
{
    if session.activated {
        return ActivationResult::AlreadyActivated;
    }

    let endpoint = match session.endpoint() {
        Ok(endpoint) => endpoint,
        Err(e) => {
            tracing::warn!(error = %e, "Activation attempted without endpoint");
            return ActivationResult::Failed {
                error: e.to_string(),
            };
        }
    };

    let result = request_activation(http, &endpoint, session.device_id()).await;
    match &result {
        ActivationResult::Activated => {
            session.activated = true;
            if let Err(e) = SessionStore::save_activation(store, session) {
                // still activated for this run; next launch asks again
                tracing::warn!(error = %e, "Failed to persist activation flag");
            }
            tracing::info!(device_id = %session.device_id(), "Device activated");
        }
        ActivationResult::Rejected { reason } => {
            session.activated = false;
            tracing::warn!(device_id = %session.device_id(), reason = %reason, "Activation rejected");
        }
        ActivationResult::Failed { error } => {
            session.activated = false;
            tracing::error!(device_id = %session.device_id(), error = %error, "Activation request failed");
        }
        ActivationResult::AlreadyActivated => {}
    }
    result
}

async fn request_activation<H>(http: &H, endpoint: &Endpoint, device_id: &str) -> ActivationResult
where
    H: HttpClient + ?Sized,
{
    match http.post_empty(&endpoint.activation_url(device_id)).await {
        Ok(body) if is_success_marker(&body) => ActivationResult::Activated,
        Ok(body) => ActivationResult::Rejected { reason: body },
        // the backend explains refusals in the body, whatever the status
        Err(crate::ClientError::Api { body, .. }) if !body.trim().is_empty() => {
            ActivationResult::Rejected { reason: body }
        }
        Err(e) => ActivationResult::Failed {
            error: e.to_string(),
        },
    }
}
