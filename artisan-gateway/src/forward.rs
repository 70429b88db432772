//! Best-effort relay of registrations to an external webhook.
//!
//! Runs after the registration is persisted. Every outcome is reported to
//! the caller as metadata; none of them fails the request.

use std::time::Duration;

use artisan_core::{DocumentId, Registration};
use chrono::{SecondsFormat, Utc};
use reqwest::StatusCode;
use serde::Serialize;
use serde_json::Value;
use tracing::{info, warn};

use crate::error::truncate;

/// Upper bound on a single forward round-trip.
pub const FORWARD_TIMEOUT: Duration = Duration::from_secs(10);

/// Provenance tag attached to every forwarded payload.
const FORWARD_SOURCE: &str = "website";

/// Longest transport error message kept in the outcome.
const MAX_ERROR_DETAIL: usize = 120;

/// Errors that can occur while setting up or performing a forward.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ForwardError {
    /// The request could not be sent or no response arrived in time.
    #[error(transparent)]
    Transport(#[from] reqwest::Error),

    /// The destination answered with a non-success status.
    #[error("webhook rejected the payload with HTTP {0}")]
    Rejected(StatusCode),

    /// The registration could not be encoded as a JSON object.
    #[error("cannot encode registration: {0}")]
    Encode(#[from] serde_json::Error),
}

/// What happened when a registration was relayed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ForwardOutcome {
    /// No destination is configured; nothing was sent.
    Skipped,
    /// The destination accepted the payload.
    Delivered(StatusCode),
    /// The destination answered with a non-2xx status.
    Rejected(StatusCode),
    /// The request never completed; holds the truncated error text.
    Failed(String),
}

/// Wire form of a forward outcome: a status code or an error string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ForwardStatus {
    Code(u16),
    Error(String),
}

impl ForwardOutcome {
    /// `true` only when the destination accepted the payload.
    #[must_use]
    pub fn forwarded(&self) -> bool {
        matches!(self, Self::Delivered(_))
    }

    /// Status reported to the caller; `None` when nothing was attempted.
    #[must_use]
    pub fn status(&self) -> Option<ForwardStatus> {
        match self {
            Self::Skipped => None,
            Self::Delivered(code) | Self::Rejected(code) => Some(ForwardStatus::Code(code.as_u16())),
            Self::Failed(msg) => Some(ForwardStatus::Error(msg.clone())),
        }
    }
}

impl From<ForwardError> for ForwardOutcome {
    fn from(err: ForwardError) -> Self {
        match err {
            ForwardError::Rejected(code) => Self::Rejected(code),
            other => Self::Failed(format!("error: {}", truncate(&other.to_string(), MAX_ERROR_DETAIL))),
        }
    }
}

/// HTTP client for the registration webhook.
#[derive(Debug, Clone)]
pub struct Forwarder {
    client: reqwest::Client,
    url: Option<String>,
}

impl Forwarder {
    /// Build a forwarder posting to `url`, or a no-op one when `url` is `None`.
    ///
    /// # Errors
    /// Returns [`ForwardError::Transport`] if the HTTP client cannot be built.
    pub fn new(url: Option<String>) -> Result<Self, ForwardError> {
        let client = reqwest::Client::builder().timeout(FORWARD_TIMEOUT).build()?;
        Ok(Self { client, url })
    }

    /// Relay `registration`, stored under `id`, to the webhook.
    pub async fn forward(&self, registration: &Registration, id: &DocumentId) -> ForwardOutcome {
        let Some(url) = self.url.as_deref() else {
            return ForwardOutcome::Skipped;
        };
        match self.post(url, registration, id).await {
            Ok(code) => {
                info!(registration_id = %id, status = code.as_u16(), "registration forwarded");
                ForwardOutcome::Delivered(code)
            }
            Err(e) => {
                warn!(registration_id = %id, error = %e, "registration forward failed");
                e.into()
            }
        }
    }

    async fn post(
        &self,
        url: &str,
        registration: &Registration,
        id: &DocumentId,
    ) -> Result<StatusCode, ForwardError> {
        let payload = outbound_payload(registration, id)?;
        let status = self.client.post(url).json(&payload).send().await?.status();
        if status.is_success() {
            Ok(status)
        } else {
            Err(ForwardError::Rejected(status))
        }
    }
}

/// The registration's own fields plus `_source`, `_received_at` and
/// `_registration_id`.
///
/// # Errors
/// Returns [`ForwardError::Encode`] if the registration does not encode as an object.
pub fn outbound_payload(registration: &Registration, id: &DocumentId) -> Result<Value, ForwardError> {
    let mut payload = serde_json::to_value(registration)?;
    if let Value::Object(map) = &mut payload {
        map.insert("_source".to_owned(), FORWARD_SOURCE.into());
        map.insert(
            "_received_at".to_owned(),
            Utc::now().to_rfc3339_opts(SecondsFormat::Micros, false).into(),
        );
        map.insert("_registration_id".to_owned(), id.as_str().into());
    }
    Ok(payload)
}
