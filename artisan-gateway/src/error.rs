//! Error types for the gateway crate.

use artisan_core::ValidationError;
use artisan_store::StoreError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Longest store error message echoed back to a client.
const MAX_STORE_DETAIL: usize = 200;

/// Errors that can occur during gateway request handling.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum GatewayError {
    /// The payload parsed but failed field validation.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The document store was unavailable or rejected the operation.
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// The request body or query string is malformed.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// The request body exceeds the accepted size.
    #[error("payload too large: {0}")]
    PayloadTooLarge(String),
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        match self {
            GatewayError::Validation(e) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(json!({"error": "validation failed", "fields": e.errors})),
            )
                .into_response(),
            GatewayError::Store(ref e) => {
                tracing::error!(error = %e, "store operation failed");
                let detail = truncate(&self.to_string(), MAX_STORE_DETAIL);
                (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({"error": detail}))).into_response()
            }
            GatewayError::InvalidRequest(_) => {
                (StatusCode::BAD_REQUEST, Json(json!({"error": self.to_string()}))).into_response()
            }
            GatewayError::PayloadTooLarge(_) => {
                (StatusCode::PAYLOAD_TOO_LARGE, Json(json!({"error": self.to_string()}))).into_response()
            }
        }
    }
}

/// Cut `s` to at most `max` characters.
pub(crate) fn truncate(s: &str, max: usize) -> String {
    s.chars().take(max).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use artisan_core::FieldErrorKind;
    use axum::response::IntoResponse;

    #[test]
    fn gateway_error_status_codes_map_correctly() {
        let invalid = ValidationError::single("name", FieldErrorKind::Missing);
        let resp = GatewayError::Validation(invalid).into_response();
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let bad_req = GatewayError::InvalidRequest("expected JSON".to_owned());
        let resp = bad_req.into_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let too_large = GatewayError::PayloadTooLarge("length limit exceeded".to_owned());
        let resp = too_large.into_response();
        assert_eq!(resp.status(), StatusCode::PAYLOAD_TOO_LARGE);
    }

    #[test]
    fn gateway_error_store_variant_returns_500() {
        let gw_err = GatewayError::Store(StoreError::Unavailable);
        let resp = gw_err.into_response();
        assert_eq!(
            resp.status(),
            StatusCode::INTERNAL_SERVER_ERROR,
            "Store errors must map to 500"
        );
    }

    #[test]
    fn gateway_error_display_includes_message() {
        let err = GatewayError::Store(StoreError::Write {
            collection: "artisan".to_owned(),
            reason: "disk full".to_owned(),
        });
        let msg = err.to_string();
        assert!(msg.contains("disk full"), "Display must include the store reason");
    }

    #[test]
    fn truncate_counts_characters_not_bytes() {
        assert_eq!(truncate("ééééé", 3), "ééé");
        assert_eq!(truncate("short", 80), "short");
    }
}
