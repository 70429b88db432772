//! Axum route handlers for the artisan directory API.

use artisan_core::{Artisan, ArtisanQuery, Collection, DocumentId, Event, Registration, TrackedEvent};
use artisan_store::{insert, list, set_datetime, to_document, Filter, Record, StoreError};
use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        DefaultBodyLimit, Query, State,
    },
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;
use serde::Serialize;
use serde_json::Value;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{debug, info, warn};

use crate::{
    error::{truncate, GatewayError},
    forward::ForwardStatus,
    state::AppState,
};

/// Most collection names reported by the diagnostic probe.
const MAX_LISTED_COLLECTIONS: usize = 10;

/// Longest store error shown by the diagnostic probe.
const MAX_DIAGNOSTIC_DETAIL: usize = 80;

/// Largest accepted request body. Registrations carry two base64 images.
pub const MAX_BODY_BYTES: usize = 16 * 1024 * 1024;

// ── Request / response types ──────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

#[derive(Debug, Serialize)]
pub struct OkResponse {
    pub ok: bool,
}

#[derive(Debug, Serialize)]
pub struct CreatedResponse {
    pub ok: bool,
    pub id: DocumentId,
}

/// Result of `POST /api/register`.
#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub ok: bool,
    pub id: DocumentId,
    /// Whether the webhook accepted the relayed registration.
    pub forwarded: bool,
    /// Webhook status code, transport error text, or `null` if not attempted.
    pub forward_status: Option<ForwardStatus>,
}

/// Result of `GET /test`. Reports presence of settings, never their values.
#[derive(Debug, Serialize)]
pub struct Diagnostics {
    pub backend: &'static str,
    pub database: String,
    pub database_url: &'static str,
    pub database_name: &'static str,
    pub webhook_url: &'static str,
    pub store_name: Option<String>,
    pub connection_status: &'static str,
    pub collections: Vec<String>,
}

// ── Router ────────────────────────────────────────────────────────────────────

/// Build the application router over `state`.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/api/hello", get(hello))
        .route("/test", get(diagnostics))
        .route("/api/artisans", post(create_artisan).get(list_artisans))
        .route("/api/register", post(register))
        .route("/api/event", post(track_event))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

// ── Handlers ──────────────────────────────────────────────────────────────────

/// `GET /` — liveness probe.
pub async fn root() -> Json<MessageResponse> {
    Json(MessageResponse { message: "Backend running" })
}

/// `GET /api/hello`
pub async fn hello() -> Json<MessageResponse> {
    Json(MessageResponse { message: "Hello from the backend API!" })
}

/// `GET /test` — report store connectivity and which settings are present.
///
/// Never fails: store errors are folded into the `database` status string.
pub async fn diagnostics(State(state): State<AppState>) -> Json<Diagnostics> {
    let config = state.config();
    let mut report = Diagnostics {
        backend: "✅ Running",
        database: "❌ Not Available".to_owned(),
        database_url: presence(config.database_url.as_ref()),
        database_name: presence(config.database_name.as_ref()),
        webhook_url: presence(config.forward_url.as_ref()),
        store_name: None,
        connection_status: "Not Connected",
        collections: Vec::new(),
    };

    if let Ok(store) = state.store() {
        report.store_name = Some(store.name().to_owned());
        report.connection_status = "Connected";
        match store.collection_names().await {
            Ok(mut names) => {
                names.truncate(MAX_LISTED_COLLECTIONS);
                report.collections = names;
                report.database = "✅ Connected & Working".to_owned();
            }
            Err(e) => {
                warn!(error = %e, "diagnostic collection listing failed");
                report.database = format!(
                    "⚠️  Connected but Error: {}",
                    truncate(&e.to_string(), MAX_DIAGNOSTIC_DETAIL)
                );
            }
        }
    }
    Json(report)
}

/// `POST /api/artisans` — validate and store a new artisan.
///
/// # Errors
/// Returns [`GatewayError::Validation`] for an invalid payload, or
/// [`GatewayError::Store`] if the insert fails.
pub async fn create_artisan(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<CreatedResponse>, GatewayError> {
    let artisan = Artisan::from_json(&json_body(payload)?)?;
    let id = insert(state.store()?, &artisan).await?;
    info!(%id, craft_type = %artisan.craft_type, "artisan created");
    Ok(Json(CreatedResponse { ok: true, id }))
}

/// `GET /api/artisans` — list artisans by craft type, region and featured flag.
///
/// # Errors
/// Returns [`GatewayError::InvalidRequest`] for an unparsable query,
/// [`GatewayError::Validation`] for an out-of-range limit, or
/// [`GatewayError::Store`] if the query fails.
pub async fn list_artisans(
    State(state): State<AppState>,
    query: Result<Query<ArtisanQuery>, QueryRejection>,
) -> Result<Json<Vec<Record<Artisan>>>, GatewayError> {
    let Query(query) = query.map_err(|e| GatewayError::InvalidRequest(e.body_text()))?;
    let filter = query.validate()?;
    let store_filter = Filter::new()
        .with_opt("craft_type", filter.craft_type)
        .with_opt("region", filter.region)
        .with_opt("featured", filter.featured);
    let records = list::<Artisan>(state.store()?, &store_filter, filter.limit).await?;
    debug!(count = records.len(), "artisans listed");
    Ok(Json(records))
}

/// `POST /api/register` — store a registration, then relay it to the webhook.
///
/// The webhook outcome is reported in the response and never fails the
/// request once the registration is stored.
///
/// # Errors
/// Returns [`GatewayError::Validation`] for an invalid payload, or
/// [`GatewayError::Store`] if the insert fails.
pub async fn register(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<RegisterResponse>, GatewayError> {
    let registration = Registration::from_json(&json_body(payload)?)?;
    let id = insert(state.store()?, &registration).await?;
    info!(%id, consent = registration.consent, "registration stored");

    let outcome = state.forwarder().forward(&registration, &id).await;
    Ok(Json(RegisterResponse {
        ok: true,
        id,
        forwarded: outcome.forwarded(),
        forward_status: outcome.status(),
    }))
}

/// `POST /api/event` — record an analytics event.
///
/// Persistence failures are logged and dropped; a valid event always gets
/// `{"ok": true}`.
///
/// # Errors
/// Returns [`GatewayError::Validation`] only for an invalid payload.
pub async fn track_event(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<OkResponse>, GatewayError> {
    let record = Event::from_json(&json_body(payload)?)?.into_record(Utc::now());
    match persist_event(&state, &record).await {
        Ok(id) => debug!(%id, event = %record.name, "event recorded"),
        Err(e) => warn!(event = %record.name, error = %e, "event dropped"),
    }
    Ok(Json(OkResponse { ok: true }))
}

// ── Helpers ───────────────────────────────────────────────────────────────────

async fn persist_event(state: &AppState, record: &TrackedEvent) -> Result<DocumentId, StoreError> {
    let store = state.store()?;
    let mut doc = to_document(record)?;
    set_datetime(&mut doc, "ts", record.ts);
    store.create_document(TrackedEvent::NAME, &doc).await
}

fn json_body(payload: Result<Json<Value>, JsonRejection>) -> Result<Value, GatewayError> {
    payload.map(|Json(value)| value).map_err(|e| {
        if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
            GatewayError::PayloadTooLarge(e.body_text())
        } else {
            GatewayError::InvalidRequest(e.body_text())
        }
    })
}

fn presence<T>(value: Option<&T>) -> &'static str {
    if value.is_some() {
        "✅ Set"
    } else {
        "❌ Not Set"
    }
}
