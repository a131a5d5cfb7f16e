use axum::{
    Json,
    body::Bytes,
    extract::{State, rejection::BytesRejection},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::{DateTime, Utc};
use serde_json::Value;
use tracing::{debug, error, info};

use inbox_types::Message;
use inbox_types::api::{CreateMessageResponse, MessageListResponse};
use inbox_types::models::{newest_first, stored_precision};

use crate::AppState;
use crate::error::ApiError;
use crate::validation::validate;

/// GET /api/messages — whole collection, newest first.
pub async fn list_messages(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    // Blocking file I/O stays off the async runtime
    let db = state.clone();
    let items = tokio::task::spawn_blocking(move || db.store.load())
        .await
        .map_err(|e| {
            error!("spawn_blocking join error: {}", e);
            ApiError::Internal
        })?
        .map_err(|e| {
            error!("Failed to load messages: {}", e);
            ApiError::Internal
        })?;

    Ok(Json(MessageListResponse {
        items: newest_first(items),
    }))
}

/// POST /api/messages — validate `{ name, email, message }` and append it.
///
/// The body is taken as raw bytes: a missing, non-JSON or non-object body
/// is not an extractor rejection but simply a submission with no fields, and
/// fails validation on `name` like any other. Only a body that cannot be
/// read at all (over the size limit, broken stream) is rejected up front.
pub async fn create_message(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let body = body.map_err(|rejection| {
        debug!("Unreadable request body: {}", rejection);
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            ApiError::PayloadTooLarge
        } else {
            ApiError::UnreadableBody
        }
    })?;
    let payload: Value = serde_json::from_slice(&body).unwrap_or(Value::Null);
    let new = validate(&payload).inspect_err(|e| debug!("Rejected submission: {}", e))?;

    let db = state.clone();
    let item = tokio::task::spawn_blocking(move || {
        db.store
            .append_with(|existing| new.into_message(creation_time(existing)))
    })
    .await
    .map_err(|e| {
        error!("spawn_blocking join error: {}", e);
        ApiError::Internal
    })?
    .map_err(|e| {
        error!("Failed to save message: {}", e);
        ApiError::Internal
    })?;

    info!("Message {} created", item.id);

    Ok((
        StatusCode::CREATED,
        Json(CreateMessageResponse { ok: true, item }),
    ))
}

/// Now, at the millisecond precision timestamps are stored with, but never
/// earlier than the newest entry already in the collection.
fn creation_time(existing: &[Message]) -> DateTime<Utc> {
    let now = stored_precision(Utc::now());
    existing
        .iter()
        .map(|m| m.created_at)
        .max()
        .map_or(now, |latest| now.max(latest))
}
