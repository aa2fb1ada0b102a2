//! Record endpoints: `POST /sync`, `GET /sync/:code`, `PUT /sync/:code`.

use crate::error::RelayError;
use crate::server::SyncRelay;
use axum::body::Bytes;
use axum::extract::rejection::{BytesRejection, PathRejection};
use axum::extract::Path;
use axum::http::header::CONTENT_TYPE;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::{Extension, Json};
use std::sync::Arc;
use sync_types::SyncAck;

/// Create a record from the request body.
pub async fn create_handler(
    Extension(relay): Extension<Arc<SyncRelay>>,
    body: Result<Bytes, BytesRejection>,
) -> Result<(StatusCode, Json<SyncAck>), RelayError> {
    let body = read_body(body)?;
    let sync_code = relay.create_record(&body).await?;
    Ok((StatusCode::CREATED, Json(SyncAck::created(sync_code))))
}

/// Return the stored record exactly as persisted.
pub async fn fetch_handler(
    Extension(relay): Extension<Arc<SyncRelay>>,
    code: Result<Path<String>, PathRejection>,
) -> Result<Response, RelayError> {
    let code = read_code(code)?;
    fetch(&relay, &code).await
}

/// `GET /sync/`: an empty code, rejected as malformed.
pub async fn fetch_blank_handler(
    Extension(relay): Extension<Arc<SyncRelay>>,
) -> Result<Response, RelayError> {
    fetch(&relay, "").await
}

/// Replace the record stored under the code.
pub async fn replace_handler(
    Extension(relay): Extension<Arc<SyncRelay>>,
    code: Result<Path<String>, PathRejection>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<SyncAck>, RelayError> {
    let code = read_code(code)?;
    let body = read_body(body)?;
    replace(&relay, &code, &body).await
}

/// `PUT /sync/`: an empty code, rejected as malformed.
pub async fn replace_blank_handler(
    Extension(relay): Extension<Arc<SyncRelay>>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<SyncAck>, RelayError> {
    let body = read_body(body)?;
    replace(&relay, "", &body).await
}

async fn fetch(relay: &SyncRelay, code: &str) -> Result<Response, RelayError> {
    let text = relay.fetch_record(code).await?;
    Ok(([(CONTENT_TYPE, "application/json")], text).into_response())
}

async fn replace(relay: &SyncRelay, code: &str, body: &[u8]) -> Result<Json<SyncAck>, RelayError> {
    let sync_code = relay.replace_record(code, body).await?;
    Ok(Json(SyncAck::updated(sync_code)))
}

/// A path segment that cannot be decoded is a malformed code.
fn read_code(code: Result<Path<String>, PathRejection>) -> Result<String, RelayError> {
    code.map(|Path(code)| code)
        .map_err(|rejection| RelayError::UnreadableCode(rejection.body_text()))
}

/// Turn extractor rejections into relay errors so they render as `{error}`.
fn read_body(body: Result<Bytes, BytesRejection>) -> Result<Bytes, RelayError> {
    body.map_err(|rejection| {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            RelayError::BodyTooLarge
        } else {
            RelayError::BodyUnreadable(rejection.body_text())
        }
    })
}
