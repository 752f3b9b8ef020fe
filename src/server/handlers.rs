//! HTTP request handlers for the tenant gateway.
//!
//! # Endpoints
//!
//! - `GET /` - Serve the tenant's default document
//! - `GET /{*path}` - Serve a tenant object

use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use tracing::{debug, error, warn};

use super::extract::{ObjectPath, ResolvedTenant};
use crate::content::{ContentRouter, ObjectResponse};
use crate::error::ServeError;
use crate::store::ObjectStore;

// =============================================================================
// Application State
// =============================================================================

/// Shared application state containing the content router.
///
/// This is passed to all handlers via Axum's State extractor.
pub struct AppState<S: ObjectStore> {
    /// Router resolving tenant requests against the object store
    pub content: Arc<ContentRouter<S>>,
}

impl<S: ObjectStore> AppState<S> {
    /// Create a new application state around the given store.
    pub fn new(store: S) -> Self {
        Self {
            content: Arc::new(ContentRouter::new(store)),
        }
    }
}

impl<S: ObjectStore> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            content: Arc::clone(&self.content),
        }
    }
}

// =============================================================================
// Error Mapping
// =============================================================================

/// Plain-text body for a missing tenant.
pub const MISSING_TENANT_MESSAGE: &str = "Missing subdomain";

/// Plain-text body for a missing object.
pub const NOT_FOUND_MESSAGE: &str = "File not found";

/// Plain-text body for a storage failure. Backend details are never included.
pub const UPSTREAM_MESSAGE: &str = "Bad gateway";

impl ServeError {
    /// HTTP status for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            ServeError::MissingTenant => StatusCode::BAD_REQUEST,
            ServeError::NotFound { .. } => StatusCode::NOT_FOUND,
            ServeError::Upstream { .. } => StatusCode::BAD_GATEWAY,
        }
    }
}

/// Convert ServeError to a plain-text HTTP response.
///
/// - 400 is logged at WARN level
/// - 404 is logged at DEBUG level (common and expected)
/// - 502 is logged at ERROR level with the backend cause
impl IntoResponse for ServeError {
    fn into_response(self) -> Response {
        let status = self.status();

        let message = match &self {
            ServeError::MissingTenant => {
                warn!(status = status.as_u16(), "Client error: {}", self);
                MISSING_TENANT_MESSAGE
            }
            ServeError::NotFound { key } => {
                debug!(status = status.as_u16(), key = %key, "Object not found");
                NOT_FOUND_MESSAGE
            }
            ServeError::Upstream { key, source } => {
                error!(
                    status = status.as_u16(),
                    key = %key,
                    "Storage backend error: {}",
                    source
                );
                UPSTREAM_MESSAGE
            }
        };

        (status, message).into_response()
    }
}

impl IntoResponse for ObjectResponse {
    fn into_response(self) -> Response {
        let mut response = Response::new(Body::from(self.data));
        *response.status_mut() = StatusCode::OK;

        match header::HeaderValue::from_str(&self.content_type) {
            Ok(value) => {
                response.headers_mut().insert(header::CONTENT_TYPE, value);
            }
            Err(_) => {
                warn!(
                    key = %self.key,
                    content_type = %self.content_type,
                    "Stored content type is not a valid header value"
                );
                response.headers_mut().insert(
                    header::CONTENT_TYPE,
                    header::HeaderValue::from_static(crate::content::DEFAULT_CONTENT_TYPE),
                );
            }
        }

        response
    }
}

// =============================================================================
// Handlers
// =============================================================================

/// Serve the tenant's default document.
///
/// # Endpoint
///
/// `GET /`
///
/// # Response
///
/// - `200 OK`: the tenant's `index.html`
/// - `400 Bad Request`: the host names no tenant
/// - `404 Not Found`: the tenant has no `index.html`
/// - `502 Bad Gateway`: storage failure
pub async fn root_handler<S: ObjectStore>(
    State(state): State<AppState<S>>,
    tenant: ResolvedTenant,
) -> Result<ObjectResponse, ServeError> {
    state.content.serve(tenant.tenant(), "").await
}

/// Serve a tenant object.
///
/// # Endpoint
///
/// `GET /{*path}`
///
/// The path is percent-decoded (invalid UTF-8 replaced, never rejected) and
/// looked up as `{tenant}/{path}`.
///
/// # Response
///
/// - `200 OK`: object bytes with the stored `Content-Type`, or
///   `application/octet-stream` when none is recorded
/// - `400 Bad Request`: the host names no tenant
/// - `404 Not Found`: no such object
/// - `502 Bad Gateway`: storage failure
pub async fn object_handler<S: ObjectStore>(
    State(state): State<AppState<S>>,
    tenant: ResolvedTenant,
    path: ObjectPath,
) -> Result<ObjectResponse, ServeError> {
    state.content.serve(tenant.tenant(), path.as_str()).await
}

// =============================================================================
// Tests
// =============================================================================
