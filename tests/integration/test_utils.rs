//! Test utilities for integration tests.
//!
//! Provides a mock object store that records every lookup, plus helpers for
//! building requests and reading response bodies.

use async_trait::async_trait;
use axum::body::Body;
use axum::http::Request;
use axum::response::Response;
use bytes::Bytes;
use http_body_util::BodyExt;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use tenant_gateway::error::StoreError;
use tenant_gateway::store::{ObjectStore, StoredObject};

// =============================================================================
// Mock Object Store with Request Tracking
// =============================================================================

/// A mock object store serving pre-configured objects.
///
/// Keys registered with [`MockObjectStore::with_failure`] fail with a backend
/// error; unknown keys are reported as not found. Clones share counters.
#[derive(Clone)]
pub struct MockObjectStore {
    objects: Arc<HashMap<String, StoredObject>>,
    failures: Arc<HashMap<String, StoreError>>,
    request_count: Arc<AtomicUsize>,
    requested_keys: Arc<RwLock<Vec<String>>>,
}

impl MockObjectStore {
    pub fn new() -> Self {
        Self {
            objects: Arc::new(HashMap::new()),
            failures: Arc::new(HashMap::new()),
            request_count: Arc::new(AtomicUsize::new(0)),
            requested_keys: Arc::new(RwLock::new(Vec::new())),
        }
    }

    pub fn with_object(
        mut self,
        key: impl Into<String>,
        data: impl Into<Bytes>,
        content_type: Option<&str>,
    ) -> Self {
        Arc::make_mut(&mut self.objects).insert(
            key.into(),
            StoredObject::new(data, content_type.map(str::to_string)),
        );
        self
    }

    pub fn with_failure(mut self, key: impl Into<String>, err: StoreError) -> Self {
        Arc::make_mut(&mut self.failures).insert(key.into(), err);
        self
    }

    pub fn request_count(&self) -> usize {
        self.request_count.load(Ordering::SeqCst)
    }

    pub async fn requested_keys(&self) -> Vec<String> {
        self.requested_keys.read().await.clone()
    }
}

impl Default for MockObjectStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ObjectStore for MockObjectStore {
    async fn get(&self, key: &str) -> Result<StoredObject, StoreError> {
        self.request_count.fetch_add(1, Ordering::SeqCst);
        self.requested_keys.write().await.push(key.to_string());

        if let Some(err) = self.failures.get(key) {
            return Err(err.clone());
        }

        self.objects
            .get(key)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(format!("mock://{}", key)))
    }

    fn identifier(&self) -> &str {
        "mock://bucket"
    }
}

// =============================================================================
// Request / Response Helpers
// =============================================================================

/// Build a GET request for `uri` with the given Host header.
pub fn get_with_host(host: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .header("host", host)
        .body(Body::empty())
        .unwrap()
}

/// Collect a response body into bytes.
pub async fn body_bytes(response: Response) -> Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}

/// Collect a response body into a UTF-8 string.
pub async fn body_string(response: Response) -> String {
    String::from_utf8(body_bytes(response).await.to_vec()).unwrap()
}

/// Read the Content-Type header of a response.
pub fn content_type(response: &Response) -> String {
    response
        .headers()
        .get("content-type")
        .map(|v| v.to_str().unwrap().to_string())
        .unwrap_or_default()
}
