//! Object storage layer.
//!
//! The gateway reads tenant content through the [`ObjectStore`] trait. Two
//! backends implement it and are chosen at startup:
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │                ContentRouter                 │
//! └──────────────────────┬───────────────────────┘
//!                        │ get(key)
//!                        ▼
//! ┌──────────────────────────────────────────────┐
//! │        GatewayStore (backend dispatch)       │
//! └───────────┬─────────────────────┬────────────┘
//!             ▼                     ▼
//! ┌─────────────────────┐ ┌──────────────────────┐
//! │   S3ObjectStore     │ │   HttpObjectStore    │
//! │ (AWS / compatible)  │ │ (public HTTP bucket) │
//! └─────────────────────┘ └──────────────────────┘
//! ```

mod http_store;
mod s3_store;

use async_trait::async_trait;
use bytes::Bytes;

use crate::error::StoreError;

pub use http_store::HttpObjectStore;
pub use s3_store::{create_s3_client, RetryMode, S3ObjectStore, S3Settings};

/// An object fetched from the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredObject {
    /// Object payload
    pub data: Bytes,

    /// Content type recorded by the store, if any
    pub content_type: Option<String>,
}

impl StoredObject {
    /// Create a stored object with the given payload and content type.
    pub fn new(data: impl Into<Bytes>, content_type: Option<String>) -> Self {
        Self {
            data: data.into(),
            content_type,
        }
    }
}

/// Read-only, key-addressed object storage.
///
/// A lookup has exactly three outcomes: the object, [`StoreError::NotFound`],
/// or another [`StoreError`] for backend failures. Implementations must return
/// or fail in bounded time; the caller applies no timeout of its own.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Fetch the object stored under `key`.
    async fn get(&self, key: &str) -> Result<StoredObject, StoreError>;

    /// A human readable name for this store (for logging).
    fn identifier(&self) -> &str;
}

/// The backend selected by configuration.
#[derive(Clone)]
pub enum GatewayStore {
    S3(S3ObjectStore),
    Http(HttpObjectStore),
}

#[async_trait]
impl ObjectStore for GatewayStore {
    async fn get(&self, key: &str) -> Result<StoredObject, StoreError> {
        match self {
            GatewayStore::S3(store) => store.get(key).await,
            GatewayStore::Http(store) => store.get(key).await,
        }
    }

    fn identifier(&self) -> &str {
        match self {
            GatewayStore::S3(store) => store.identifier(),
            GatewayStore::Http(store) => store.identifier(),
        }
    }
}

impl From<S3ObjectStore> for GatewayStore {
    fn from(store: S3ObjectStore) -> Self {
        GatewayStore::S3(store)
    }
}

impl From<HttpObjectStore> for GatewayStore {
    fn from(store: HttpObjectStore) -> Self {
        GatewayStore::Http(store)
    }
}
