use bytes::Bytes;
use tracing::debug;

use super::key::StorageKey;
use crate::error::ServeError;
use crate::store::ObjectStore;
use crate::tenant::TenantId;

/// Content type used when the store records none.
pub const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// A tenant object ready to be written to the client.
#[derive(Debug, Clone)]
pub struct ObjectResponse {
    /// Key the object was fetched from
    pub key: StorageKey,

    /// Object payload
    pub data: Bytes,

    /// Resolved content type (never empty)
    pub content_type: String,
}

/// Resolves tenant requests to objects in the shared bucket.
///
/// The router is stateless between requests and performs exactly one store
/// lookup per served request. Retries, if any, are the store's business.
pub struct ContentRouter<S: ObjectStore> {
    store: S,
}

impl<S: ObjectStore> ContentRouter<S> {
    /// Create a router reading from the given store.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Get a reference to the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Serve `path` for `tenant`.
    ///
    /// # Errors
    ///
    /// - [`ServeError::MissingTenant`] when no tenant was resolved; the store
    ///   is not touched
    /// - [`ServeError::NotFound`] when the key does not exist
    /// - [`ServeError::Upstream`] for any other store failure
    pub async fn serve(
        &self,
        tenant: Option<&TenantId>,
        path: &str,
    ) -> Result<ObjectResponse, ServeError> {
        let tenant = tenant.ok_or(ServeError::MissingTenant)?;
        let key = StorageKey::new(tenant, path);

        debug!(tenant = %tenant, key = %key, store = self.store.identifier(), "Looking up object");

        let object = self
            .store
            .get(key.as_str())
            .await
            .map_err(|e| ServeError::from_store(key.as_str(), e))?;

        Ok(ObjectResponse {
            content_type: resolve_content_type(object.content_type.as_deref()).to_string(),
            data: object.data,
            key,
        })
    }
}

/// Pick the response content type, falling back to [`DEFAULT_CONTENT_TYPE`]
/// for a missing or blank value.
pub fn resolve_content_type(stored: Option<&str>) -> &str {
    match stored {
        Some(ct) if !ct.trim().is_empty() => ct,
        _ => DEFAULT_CONTENT_TYPE,
    }
}
