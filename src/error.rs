use thiserror::Error;

/// Errors returned by an object store lookup.
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    /// No object exists under the requested key
    #[error("Object not found: {0}")]
    NotFound(String),

    /// The backend rejected or failed the request (permissions, internal fault,
    /// malformed response)
    #[error("Storage backend error: {0}")]
    Backend(String),

    /// Network, timeout or connection error while talking to the backend
    #[error("Connection error: {0}")]
    Connection(String),
}

impl StoreError {
    /// Whether this error means the key is simply absent.
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound(_))
    }
}

/// Errors produced while serving a tenant's content.
///
/// Each variant maps to exactly one HTTP status; see the `IntoResponse`
/// implementation in the server module.
#[derive(Debug, Clone, Error)]
pub enum ServeError {
    /// The request host did not resolve to a tenant (HTTP 400)
    #[error("Missing subdomain")]
    MissingTenant,

    /// The storage key does not exist (HTTP 404)
    #[error("File not found: {key}")]
    NotFound { key: String },

    /// The object store failed (HTTP 502)
    #[error("Upstream storage error for {key}: {source}")]
    Upstream {
        key: String,
        #[source]
        source: StoreError,
    },
}

impl ServeError {
    /// Classify a store error raised while fetching `key`.
    pub fn from_store(key: impl Into<String>, err: StoreError) -> Self {
        let key = key.into();
        if err.is_not_found() {
            ServeError::NotFound { key }
        } else {
            ServeError::Upstream { key, source: err }
        }
    }
}
