use std::fmt;

use crate::tenant::TenantId;

/// Document served when the request path is empty.
pub const DEFAULT_DOCUMENT: &str = "index.html";

/// The key addressing one tenant object in the shared bucket.
///
/// Always `"{tenant}/{path}"`, with [`DEFAULT_DOCUMENT`] standing in for an
/// empty path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StorageKey(String);

impl StorageKey {
    /// Build the key for `tenant` and a request path (without leading `/`).
    pub fn new(tenant: &TenantId, path: &str) -> Self {
        let path = if path.is_empty() {
            DEFAULT_DOCUMENT
        } else {
            path
        };
        Self(format!("{}/{}", tenant, path))
    }

    /// The key as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StorageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for StorageKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
