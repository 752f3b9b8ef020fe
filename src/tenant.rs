//! Tenant resolution from the request host.
//!
//! A tenant is the leftmost label of the host name:
//!
//! ```text
//! foo.localhost:8000   -> Some("foo")    (development)
//! foo.example.com      -> Some("foo")    (production)
//! a.b.c.example.com    -> Some("a")      (deeper nesting is not distinguished)
//! example.com          -> None           (a bare domain is never a tenant)
//! localhost            -> None
//! ```
//!
//! The remaining labels are not checked against an allow-list, so any
//! request can address any tenant prefix by forging its `Host` header.

use std::fmt;

/// Second label that marks a two-label development host (`foo.localhost`).
pub const DEV_DOMAIN: &str = "localhost";

/// A non-empty tenant identifier taken from the leftmost host label.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TenantId(String);

impl TenantId {
    /// Create a tenant identifier, returning `None` for an empty string.
    pub fn new(id: impl Into<String>) -> Option<Self> {
        let id = id.into();
        if id.is_empty() {
            None
        } else {
            Some(Self(id))
        }
    }

    /// The identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TenantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for TenantId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Strip a trailing `:<port>` from a host header value.
///
/// Everything after the first `:` is dropped.
pub fn strip_port(host: &str) -> &str {
    host.split(':').next().unwrap_or("")
}

/// Resolve the tenant for a host header value.
///
/// Total over any input: a host that names no tenant yields `None`.
pub fn resolve_tenant(host: &str) -> Option<TenantId> {
    let host = strip_port(host);
    let labels: Vec<&str> = host.split('.').collect();

    match labels.as_slice() {
        [tenant, domain] if *domain == DEV_DOMAIN => TenantId::new(*tenant),
        [tenant, _, _, ..] => TenantId::new(*tenant),
        _ => None,
    }
}
