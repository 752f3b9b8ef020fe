//! Request extractors yielding the tenant and object path for a request.

use std::convert::Infallible;

use axum::extract::FromRequestParts;
use http::header::HOST;
use http::request::Parts;
use tracing::debug;

use crate::tenant::{resolve_tenant, TenantId};

/// The tenant resolved from the request host, or `None`.
///
/// The host is read from the `Host` header, falling back to the URI
/// authority (HTTP/2 `:authority`). A missing or non-UTF-8 host resolves to
/// no tenant. Extraction never fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedTenant(pub Option<TenantId>);

impl ResolvedTenant {
    /// Borrow the tenant, if any.
    pub fn tenant(&self) -> Option<&TenantId> {
        self.0.as_ref()
    }
}

/// Extract the raw host value for a request.
pub fn request_host(parts: &Parts) -> &str {
    parts
        .headers
        .get(HOST)
        .and_then(|v| v.to_str().ok())
        .or_else(|| parts.uri.authority().map(|a| a.as_str()))
        .unwrap_or("")
}

impl<S> FromRequestParts<S> for ResolvedTenant
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let host = request_host(parts);
        let tenant = resolve_tenant(host);

        debug!(host, tenant = ?tenant.as_ref().map(TenantId::as_str), "Resolved tenant");

        Ok(ResolvedTenant(tenant))
    }
}

/// The request path with the leading `/` removed, percent-decoded.
///
/// Bytes that do not form valid UTF-8 after decoding are replaced with
/// U+FFFD, so every path reaches the store lookup. Extraction never fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectPath(pub String);

impl ObjectPath {
    /// Decode a raw URI path.
    pub fn decode(raw: &str) -> Self {
        let raw = raw.strip_prefix('/').unwrap_or(raw);
        let bytes = urlencoding::decode_binary(raw.as_bytes());
        ObjectPath(String::from_utf8_lossy(&bytes).into_owned())
    }

    /// The decoded path.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl<S> FromRequestParts<S> for ObjectPath
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(ObjectPath::decode(parts.uri.path()))
    }
}
