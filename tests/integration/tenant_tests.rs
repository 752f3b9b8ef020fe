//! Tenant resolution through the full router.
//!
//! Each case sends a request with a given Host header and checks which key the
//! store was asked for (or that it was not asked at all).

use axum::http::StatusCode;
use tower::ServiceExt;

use tenant_gateway::{create_router, RouterConfig};

use super::test_utils::{get_with_host, MockObjectStore};

/// Send `GET /` with `host` and return the response status and requested keys.
async fn lookup(host: &str) -> (StatusCode, Vec<String>) {
    let store = MockObjectStore::new();
    let router = create_router(store.clone(), RouterConfig::new().with_tracing(false));

    let response = router.oneshot(get_with_host(host, "/")).await.unwrap();
    (response.status(), store.requested_keys().await)
}

#[tokio::test]
async fn test_dev_localhost_hosts() {
    for (host, key) in [
        ("foo.localhost", "foo/index.html"),
        ("foo.localhost:8000", "foo/index.html"),
        ("my-site.localhost:3000", "my-site/index.html"),
    ] {
        let (status, keys) = lookup(host).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "host {}", host);
        assert_eq!(keys, vec![key.to_string()], "host {}", host);
    }
}

#[tokio::test]
async fn test_production_hosts_use_first_label() {
    for (host, key) in [
        ("a.b.com", "a/index.html"),
        ("a.b.c.com", "a/index.html"),
        ("shop.example.com:443", "shop/index.html"),
    ] {
        let (_, keys) = lookup(host).await;
        assert_eq!(keys, vec![key.to_string()], "host {}", host);
    }
}

#[tokio::test]
async fn test_hosts_without_tenant() {
    for host in [
        "example.com",
        "example.com:8080",
        "localhost",
        "localhost:8000",
        "",
    ] {
        let (status, keys) = lookup(host).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "host {:?}", host);
        assert!(keys.is_empty(), "host {:?} should not reach the store", host);
    }
}
