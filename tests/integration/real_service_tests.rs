//! S3 backend tests against a real MinIO instance.
//!
//! # Requirements
//!
//! A MinIO server on `localhost:9000` with the default `minioadmin`
//! credentials, e.g.:
//!
//! ```bash
//! docker run -p 9000:9000 minio/minio server /data
//! ```
//!
//! # Running the tests
//!
//! ```bash
//! cargo test --test integration real_service -- --ignored
//! ```
//!
//! These tests are marked as `#[ignore]` by default because they require an
//! external service.

use std::time::Duration;

use aws_sdk_s3::primitives::ByteStream;
use axum::http::StatusCode;
use tower::ServiceExt;

use tenant_gateway::error::StoreError;
use tenant_gateway::store::{
    create_s3_client, GatewayStore, ObjectStore, RetryMode, S3ObjectStore, S3Settings,
};
use tenant_gateway::{create_router, RouterConfig};

use super::test_utils::{body_string, content_type, get_with_host};

const MINIO_ENDPOINT: &str = "http://localhost:9000";
const MINIO_BUCKET: &str = "tenant-gateway-test";
const MINIO_ACCESS_KEY: &str = "minioadmin";
const MINIO_SECRET_KEY: &str = "minioadmin";

/// Skip a test with a message when a prerequisite is missing.
macro_rules! skip_if {
    ($cond:expr, $msg:expr) => {
        if $cond {
            eprintln!("SKIPPED: {}", $msg);
            return;
        }
    };
}

fn minio_settings() -> S3Settings {
    S3Settings {
        endpoint: Some(MINIO_ENDPOINT.to_string()),
        region: "us-east-1".to_string(),
        credentials: Some((MINIO_ACCESS_KEY.to_string(), MINIO_SECRET_KEY.to_string())),
        max_attempts: 2,
        retry_mode: RetryMode::Standard,
        timeout: Duration::from_secs(10),
    }
}

/// Check if the MinIO service is reachable
async fn is_minio_available() -> bool {
    let client = match reqwest::Client::builder()
        .timeout(Duration::from_secs(2))
        .build()
    {
        Ok(c) => c,
        Err(_) => return false,
    };

    client
        .get(format!("{}/minio/health/live", MINIO_ENDPOINT))
        .send()
        .await
        .map(|r| r.status().is_success())
        .unwrap_or(false)
}

/// Create the test bucket and upload the fixture objects.
async fn seed_bucket(client: &aws_sdk_s3::Client) {
    // Ignore "already exists" errors
    let _ = client.create_bucket().bucket(MINIO_BUCKET).send().await;

    let fixtures: [(&str, &[u8], Option<&str>); 3] = [
        ("foo/index.html", b"<h1>foo on minio</h1>", Some("text/html")),
        ("foo/css/site.css", b"body{}", Some("text/css")),
        ("foo/data.bin", b"\x00\x01\x02", None),
    ];

    for (key, data, content_type) in fixtures {
        let mut request = client
            .put_object()
            .bucket(MINIO_BUCKET)
            .key(key)
            .body(ByteStream::from(data.to_vec()));
        if let Some(ct) = content_type {
            request = request.content_type(ct);
        }
        request.send().await.expect("Failed to upload fixture");
    }
}

async fn seeded_store() -> S3ObjectStore {
    let client = create_s3_client(&minio_settings()).await;
    seed_bucket(&client).await;
    S3ObjectStore::new(client, MINIO_BUCKET)
}

#[tokio::test]
#[ignore]
async fn test_minio_get_object() {
    skip_if!(!is_minio_available().await, "MinIO is not available");
    let store = seeded_store().await;

    let object = store.get("foo/css/site.css").await.unwrap();
    assert_eq!(&object.data[..], b"body{}");
    assert_eq!(object.content_type.as_deref(), Some("text/css"));
}

#[tokio::test]
#[ignore]
async fn test_minio_missing_key() {
    skip_if!(!is_minio_available().await, "MinIO is not available");
    let store = seeded_store().await;

    let err = store.get("foo/does-not-exist.html").await.unwrap_err();
    assert!(err.is_not_found(), "unexpected error: {}", err);
}

#[tokio::test]
#[ignore]
async fn test_minio_missing_bucket_is_backend_error() {
    skip_if!(!is_minio_available().await, "MinIO is not available");
    let client = create_s3_client(&minio_settings()).await;
    let store = S3ObjectStore::new(client, "no-such-bucket-for-tenant-gateway");

    let err = store.get("foo/index.html").await.unwrap_err();
    // NoSuchBucket comes back with a 404 status but is not a missing object
    assert!(matches!(err, StoreError::Backend(_)), "unexpected error: {}", err);
}

#[tokio::test]
#[ignore]
async fn test_minio_gateway_end_to_end() {
    skip_if!(!is_minio_available().await, "MinIO is not available");
    let store: GatewayStore = seeded_store().await.into();
    let router = create_router(store, RouterConfig::new());

    let response = router
        .clone()
        .oneshot(get_with_host("foo.localhost:8000", "/"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(content_type(&response), "text/html");
    assert_eq!(body_string(response).await, "<h1>foo on minio</h1>");

    let response = router
        .oneshot(get_with_host("foo.localhost:8000", "/data.bin"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    // MinIO records binary/octet-stream or application/octet-stream when none is given
    assert!(content_type(&response).ends_with("octet-stream"));
}
