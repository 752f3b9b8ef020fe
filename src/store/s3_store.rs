use std::time::Duration;

use async_trait::async_trait;
use aws_sdk_s3::config::http::HttpResponse;
use aws_sdk_s3::config::retry::RetryConfig;
use aws_sdk_s3::config::timeout::TimeoutConfig;
use aws_sdk_s3::config::Credentials;
use aws_sdk_s3::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};
use aws_sdk_s3::operation::get_object::GetObjectError;
use aws_sdk_s3::Client;
use clap::ValueEnum;
use tracing::debug;

use super::{ObjectStore, StoredObject};
use crate::error::StoreError;

/// Backoff strategy used by the S3 client between attempts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RetryMode {
    /// Exponential backoff with jitter
    Standard,
    /// Standard backoff plus client-side rate limiting
    Adaptive,
}

/// Connection settings for an S3 or S3-compatible service.
#[derive(Debug, Clone)]
pub struct S3Settings {
    /// Custom endpoint (MinIO, R2, GCS interoperability). `None` means AWS.
    pub endpoint: Option<String>,

    /// Region to sign requests for
    pub region: String,

    /// Static access key id and secret; `None` uses the default credential chain
    pub credentials: Option<(String, String)>,

    /// Total attempts per request, including the first
    pub max_attempts: u32,

    /// Backoff strategy between attempts
    pub retry_mode: RetryMode,

    /// Upper bound for one operation, retries included
    pub timeout: Duration,
}

impl S3Settings {
    fn retry_config(&self) -> RetryConfig {
        let base = match self.retry_mode {
            RetryMode::Standard => RetryConfig::standard(),
            RetryMode::Adaptive => RetryConfig::adaptive(),
        };
        base.with_max_attempts(self.max_attempts.max(1))
    }
}

/// Create an S3 client from the given settings.
///
/// A custom endpoint switches the client to path-style addressing, which
/// S3-compatible services generally require.
pub async fn create_s3_client(settings: &S3Settings) -> Client {
    let region = aws_config::Region::new(settings.region.clone());
    let mut config_loader = aws_config::defaults(aws_config::BehaviorVersion::latest())
        .region(region)
        .retry_config(settings.retry_config())
        .timeout_config(
            TimeoutConfig::builder()
                .operation_timeout(settings.timeout)
                .build(),
        );

    if let Some(ref endpoint) = settings.endpoint {
        config_loader = config_loader.endpoint_url(endpoint);
    }

    if let Some((ref access_key_id, ref secret_access_key)) = settings.credentials {
        config_loader = config_loader.credentials_provider(Credentials::new(
            access_key_id,
            secret_access_key,
            None,
            None,
            "tenant-gateway",
        ));
    }

    let sdk_config = config_loader.load().await;

    let s3_config = if settings.endpoint.is_some() {
        aws_sdk_s3::config::Builder::from(&sdk_config)
            .force_path_style(true)
            .build()
    } else {
        aws_sdk_s3::config::Builder::from(&sdk_config).build()
    };

    Client::from_conf(s3_config)
}

/// S3-backed implementation of [`ObjectStore`].
///
/// Each lookup is a single `GetObject` call; retries happen inside the SDK
/// according to the client's retry configuration.
#[derive(Clone)]
pub struct S3ObjectStore {
    client: Client,
    bucket: String,
    identifier: String,
}

impl S3ObjectStore {
    /// Create a store reading from `bucket` with the given client.
    pub fn new(client: Client, bucket: impl Into<String>) -> Self {
        let bucket = bucket.into();
        let identifier = format!("s3://{}", bucket);
        Self {
            client,
            bucket,
            identifier,
        }
    }

    /// Get the bucket name.
    pub fn bucket(&self) -> &str {
        &self.bucket
    }
}

#[async_trait]
impl ObjectStore for S3ObjectStore {
    async fn get(&self, key: &str) -> Result<StoredObject, StoreError> {
        let resp = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| classify_get_error(&self.bucket, key, e))?;

        let content_type = resp.content_type().map(str::to_string);

        let data = resp
            .body
            .collect()
            .await
            .map_err(|e| StoreError::Connection(e.to_string()))?
            .into_bytes();

        debug!(
            bucket = %self.bucket,
            key,
            bytes = data.len(),
            "Fetched object"
        );

        Ok(StoredObject { data, content_type })
    }

    fn identifier(&self) -> &str {
        &self.identifier
    }
}

/// Map a `GetObject` failure onto the store error taxonomy.
fn classify_get_error(
    bucket: &str,
    key: &str,
    e: SdkError<GetObjectError, HttpResponse>,
) -> StoreError {
    let no_such_key = e
        .as_service_error()
        .map(|se| se.is_no_such_key())
        .unwrap_or(false);

    // A missing bucket is a configuration fault, not a missing object
    let no_such_bucket = e
        .as_service_error()
        .and_then(|se| se.code())
        .map(|code| code == "NoSuchBucket")
        .unwrap_or(false);

    // Some S3-compatible services answer a missing key with a bare 404
    let status_is_404 = e
        .raw_response()
        .map(|r| r.status().as_u16() == 404)
        .unwrap_or(false);

    if no_such_key || (status_is_404 && !no_such_bucket) {
        return StoreError::NotFound(format!("s3://{}/{}", bucket, key));
    }

    let message = DisplayErrorContext(&e).to_string();
    match e {
        SdkError::TimeoutError(_) | SdkError::DispatchFailure(_) => {
            StoreError::Connection(message)
        }
        _ => StoreError::Backend(message),
    }
}
