use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, StatusCode};
use tracing::debug;

use super::{ObjectStore, StoredObject};
use crate::error::StoreError;

/// Public-bucket implementation of [`ObjectStore`] over plain HTTP(S).
///
/// Objects are read anonymously from `{endpoint}/{bucket}/{key}`, which is how
/// public buckets are exposed by Google Cloud Storage
/// (`https://storage.googleapis.com`) and most S3-compatible services. No
/// retries are attempted; every request is bounded by the client timeout.
#[derive(Clone)]
pub struct HttpObjectStore {
    client: Client,
    base_url: String,
    identifier: String,
}

impl HttpObjectStore {
    /// Create a store for `bucket` served under `endpoint`.
    pub fn new(
        endpoint: &str,
        bucket: &str,
        timeout: Duration,
    ) -> Result<Self, StoreError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| StoreError::Backend(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self::with_client(client, endpoint, bucket))
    }

    /// Create a store using an existing HTTP client.
    pub fn with_client(client: Client, endpoint: &str, bucket: &str) -> Self {
        let base_url = format!(
            "{}/{}",
            endpoint.trim_end_matches('/'),
            urlencoding::encode(bucket)
        );
        Self {
            client,
            identifier: base_url.clone(),
            base_url,
        }
    }

    /// Build the object URL for `key`, percent-encoding each path segment.
    pub fn object_url(&self, key: &str) -> String {
        let encoded: Vec<_> = key.split('/').map(urlencoding::encode).collect();
        format!("{}/{}", self.base_url, encoded.join("/"))
    }
}

#[async_trait]
impl ObjectStore for HttpObjectStore {
    async fn get(&self, key: &str) -> Result<StoredObject, StoreError> {
        let url = self.object_url(key);

        let resp = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| StoreError::Connection(format!("GET {}: {}", url, e)))?;

        let status = resp.status();
        if status == StatusCode::NOT_FOUND {
            return Err(StoreError::NotFound(url));
        }
        if !status.is_success() {
            return Err(StoreError::Backend(format!(
                "GET {} returned {}",
                url, status
            )));
        }

        let content_type = resp
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        let data = resp
            .bytes()
            .await
            .map_err(|e| StoreError::Connection(format!("GET {}: {}", url, e)))?;

        debug!(url = %url, bytes = data.len(), "Fetched object");

        Ok(StoredObject { data, content_type })
    }

    fn identifier(&self) -> &str {
        &self.identifier
    }
}
