//! # Tenant Gateway
//!
//! A multi-tenant static content gateway. Each request's subdomain names a
//! tenant, and the tenant's files are served from a shared object storage
//! bucket under a `{tenant}/` key prefix.
//!
//! ```text
//! GET http://foo.example.com/css/site.css  ->  s3://bucket/foo/css/site.css
//! GET http://foo.localhost:8000/           ->  s3://bucket/foo/index.html
//! ```
//!
//! ## Architecture
//!
//! - [`tenant`] - Tenant resolution from the `Host` header
//! - [`content`] - Storage key construction and lookup outcome mapping
//! - [`store`] - Object store trait with S3 and public-HTTP backends
//! - [`server`] - Axum-based HTTP server and routes
//! - [`config`] - CLI and configuration types
//!
//! ## Example
//!
//! ```rust,no_run
//! use tenant_gateway::{create_router, create_s3_client, RouterConfig, S3ObjectStore, S3Settings};
//! use tenant_gateway::store::RetryMode;
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() {
//!     let settings = S3Settings {
//!         endpoint: None,
//!         region: "us-east-1".to_string(),
//!         credentials: None,
//!         max_attempts: 3,
//!         retry_mode: RetryMode::Standard,
//!         timeout: Duration::from_secs(30),
//!     };
//!     let client = create_s3_client(&settings).await;
//!     let store = S3ObjectStore::new(client, "public-sites");
//!
//!     let router = create_router(store, RouterConfig::new());
//!     let listener = tokio::net::TcpListener::bind("0.0.0.0:8000").await.unwrap();
//!     axum::serve(listener, router).await.unwrap();
//! }
//! ```

pub mod config;
pub mod content;
pub mod error;
pub mod server;
pub mod store;
pub mod tenant;

// Re-export commonly used types
pub use config::{Backend, CheckConfig, Cli, Command, ServeConfig, StorageConfig};
pub use content::{
    resolve_content_type, ContentRouter, ObjectResponse, StorageKey, DEFAULT_CONTENT_TYPE,
    DEFAULT_DOCUMENT,
};
pub use error::{ServeError, StoreError};
pub use server::{create_router, AppState, ResolvedTenant, RouterConfig};
pub use store::{
    create_s3_client, GatewayStore, HttpObjectStore, ObjectStore, S3ObjectStore, S3Settings,
    StoredObject,
};
pub use tenant::{resolve_tenant, strip_port, TenantId, DEV_DOMAIN};
