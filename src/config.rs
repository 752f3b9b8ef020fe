//! Configuration management for the tenant gateway.
//!
//! Settings come from command-line arguments or environment variables, with
//! defaults for everything except the bucket:
//!
//! - `GATEWAY_HOST` - Server bind address (default: 0.0.0.0)
//! - `GATEWAY_PORT` - Server port (default: 8000)
//! - `GATEWAY_CORS_ORIGINS` - Allowed CORS origins, comma-separated (default: any)
//! - `PUBLIC_BUCKET` - Bucket holding every tenant's files (required)
//! - `STORAGE_BACKEND` - `s3` or `http` (default: s3)
//! - `STORAGE_ENDPOINT` - Custom endpoint; required for the `http` backend
//! - `STORAGE_REGION` - Region for S3 (default: us-east-1)
//! - `STORAGE_ACCESS_KEY_ID` / `STORAGE_SECRET_ACCESS_KEY` - Static S3 credentials
//! - `STORAGE_MAX_ATTEMPTS` - S3 attempts per request (default: 3)
//! - `STORAGE_RETRY_MODE` - `standard` or `adaptive` (default: standard)
//! - `STORAGE_TIMEOUT_SECS` - Upper bound for one fetch (default: 30)
//!
//! A `.env` file in the working directory (or a parent) is loaded first;
//! variables already set in the process environment take precedence.
//!
//! When no subcommand is given, `serve` is assumed.

use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::store::{RetryMode, S3Settings};

// =============================================================================
// Default Values
// =============================================================================

/// Default server host.
pub const DEFAULT_HOST: &str = "0.0.0.0";

/// Default server port.
pub const DEFAULT_PORT: u16 = 8000;

/// Default AWS region.
pub const DEFAULT_REGION: &str = "us-east-1";

/// Default number of attempts per S3 request.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

/// Default upper bound for a single storage fetch, in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

// =============================================================================
// CLI Arguments
// =============================================================================

/// Tenant Gateway - serve each subdomain's static files from a shared bucket.
#[derive(Parser, Debug, Clone)]
#[command(name = "tenant-gateway")]
#[command(author, version, about, long_about = None)]
#[command(args_conflicts_with_subcommands = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    #[command(flatten)]
    pub serve: ServeConfig,
}

impl Cli {
    /// The command to run, defaulting to `serve`.
    pub fn into_command(self) -> Command {
        self.command.unwrap_or(Command::Serve(self.serve))
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Start the gateway (default)
    Serve(ServeConfig),

    /// Verify storage configuration and optionally fetch one tenant object
    Check(CheckConfig),
}

/// Which object store implementation to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Backend {
    /// AWS S3 or any S3-compatible service
    S3,
    /// Anonymous reads from a public bucket over HTTP(S)
    Http,
}

impl std::fmt::Display for Backend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Backend::S3 => f.write_str("s3"),
            Backend::Http => f.write_str("http"),
        }
    }
}

// =============================================================================
// Storage Configuration
// =============================================================================

/// Storage settings shared by every command.
#[derive(Args, Debug, Clone)]
pub struct StorageConfig {
    /// Bucket containing every tenant's files, keyed by subdomain.
    #[arg(long, env = "PUBLIC_BUCKET")]
    pub bucket: Option<String>,

    /// Storage backend.
    #[arg(long, value_enum, default_value_t = Backend::S3, env = "STORAGE_BACKEND")]
    pub backend: Backend,

    /// Custom endpoint URL.
    ///
    /// Optional for `s3` (MinIO, R2, GCS interoperability); required for `http`
    /// (e.g. https://storage.googleapis.com).
    #[arg(long, env = "STORAGE_ENDPOINT")]
    pub endpoint: Option<String>,

    /// Region for S3 request signing.
    #[arg(long, default_value = DEFAULT_REGION, env = "STORAGE_REGION")]
    pub region: String,

    /// Static access key id (otherwise the AWS default credential chain is used).
    #[arg(long, env = "STORAGE_ACCESS_KEY_ID")]
    pub access_key_id: Option<String>,

    /// Static secret access key.
    #[arg(long, env = "STORAGE_SECRET_ACCESS_KEY", hide_env_values = true)]
    pub secret_access_key: Option<String>,

    /// Attempts per S3 request, including the first.
    #[arg(long, default_value_t = DEFAULT_MAX_ATTEMPTS, env = "STORAGE_MAX_ATTEMPTS")]
    pub max_attempts: u32,

    /// Backoff mode between S3 attempts.
    #[arg(long, value_enum, default_value_t = RetryMode::Standard, env = "STORAGE_RETRY_MODE")]
    pub retry_mode: RetryMode,

    /// Upper bound for a single fetch in seconds.
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS, env = "STORAGE_TIMEOUT_SECS")]
    pub timeout_secs: u64,
}

impl StorageConfig {
    /// Validate the storage settings and return an error message if invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.bucket().is_empty() {
            return Err("Bucket name is required. Set --bucket or PUBLIC_BUCKET".to_string());
        }

        match (&self.backend, &self.endpoint) {
            (Backend::Http, None) => {
                return Err(
                    "The http backend requires an endpoint. Set --endpoint or STORAGE_ENDPOINT"
                        .to_string(),
                );
            }
            (_, Some(endpoint)) => {
                let parsed = url::Url::parse(endpoint)
                    .map_err(|e| format!("Invalid endpoint URL '{}': {}", endpoint, e))?;
                if !matches!(parsed.scheme(), "http" | "https") {
                    return Err(format!(
                        "Endpoint must use http or https, got '{}'",
                        parsed.scheme()
                    ));
                }
            }
            (Backend::S3, None) => {}
        }

        if self.access_key_id.is_some() != self.secret_access_key.is_some() {
            return Err(
                "Both --access-key-id and --secret-access-key must be set, or neither"
                    .to_string(),
            );
        }

        if self.max_attempts == 0 {
            return Err("max_attempts must be greater than 0".to_string());
        }

        if self.timeout_secs == 0 {
            return Err("timeout_secs must be greater than 0".to_string());
        }

        Ok(())
    }

    /// The configured bucket, or an empty string if unset (call validate() first).
    pub fn bucket(&self) -> &str {
        self.bucket.as_deref().unwrap_or("").trim()
    }

    /// The per-fetch timeout.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Settings for the S3 client.
    pub fn s3_settings(&self) -> S3Settings {
        let credentials = match (&self.access_key_id, &self.secret_access_key) {
            (Some(id), Some(secret)) => Some((id.clone(), secret.clone())),
            _ => None,
        };

        S3Settings {
            endpoint: self.endpoint.clone(),
            region: self.region.clone(),
            credentials,
            max_attempts: self.max_attempts,
            retry_mode: self.retry_mode,
            timeout: self.timeout(),
        }
    }
}

// =============================================================================
// Serve Configuration
// =============================================================================

/// Configuration for the `serve` command.
#[derive(Args, Debug, Clone)]
pub struct ServeConfig {
    /// Host address to bind the server to.
    #[arg(long, default_value = DEFAULT_HOST, env = "GATEWAY_HOST")]
    pub host: String,

    /// Port to listen on.
    #[arg(short, long, default_value_t = DEFAULT_PORT, env = "GATEWAY_PORT")]
    pub port: u16,

    #[command(flatten)]
    pub storage: StorageConfig,

    /// Allowed CORS origins (comma-separated).
    ///
    /// If not specified, allows any origin.
    #[arg(long, env = "GATEWAY_CORS_ORIGINS", value_delimiter = ',')]
    pub cors_origins: Option<Vec<String>>,

    /// Enable verbose logging (debug level).
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,

    /// Disable request tracing.
    #[arg(long, default_value_t = false)]
    pub no_tracing: bool,
}

impl ServeConfig {
    /// Validate the configuration and return an error message if invalid.
    pub fn validate(&self) -> Result<(), String> {
        self.storage.validate()?;

        if self.host.trim().is_empty() {
            return Err("host must not be empty".to_string());
        }

        Ok(())
    }

    /// Get the server bind address as "host:port".
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

// =============================================================================
// Check Configuration
// =============================================================================

/// Configuration for the `check` command.
#[derive(Args, Debug, Clone)]
pub struct CheckConfig {
    #[command(flatten)]
    pub storage: StorageConfig,

    /// Host header to resolve into a tenant (e.g. foo.localhost).
    #[arg(long)]
    pub tenant_host: Option<String>,

    /// Request path to fetch for the tenant (default document if empty).
    #[arg(long, default_value = "")]
    pub path: String,

    /// Enable verbose output.
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,
}

// =============================================================================
// Tests
// =============================================================================

// =============================================================================
// Environment File
// =============================================================================

/// Load the nearest `.env` file into the process environment.
///
/// Returns the path of the loaded file, or `None` when there is none (or it
/// cannot be parsed). Existing variables are never overwritten.
pub fn load_dotenv() -> Option<PathBuf> {
    dotenvy::dotenv().ok()
}

/// Load a specific env file. Existing variables are never overwritten.
pub fn load_env_file(path: &Path) -> Result<(), dotenvy::Error> {
    dotenvy::from_path(path)
}
