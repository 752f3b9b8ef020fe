//! Tenant Gateway - serve each subdomain's static files from a shared bucket.
//!
//! This binary parses configuration, connects the configured object store and
//! starts the HTTP server.

use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tenant_gateway::{
    config::{self, Backend, CheckConfig, Cli, Command, ServeConfig, StorageConfig},
    create_router, create_s3_client, resolve_tenant,
    server::RouterConfig,
    store::{GatewayStore, HttpObjectStore, ObjectStore, S3ObjectStore},
    ContentRouter, ServeError, StorageKey, StoreError,
};

#[tokio::main]
async fn main() -> ExitCode {
    let env_file = config::load_dotenv();
    let cli = Cli::parse();

    match cli.into_command() {
        Command::Serve(config) => run_serve(config, env_file).await,
        Command::Check(config) => run_check(config).await,
    }
}

// =============================================================================
// Serve Command
// =============================================================================

async fn run_serve(config: ServeConfig, env_file: Option<PathBuf>) -> ExitCode {
    init_logging(config.verbose);

    if let Some(path) = env_file {
        info!("Loaded environment from {}", path.display());
    }

    // Missing or invalid storage configuration is fatal before binding
    if let Err(e) = config.validate() {
        error!("Configuration error: {}", e);
        return ExitCode::FAILURE;
    }

    log_storage_config(&config.storage);

    let store = match build_store(&config.storage).await {
        Ok(store) => store,
        Err(e) => {
            error!("Failed to initialize storage backend: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let router = create_router(store, build_router_config(&config));

    let addr = config.bind_address();
    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!("Failed to bind to {}: {}", addr, e);
            return ExitCode::FAILURE;
        }
    };

    info!("Server listening on http://{}", addr);
    info!("  Try: curl -H 'Host: <tenant>.localhost' http://{}/", addr);

    if let Err(e) = axum::serve(listener, router).await {
        error!("Server error: {}", e);
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

/// Log the effective storage configuration (credentials omitted).
fn log_storage_config(storage: &StorageConfig) {
    info!("Configuration:");
    info!("  Bucket: {}", storage.bucket());
    info!("  Backend: {}", storage.backend);
    if let Some(ref endpoint) = storage.endpoint {
        info!("  Endpoint: {}", endpoint);
    }
    match storage.backend {
        Backend::S3 => {
            info!("  Region: {}", storage.region);
            info!(
                "  Retries: {} attempts ({:?} backoff)",
                storage.max_attempts, storage.retry_mode
            );
            if storage.access_key_id.is_some() {
                info!("  Credentials: static");
            } else {
                info!("  Credentials: default provider chain");
            }
        }
        Backend::Http => info!("  Retries: none"),
    }
    info!("  Timeout: {}s", storage.timeout_secs);
}

/// Construct the object store selected by configuration.
async fn build_store(storage: &StorageConfig) -> Result<GatewayStore, StoreError> {
    match storage.backend {
        Backend::S3 => {
            let client = create_s3_client(&storage.s3_settings()).await;
            Ok(S3ObjectStore::new(client, storage.bucket()).into())
        }
        Backend::Http => {
            let endpoint = storage.endpoint.as_deref().ok_or_else(|| {
                StoreError::Backend("http backend requires an endpoint".to_string())
            })?;
            let store = HttpObjectStore::new(endpoint, storage.bucket(), storage.timeout())?;
            Ok(store.into())
        }
    }
}

/// Initialize the tracing/logging subsystem.
fn init_logging(verbose: bool) {
    let env_filter = if verbose {
        "tenant_gateway=debug,tower_http=debug"
    } else {
        "tenant_gateway=info,tower_http=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| env_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Build RouterConfig from the application ServeConfig.
fn build_router_config(config: &ServeConfig) -> RouterConfig {
    let mut router_config = RouterConfig::new().with_tracing(!config.no_tracing);

    if let Some(ref origins) = config.cors_origins {
        router_config = router_config.with_cors_origins(origins.clone());
    }

    router_config
}

// =============================================================================
// Check Command
// =============================================================================

async fn run_check(config: CheckConfig) -> ExitCode {
    if config.verbose {
        init_logging(true);
    }

    println!("Tenant Gateway Configuration Check");
    println!("══════════════════════════════════");
    println!();

    if let Err(e) = config.storage.validate() {
        println!("✗ Configuration: {}", e);
        return ExitCode::FAILURE;
    }

    let storage = &config.storage;
    println!("✓ Bucket: {}", storage.bucket());
    println!("✓ Backend: {}", storage.backend);
    if let Some(ref endpoint) = storage.endpoint {
        println!("✓ Endpoint: {}", endpoint);
    }
    if storage.backend == Backend::S3 {
        println!("✓ Region: {}", storage.region);
    }

    let store = match build_store(storage).await {
        Ok(store) => store,
        Err(e) => {
            println!("✗ Storage: {}", e);
            return ExitCode::FAILURE;
        }
    };
    println!("✓ Store: {}", store.identifier());

    let Some(ref host) = config.tenant_host else {
        println!();
        println!("Tip: use --tenant-host <host> [--path <path>] to fetch a tenant object");
        return ExitCode::SUCCESS;
    };

    println!();
    let tenant = match resolve_tenant(host) {
        Some(tenant) => {
            println!("✓ Host '{}' resolves to tenant '{}'", host, tenant);
            tenant
        }
        None => {
            println!("✗ Host '{}' does not name a tenant", host);
            return ExitCode::FAILURE;
        }
    };

    let key = StorageKey::new(&tenant, config.path.trim_start_matches('/'));
    print!("Fetching '{}'... ", key);

    let router = ContentRouter::new(store);
    match router
        .serve(Some(&tenant), config.path.trim_start_matches('/'))
        .await
    {
        Ok(object) => {
            println!("✓ found");
            println!("  Size: {} bytes", object.data.len());
            println!("  Content-Type: {}", object.content_type);
        }
        Err(ServeError::NotFound { .. }) => {
            println!("✗ not found (the gateway would answer 404)");
            return ExitCode::FAILURE;
        }
        Err(e) => {
            println!("✗ failed");
            println!();
            println!("Error: {}", e);
            println!();
            println!("Please check:");
            println!("  - The bucket '{}' exists and is readable", storage.bucket());
            if storage.backend == Backend::S3 {
                println!("  - Your credentials are configured correctly");
            }
            if storage.endpoint.is_some() {
                println!("  - The endpoint is correct and reachable");
            }
            return ExitCode::FAILURE;
        }
    }

    println!();
    println!("══════════════════════════════════");
    println!("✓ All checks passed!");

    ExitCode::SUCCESS
}
