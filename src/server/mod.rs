//! HTTP server layer for the tenant gateway.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                         HTTP Layer                              │
//! │                  GET /{*path}  (Host: tenant.*)                 │
//! │                                                                 │
//! │  ┌─────────────┐  ┌──────────────────┐  ┌───────────────────┐   │
//! │  │  extract    │  │    handlers      │  │      routes       │   │
//! │  │ (tenant)    │  │ (status mapping) │  │ (router config)   │   │
//! │  └─────────────┘  └──────────────────┘  └───────────────────┘   │
//! └─────────────────────────────────────────────────────────────────┘
//! ```

pub mod extract;
pub mod handlers;
pub mod routes;

pub use extract::{request_host, ObjectPath, ResolvedTenant};
pub use handlers::{
    object_handler, root_handler, AppState, MISSING_TENANT_MESSAGE, NOT_FOUND_MESSAGE,
    UPSTREAM_MESSAGE,
};
pub use routes::{create_router, RouterConfig};
