//! Content routing: tenant + path to storage key to HTTP-ready object.
//!
//! ```text
//! (tenant, path) ──► StorageKey "{tenant}/{path | index.html}"
//!                         │
//!                         ▼
//!                   ObjectStore::get
//!                         │
//!        ┌────────────────┼────────────────┐
//!        ▼                ▼                ▼
//!   ObjectResponse   NotFound (404)   Upstream (502)
//! ```

mod key;
mod router;

pub use key::{StorageKey, DEFAULT_DOCUMENT};
pub use router::{resolve_content_type, ContentRouter, ObjectResponse, DEFAULT_CONTENT_TYPE};
