//! Database layer - connection pool and the upload token store
//!
//! Every lookup runs on one pooled connection held for the duration of a
//! request. The connection goes back to the pool when the session drops.

pub mod memory;
pub mod pool;
pub mod store;

pub use memory::{MemoryUploadTokenStore, StoreStats};
pub use pool::{create_pool, create_pool_with_options, DEFAULT_MAX_CONNECTIONS};
pub use store::{DbError, LookupSession, PgLookupSession, PgUploadTokenStore, UploadTokenStore};
