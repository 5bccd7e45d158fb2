//! uploadtoken-server: upload token lookup over HTTP
//!
//! Resolves an owner by username, then the owner's repository by name,
//! and returns the repository's upload token as JSON or plain text.

pub mod config;
pub mod db;
pub mod http;
pub mod lookup;
pub mod models;

pub use config::{ConfigError, Settings};
pub use db::{create_pool, DbError, PgUploadTokenStore, UploadTokenStore};
pub use http::{build_router, run_server, ApiError, AppState, ServerConfig};
pub use lookup::{lookup_upload_token, LookupError};
pub use models::{ResponseFormat, UploadToken, UploadTokenRecord};
