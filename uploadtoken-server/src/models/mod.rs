//! Domain models for the upload token lookup
//!
//! Rows read from the external `owners` and `repos` tables, the combined
//! lookup result, and the response format selector.

pub mod format;
pub mod upload_token;

pub use format::{FormatParams, ResponseFormat};
pub use upload_token::{Owner, Repo, UploadToken, UploadTokenRecord};
