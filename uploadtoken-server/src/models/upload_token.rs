//! Owner and repository rows, and the upload token itself

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Row from `owners`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Owner {
    pub ownerid: i64,
    pub username: String,
}

/// Row from `repos`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Repo {
    pub ownerid: i64,
    pub name: String,
    pub upload_token: UploadToken,
}

/// Opaque upload token.
///
/// Stored as either `uuid` or free-form text depending on the schema, so it
/// is carried as its string form. Serializes as a bare string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UploadToken(String);

impl UploadToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Parse as a UUID, for schemas that store tokens as `uuid`
    pub fn as_uuid(&self) -> Option<Uuid> {
        Uuid::parse_str(&self.0).ok()
    }
}

impl From<Uuid> for UploadToken {
    fn from(id: Uuid) -> Self {
        Self(id.hyphenated().to_string())
    }
}

impl From<&str> for UploadToken {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

impl From<String> for UploadToken {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl fmt::Display for UploadToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Successful lookup result.
///
/// `owner` comes from the owner row, `name` and `upload_token` from the repo row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadTokenRecord {
    pub ownerid: i64,
    pub owner: String,
    pub name: String,
    pub upload_token: UploadToken,
}

impl UploadTokenRecord {
    pub fn new(owner: Owner, repo: Repo) -> Self {
        Self {
            ownerid: owner.ownerid,
            owner: owner.username,
            name: repo.name,
            upload_token: repo.upload_token,
        }
    }
}
