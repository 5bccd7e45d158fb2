//! Owner-then-repo upload token lookup
//!
//! Straight-line: resolve the owner, stop if absent, resolve the repo under
//! that owner, stop if absent. No partial results.

use tracing::debug;

use crate::db::{DbError, LookupSession};
use crate::models::UploadTokenRecord;

/// Lookup failure
#[derive(Debug, thiserror::Error)]
pub enum LookupError {
    #[error("no owner with this name found")]
    OwnerNotFound,

    #[error("no repo found with this name")]
    RepoNotFound,

    #[error(transparent)]
    Database(#[from] DbError),
}

/// Resolve `org`/`repo` to its upload token.
///
/// The repo query is never issued when the owner does not exist.
#[tracing::instrument(level = "debug", skip(session))]
pub async fn lookup_upload_token(
    session: &mut dyn LookupSession,
    org: &str,
    repo: &str,
) -> Result<UploadTokenRecord, LookupError> {
    let owner = session
        .find_owner(org)
        .await?
        .ok_or(LookupError::OwnerNotFound)?;

    debug!(ownerid = owner.ownerid, "owner resolved");

    let found = session
        .find_repo(owner.ownerid, repo)
        .await?
        .ok_or(LookupError::RepoNotFound)?;

    Ok(UploadTokenRecord::new(owner, found))
}
