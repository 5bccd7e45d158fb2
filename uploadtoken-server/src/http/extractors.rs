//! Custom Axum extractors

use std::sync::Arc;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use super::error::ApiError;
use super::server::AppState;
use crate::db::LookupSession;

/// One database session for the current request.
///
/// Acquired before the handler body runs; the connection is released when
/// the handler drops it, on success and on every error path.
pub struct DbSession(pub Box<dyn LookupSession>);

impl FromRequestParts<Arc<AppState>> for DbSession {
    type Rejection = ApiError;

    async fn from_request_parts(
        _parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let session = state.store.session().await?;
        Ok(Self(session))
    }
}
