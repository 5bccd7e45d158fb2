//! Upload token lookup endpoint
//!
//! GET /{org}/{repo}[?f=text|plain]

use std::sync::Arc;

use axum::{
    extract::{Path, Query},
    routing::get,
    Router,
};

use crate::http::error::ApiError;
use crate::http::extractors::DbSession;
use crate::http::response::UploadTokenResponse;
use crate::http::server::AppState;
use crate::lookup::lookup_upload_token;
use crate::models::{FormatParams, ResponseFormat};

/// GET /{org}/{repo} - resolve a repository's upload token
///
/// The query string is taken as raw pairs: `f` selects the format and can
/// never turn a lookup into a 400.
async fn get_upload_token(
    Path((org, repo)): Path<(String, String)>,
    Query(pairs): Query<Vec<(String, String)>>,
    DbSession(mut session): DbSession,
) -> Result<UploadTokenResponse, ApiError> {
    let params = FormatParams::from_pairs(pairs);
    let record = lookup_upload_token(session.as_mut(), &org, &repo).await?;
    Ok(UploadTokenResponse::new(record, ResponseFormat::from(&params)))
}

/// Upload token routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/{org}/{repo}", get(get_upload_token))
}

#[cfg(test)]
mod tests {
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use axum::Router;
    use tower::ServiceExt;
    use uuid::Uuid;

    use crate::db::MemoryUploadTokenStore;
    use crate::http::server::{build_router, AppState};

    fn store() -> MemoryUploadTokenStore {
        MemoryUploadTokenStore::new()
            .with_owner(7, "alice")
            .with_repo(7, "proj", "abc-123")
    }

    fn app(store: &MemoryUploadTokenStore) -> Router {
        build_router(AppState::new(std::sync::Arc::new(store.clone())))
    }

    async fn get(app: Router, uri: &str) -> (StatusCode, String, String) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let content_type = response
            .headers()
            .get("content-type")
            .map(|v| v.to_str().unwrap().to_owned())
            .unwrap_or_default();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, content_type, String::from_utf8(body.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn returns_json_document() {
        let store = store();
        let (status, content_type, body) = get(app(&store), "/alice/proj").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(content_type, "application/json");
        assert_eq!(
            body,
            r#"{"ownerid":7,"owner":"alice","name":"proj","upload_token":"abc-123"}"#
        );
    }

    #[tokio::test]
    async fn text_and_plain_return_bare_token() {
        let store = store();
        for uri in ["/alice/proj?f=text", "/alice/proj?f=plain"] {
            let (status, content_type, body) = get(app(&store), uri).await;

            assert_eq!(status, StatusCode::OK);
            assert!(content_type.starts_with("text/plain"));
            assert_eq!(body, "abc-123");
        }
    }

    #[tokio::test]
    async fn unknown_format_falls_back_to_json() {
        let store = store();
        let (_, _, plain) = get(app(&store), "/alice/proj").await;
        let (status, _, xml) = get(app(&store), "/alice/proj?f=xml").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(xml, plain);
    }

    #[tokio::test]
    async fn repeated_format_parameter_uses_last_value() {
        let store = store();
        let (_, _, json) = get(app(&store), "/alice/proj").await;

        let (status, content_type, body) = get(app(&store), "/alice/proj?f=xml&f=json").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(content_type, "application/json");
        assert_eq!(body, json);

        let (status, content_type, body) = get(app(&store), "/alice/proj?f=xml&f=text").await;
        assert_eq!(status, StatusCode::OK);
        assert!(content_type.starts_with("text/plain"));
        assert_eq!(body, "abc-123");

        let (status, _, body) = get(app(&store), "/alice/proj?f=text&f=plain").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "abc-123");
    }

    #[tokio::test]
    async fn undecodable_format_value_falls_back_to_json() {
        let store = store();
        let (status, content_type, _) = get(app(&store), "/alice/proj?f=%FF").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(content_type, "application/json");
    }

    #[tokio::test]
    async fn unknown_owner_is_404_without_repo_query() {
        let store = store();
        let (status, _, body) = get(app(&store), "/carol/proj").await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        let value: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(value["detail"], "no owner with this name found");
        assert_eq!(store.stats().owner_queries(), 1);
        assert_eq!(store.stats().repo_queries(), 0);
    }

    #[tokio::test]
    async fn unknown_repo_is_404() {
        let store = store();
        let (status, _, body) = get(app(&store), "/alice/missing").await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        let value: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(value["detail"], "no repo found with this name");
    }

    #[tokio::test]
    async fn owner_match_is_case_sensitive() {
        let store = store();
        let (status, _, _) = get(app(&store), "/Alice/proj").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn uuid_token_plain_text() {
        let token = Uuid::new_v4();
        let store = MemoryUploadTokenStore::new()
            .with_owner(7, "alice")
            .with_repo(7, "proj", token);

        let (_, _, body) = get(app(&store), "/alice/proj?f=text").await;
        assert_eq!(body, token.to_string());
    }

    #[tokio::test]
    async fn repeated_lookups_are_identical() {
        let store = store();
        let (_, _, first) = get(app(&store), "/alice/proj").await;
        for _ in 0..3 {
            let (status, _, body) = get(app(&store), "/alice/proj").await;
            assert_eq!(status, StatusCode::OK);
            assert_eq!(body, first);
        }
    }

    #[tokio::test]
    async fn session_released_on_every_path() {
        let store = store();
        get(app(&store), "/alice/proj").await;
        get(app(&store), "/carol/proj").await;
        get(app(&store), "/alice/missing").await;

        assert_eq!(store.stats().sessions_opened(), 3);
        assert_eq!(store.stats().sessions_released(), 3);
    }

    #[tokio::test]
    async fn database_failure_is_500() {
        let store = store().failing();
        let (status, _, body) = get(app(&store), "/alice/proj").await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        let value: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(value["error"], "internal_error");
        assert_eq!(store.stats().sessions_released(), 1);
    }

    #[tokio::test]
    async fn health_does_not_touch_the_store() {
        let store = store();
        let (status, _, _) = get(app(&store), "/health").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(store.stats().sessions_opened(), 0);
    }
}
