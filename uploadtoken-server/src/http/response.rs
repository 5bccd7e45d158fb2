//! Lookup response rendering
//!
//! JSON document by default, the bare token as `text/plain` when requested.

use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::models::{ResponseFormat, UploadTokenRecord};

/// A lookup result paired with the format it should be rendered in
pub struct UploadTokenResponse {
    pub record: UploadTokenRecord,
    pub format: ResponseFormat,
}

impl UploadTokenResponse {
    pub fn new(record: UploadTokenRecord, format: ResponseFormat) -> Self {
        Self { record, format }
    }
}

impl IntoResponse for UploadTokenResponse {
    fn into_response(self) -> Response {
        match self.format {
            ResponseFormat::Json => Json(self.record).into_response(),
            ResponseFormat::PlainText => self.record.upload_token.to_string().into_response(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Owner, Repo, UploadToken};
    use axum::body::to_bytes;
    use axum::http::header::CONTENT_TYPE;

    fn record() -> UploadTokenRecord {
        UploadTokenRecord::new(
            Owner {
                ownerid: 7,
                username: "alice".into(),
            },
            Repo {
                ownerid: 7,
                name: "proj".into(),
                upload_token: UploadToken::new("abc-123"),
            },
        )
    }

    #[tokio::test]
    async fn plain_text_is_bare_token() {
        let response = UploadTokenResponse::new(record(), ResponseFormat::PlainText).into_response();

        let content_type = response.headers()[CONTENT_TYPE].to_str().unwrap().to_owned();
        assert!(content_type.starts_with("text/plain"));

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&body[..], b"abc-123");
    }

    #[tokio::test]
    async fn json_is_default_document() {
        let response = UploadTokenResponse::new(record(), ResponseFormat::Json).into_response();

        let content_type = response.headers()[CONTENT_TYPE].to_str().unwrap().to_owned();
        assert_eq!(content_type, "application/json");

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(
            &body[..],
            br#"{"ownerid":7,"owner":"alice","name":"proj","upload_token":"abc-123"}"#
        );
    }
}
