//! Response format selection from the `f` query parameter

/// Query string accepted by the lookup endpoint.
///
/// Built from raw key/value pairs so that a repeated or odd `f` never
/// rejects the request. The last `f` wins; other keys are ignored.
#[derive(Debug, Default)]
pub struct FormatParams {
    pub f: Option<String>,
}

impl FormatParams {
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let f = pairs
            .into_iter()
            .filter(|(key, _)| key.as_ref() == "f")
            .map(|(_, value)| value.into())
            .last();
        Self { f }
    }
}

/// How a successful lookup is rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResponseFormat {
    /// `{"ownerid", "owner", "name", "upload_token"}`
    #[default]
    Json,
    /// The bare token string
    PlainText,
}

impl ResponseFormat {
    /// `text` and `plain` select plain text; anything else falls back to JSON.
    pub fn from_query(value: Option<&str>) -> Self {
        match value {
            Some("text") | Some("plain") => Self::PlainText,
            _ => Self::Json,
        }
    }
}

impl From<&FormatParams> for ResponseFormat {
    fn from(params: &FormatParams) -> Self {
        Self::from_query(params.f.as_deref())
    }
}
