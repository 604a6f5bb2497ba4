use std::time::Duration;

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use rivalguru_core::AnalysisResponse;

use crate::error::ClientError;

/// Everything but RFC 3986 unreserved characters.
const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

const USER_AGENT: &str = concat!("rivalguru-cli/", env!("CARGO_PKG_VERSION"));

/// HTTP client for the analysis endpoint.
#[derive(Debug, Clone)]
pub struct BackendClient {
    client: reqwest::Client,
    base_url: String,
}

impl BackendClient {
    /// Creates a client for the service at `base_url`.
    ///
    /// `timeout` should exceed the server's analysis deadline.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidBackendUrl`] if `base_url` is not an
    /// `http`/`https` URL, or [`ClientError::Transport`] if the HTTP client
    /// cannot be built.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ClientError> {
        let trimmed = base_url.trim().trim_end_matches('/');
        if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
            return Err(ClientError::InvalidBackendUrl {
                url: base_url.to_string(),
            });
        }

        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()?;

        Ok(Self {
            client,
            base_url: trimmed.to_string(),
        })
    }

    /// URL of the analysis endpoint for `website`, with the name encoded as a
    /// single path segment.
    #[must_use]
    pub fn scrape_url(&self, website: &str) -> String {
        let encoded = utf8_percent_encode(website, PATH_SEGMENT);
        format!("{}/scrape/{encoded}", self.base_url)
    }

    /// Requests the analysis for `website`.
    ///
    /// # Errors
    ///
    /// - [`ClientError::Transport`] if the request cannot be completed.
    /// - [`ClientError::Status`] on a non-success status, carrying the body's
    ///   `detail` when present.
    /// - [`ClientError::MalformedResponse`] if the body is not JSON or lacks
    ///   `company` or `competitors`.
    pub async fn analyze(&self, website: &str) -> Result<AnalysisResponse, ClientError> {
        let url = self.scrape_url(website);
        tracing::debug!(url = %url, "requesting analysis");

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let detail = serde_json::from_str::<serde_json::Value>(&body)
                .ok()
                .and_then(|v| v.get("detail").and_then(|d| d.as_str()).map(String::from))
                .unwrap_or_else(|| status.canonical_reason().unwrap_or("unknown error").to_string());
            tracing::warn!(status = status.as_u16(), detail = %detail, "analysis request rejected");
            return Err(ClientError::Status {
                status: status.as_u16(),
                detail,
            });
        }

        parse_response(&body)
    }
}

/// Parses a success body, checking for both top-level fields before decoding.
fn parse_response(body: &str) -> Result<AnalysisResponse, ClientError> {
    let value: serde_json::Value = serde_json::from_str(body)
        .map_err(|e| ClientError::MalformedResponse(e.to_string()))?;

    for field in ["company", "competitors"] {
        if value.get(field).is_none() {
            return Err(ClientError::MalformedResponse(format!(
                "response is missing `{field}`"
            )));
        }
    }

    serde_json::from_value(value).map_err(|e| ClientError::MalformedResponse(e.to_string()))
}
