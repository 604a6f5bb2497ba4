//! HTTP client for the external research service.
//!
//! The service scrapes and summarizes traffic-analytics pages for a website
//! and answers `GET {base}/website/{target}` with a [`Profile`] JSON body.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Url};
use rivalguru_core::{AppConfig, Profile};

use crate::error::FetchError;
use crate::fetcher::ProfileFetcher;
use crate::retry::retry_with_backoff;

const USER_AGENT: &str = "rivalguru/0.1 (competitor-research)";

/// Research-service client implementing [`ProfileFetcher`].
///
/// Rate limiting (429), not-found (404) and other non-2xx responses map to
/// typed errors. Transient failures are retried with exponential back-off up
/// to `max_retries` additional attempts.
pub struct ResearchClient {
    client: Client,
    base_url: Url,
    api_token: Option<String>,
    zone: Option<String>,
    max_retries: u32,
    backoff_base_secs: u64,
}

impl ResearchClient {
    /// Creates a client for the service at `base_url`.
    ///
    /// `timeout_secs` bounds each individual HTTP request, not the whole
    /// retry sequence.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Http`] if the `reqwest::Client` cannot be built, or
    /// [`FetchError::InvalidBaseUrl`] if `base_url` is not an absolute http(s) URL.
    pub fn new(
        base_url: &str,
        timeout_secs: u64,
        max_retries: u32,
        backoff_base_secs: u64,
    ) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(USER_AGENT)
            .build()?;

        let invalid = |reason: String| FetchError::InvalidBaseUrl {
            base_url: base_url.to_owned(),
            reason,
        };

        // Trailing slash so that appended segments extend the base path.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let parsed = Url::parse(&normalised).map_err(|e| invalid(e.to_string()))?;
        if parsed.cannot_be_a_base() || !matches!(parsed.scheme(), "http" | "https") {
            return Err(invalid("expected an http(s) URL".to_owned()));
        }

        Ok(Self {
            client,
            base_url: parsed,
            api_token: None,
            zone: None,
            max_retries,
            backoff_base_secs,
        })
    }

    /// Builds a client from the fetcher section of [`AppConfig`].
    ///
    /// # Errors
    ///
    /// See [`ResearchClient::new`].
    pub fn from_app_config(config: &AppConfig) -> Result<Self, FetchError> {
        let mut client = Self::new(
            &config.research_base_url,
            config.fetch_request_timeout_secs,
            config.fetch_max_retries,
            config.fetch_retry_backoff_base_secs,
        )?;
        client.api_token.clone_from(&config.research_api_token);
        client.zone.clone_from(&config.research_zone);
        Ok(client)
    }

    #[must_use]
    pub fn with_api_token(mut self, token: impl Into<String>) -> Self {
        self.api_token = Some(token.into());
        self
    }

    #[must_use]
    pub fn with_zone(mut self, zone: impl Into<String>) -> Self {
        self.zone = Some(zone.into());
        self
    }

    /// Builds the profile URL for an already-normalized target.
    fn profile_url(&self, target: &str) -> Result<Url, FetchError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| FetchError::InvalidBaseUrl {
                base_url: self.base_url.to_string(),
                reason: "URL cannot be a base".to_owned(),
            })?
            .pop_if_empty()
            .push("website")
            .push(target);

        if let Some(zone) = &self.zone {
            url.query_pairs_mut().append_pair("zone", zone);
        }

        Ok(url)
    }
}

#[async_trait]
impl ProfileFetcher for ResearchClient {
    /// Fetches the profile for `target`.
    ///
    /// # Errors
    ///
    /// - [`FetchError::InvalidTarget`]: `target` is not a website name (not sent).
    /// - [`FetchError::RateLimited`]: HTTP 429 after all retries.
    /// - [`FetchError::NotFound`]: HTTP 404 (not retried).
    /// - [`FetchError::UnexpectedStatus`]: other non-2xx (5xx retried).
    /// - [`FetchError::Http`]: network or TLS failure after all retries.
    /// - [`FetchError::Deserialize`]: body is not a profile (not retried).
    async fn fetch_profile(&self, target: &str) -> Result<Profile, FetchError> {
        let target = rivalguru_core::validate_target(target)?;
        let url = self.profile_url(&target)?;
        tracing::debug!(website = %target, url = %url, "requesting profile");

        retry_with_backoff(self.max_retries, self.backoff_base_secs, || {
            let url = url.clone();
            let target = target.clone();
            async move {
                let mut request = self
                    .client
                    .get(url)
                    .header(reqwest::header::ACCEPT, "application/json");
                if let Some(token) = &self.api_token {
                    request = request.bearer_auth(token);
                }

                let response = request.send().await?;
                let status = response.status();

                if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
                    let retry_after_secs = response
                        .headers()
                        .get(reqwest::header::RETRY_AFTER)
                        .and_then(|v| v.to_str().ok())
                        .and_then(|s| s.parse::<u64>().ok())
                        .unwrap_or(60);
                    return Err(FetchError::RateLimited {
                        target,
                        retry_after_secs,
                    });
                }

                if status == reqwest::StatusCode::NOT_FOUND {
                    return Err(FetchError::NotFound { target });
                }

                if !status.is_success() {
                    return Err(FetchError::UnexpectedStatus {
                        status: status.as_u16(),
                        target,
                    });
                }

                let body = response.text().await?;
                serde_json::from_str::<Profile>(&body).map_err(|e| FetchError::Deserialize {
                    context: format!("profile for {target}"),
                    source: e,
                })
            }
        })
        .await
    }
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
