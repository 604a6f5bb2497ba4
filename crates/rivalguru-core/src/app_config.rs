use std::net::SocketAddr;
use std::time::Duration;

#[derive(Clone)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub log_level: String,
    /// Single deadline shared by the root fetch and the competitor fan-out.
    pub analysis_timeout_secs: u64,
    pub max_concurrent_fetches: usize,
    pub research_base_url: String,
    pub research_api_token: Option<String>,
    pub research_zone: Option<String>,
    pub fetch_request_timeout_secs: u64,
    pub fetch_max_retries: u32,
    pub fetch_retry_backoff_base_secs: u64,
    pub rate_limit_per_minute: usize,
}

impl AppConfig {
    #[must_use]
    pub fn analysis_timeout(&self) -> Duration {
        Duration::from_secs(self.analysis_timeout_secs)
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("bind_addr", &self.bind_addr)
            .field("log_level", &self.log_level)
            .field("analysis_timeout_secs", &self.analysis_timeout_secs)
            .field("max_concurrent_fetches", &self.max_concurrent_fetches)
            .field("research_base_url", &self.research_base_url)
            .field(
                "research_api_token",
                &self.research_api_token.as_ref().map(|_| "[redacted]"),
            )
            .field("research_zone", &self.research_zone)
            .field(
                "fetch_request_timeout_secs",
                &self.fetch_request_timeout_secs,
            )
            .field("fetch_max_retries", &self.fetch_max_retries)
            .field(
                "fetch_retry_backoff_base_secs",
                &self.fetch_retry_backoff_base_secs,
            )
            .field("rate_limit_per_minute", &self.rate_limit_per_minute)
            .finish()
    }
}
