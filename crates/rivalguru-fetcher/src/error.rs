use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("rate limited while fetching {target} (retry after {retry_after_secs}s)")]
    RateLimited {
        target: String,
        retry_after_secs: u64,
    },

    #[error("no profile found for {target}")]
    NotFound { target: String },

    #[error("unexpected HTTP status {status} while fetching {target}")]
    UnexpectedStatus { status: u16, target: String },

    #[error("invalid research base URL \"{base_url}\": {reason}")]
    InvalidBaseUrl { base_url: String, reason: String },

    #[error(transparent)]
    InvalidTarget(#[from] rivalguru_core::CoreError),

    #[error("research service unavailable: {0}")]
    Unavailable(String),
}
