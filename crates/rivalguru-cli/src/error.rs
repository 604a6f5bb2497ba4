use thiserror::Error;

/// Failures surfaced to the user while submitting a website name.
///
/// The `Display` text is exactly what the client shows.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Input rejected before any request was made.
    #[error("{0}")]
    InvalidInput(String),

    #[error("API request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The endpoint answered with a non-success status.
    #[error("API request failed: HTTP {status}: {detail}")]
    Status { status: u16, detail: String },

    #[error("Invalid data received: {0}")]
    MalformedResponse(String),

    #[error("API request failed: invalid backend URL {url}")]
    InvalidBackendUrl { url: String },
}
