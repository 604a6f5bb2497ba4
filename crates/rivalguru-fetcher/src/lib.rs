//! Profile fetching: the fetcher contract and the HTTP research-service client.

pub mod client;
pub mod error;
pub mod fetcher;

mod retry;

pub use client::ResearchClient;
pub use error::FetchError;
pub use fetcher::ProfileFetcher;
