//! Terminal client for the rival analysis service.
//!
//! [`BackendClient`] calls `GET /scrape/{website_name}`; [`ViewState`] tracks
//! one submission from input validation through to a rendered table.

pub mod client;
pub mod error;
pub mod state;

pub use client::BackendClient;
pub use error::ClientError;
pub use state::{render, ViewState, LOADING_MESSAGE};
