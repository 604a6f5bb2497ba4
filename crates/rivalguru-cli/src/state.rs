//! View state for a single submission.
//!
//! Transitions are plain functions over owned state; rendering borrows it.

use rivalguru_core::{is_valid_website, AnalysisResponse, ComparisonTable};

use crate::error::ClientError;

pub const LOADING_MESSAGE: &str = "Scraping data... This may take a moment.";
const EMPTY_INPUT_MESSAGE: &str = "Please enter a website name.";
const INVALID_INPUT_MESSAGE: &str = "Please enter a valid website name.";
const NO_DATA_MESSAGE: &str = "No competitor data available to display.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewState {
    /// Nothing in flight; holds the last successful response, if any.
    Idle(Option<AnalysisResponse>),
    Loading,
    /// A message to show once before returning to `Idle(None)`.
    Error(String),
}

impl Default for ViewState {
    fn default() -> Self {
        Self::Idle(None)
    }
}

impl ViewState {
    /// Starts a submission.
    ///
    /// Returns `Loading` and the trimmed website name to request, or an
    /// `Error` state and no request when the input is rejected.
    #[must_use]
    pub fn submit(input: &str) -> (Self, Option<String>) {
        match validate_input(input) {
            Ok(website) => (Self::Loading, Some(website)),
            Err(e) => (Self::Error(e.to_string()), None),
        }
    }

    /// Applies the endpoint result to a `Loading` state.
    #[must_use]
    pub fn complete(self, result: Result<AnalysisResponse, ClientError>) -> Self {
        match (self, result) {
            (Self::Loading, Ok(response)) => Self::Idle(Some(response)),
            (Self::Loading, Err(e)) => {
                tracing::debug!(error = %e, "analysis request failed");
                Self::Error(e.to_string())
            }
            (other, _) => other,
        }
    }

    /// Clears a shown error; other states are unchanged.
    #[must_use]
    pub fn acknowledge(self) -> Self {
        match self {
            Self::Error(_) => Self::Idle(None),
            other => other,
        }
    }
}

/// Checks a raw website name. Empty and malformed input get distinct messages.
///
/// # Errors
///
/// Returns [`ClientError::InvalidInput`] with the message to show.
pub fn validate_input(input: &str) -> Result<String, ClientError> {
    let website = input.trim();
    if website.is_empty() {
        return Err(ClientError::InvalidInput(EMPTY_INPUT_MESSAGE.to_string()));
    }
    if !is_valid_website(website) {
        return Err(ClientError::InvalidInput(INVALID_INPUT_MESSAGE.to_string()));
    }
    Ok(website.to_string())
}

/// Text for `state`. With `raw_json`, a response is printed as the JSON
/// document instead of a table.
#[must_use]
pub fn render(state: &ViewState, raw_json: bool) -> String {
    match state {
        ViewState::Idle(None) => String::new(),
        ViewState::Idle(Some(response)) if raw_json => {
            serde_json::to_string_pretty(response).unwrap_or_else(|e| e.to_string())
        }
        ViewState::Idle(Some(response)) => {
            let table = ComparisonTable::from_response(response);
            if table.is_empty() {
                NO_DATA_MESSAGE.to_string()
            } else {
                table.render()
            }
        }
        ViewState::Loading => LOADING_MESSAGE.to_string(),
        ViewState::Error(message) => message.clone(),
    }
}

#[cfg(test)]
#[path = "state_test.rs"]
mod tests;
