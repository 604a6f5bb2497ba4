use std::time::Duration;

use rivalguru_core::CoreError;
use thiserror::Error;

/// Errors that void a whole analysis.
///
/// Competitor failures never surface here; they become absent outcomes.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AnalysisError {
    #[error(transparent)]
    InvalidTarget(#[from] CoreError),

    #[error("failed to fetch profile for {target}: {cause}")]
    RootFetchFailed { target: String, cause: String },

    #[error("timed out after {}s fetching profile for {target}", .deadline.as_secs())]
    RootFetchTimedOut { target: String, deadline: Duration },
}

impl AnalysisError {
    /// `true` when the company profile itself could not be obtained.
    #[must_use]
    pub fn is_root_failure(&self) -> bool {
        matches!(
            self,
            Self::RootFetchFailed { .. } | Self::RootFetchTimedOut { .. }
        )
    }
}
