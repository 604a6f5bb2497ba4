//! `GET /scrape/{website_name}`: company profile plus competitor profiles.

use axum::{
    extract::{Path, State},
    Extension, Json,
};
use rivalguru_analysis::AnalysisError;
use rivalguru_core::AnalysisResponse;
use tracing::Instrument;

use super::{ApiError, AppState};
use crate::middleware::RequestId;

pub(super) async fn scrape_website(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(website_name): Path<String>,
) -> Result<Json<AnalysisResponse>, ApiError> {
    let span = tracing::info_span!("scrape", request_id = %req_id.0, website = %website_name);

    async move {
        tracing::info!("starting scraping");
        state
            .analyzer
            .analyze(&website_name, state.analysis_timeout)
            .await
            .map(|result| Json(result.into_response()))
            .map_err(|e| map_analysis_error(&e))
    }
    .instrument(span)
    .await
}

/// Maps an analysis failure to a response. Root-fetch causes stay in the log.
fn map_analysis_error(error: &AnalysisError) -> ApiError {
    match error {
        AnalysisError::InvalidTarget(e) => {
            tracing::info!(error = %e, "rejected invalid website name");
            ApiError::bad_request(format!("Please enter a valid website name: {e}"))
        }
        AnalysisError::RootFetchFailed { target, .. } => {
            tracing::error!(error = %error, "error analyzing company");
            ApiError::internal(format!(
                "An error occurred while analyzing the company: no profile could be retrieved for {target}"
            ))
        }
        AnalysisError::RootFetchTimedOut { target, deadline } => {
            tracing::error!(error = %error, "error analyzing company");
            ApiError::internal(format!(
                "An error occurred while analyzing the company: {target} did not respond within {}s",
                deadline.as_secs()
            ))
        }
    }
}
