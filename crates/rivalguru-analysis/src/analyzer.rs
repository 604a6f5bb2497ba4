//! Two-phase analysis: the company fetch discovers the competitor set, then
//! every competitor is fetched concurrently against the same deadline.
//!
//! Only the company fetch is fatal. A competitor that fails, panics, or is
//! still running when the deadline passes is recorded as an absent outcome at
//! its own position.

use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Duration;

use futures::stream::{self, StreamExt};
use futures::FutureExt;
use rivalguru_core::{validate_target, AnalysisResult, AppConfig, FetchOutcome, Profile};
use rivalguru_fetcher::ProfileFetcher;
use tokio::time::Instant;

use crate::error::AnalysisError;
use crate::summary::AnalysisSummary;

const DEFAULT_MAX_CONCURRENT_FETCHES: usize = 8;

/// Upper bound on how far ahead a deadline instant may be placed.
const FAR_FUTURE: Duration = Duration::from_secs(86_400 * 365 * 30);

/// Runs competitor analyses against a shared [`ProfileFetcher`].
///
/// Holds no per-request state; one instance serves concurrent requests.
#[derive(Clone)]
pub struct Analyzer {
    fetcher: Arc<dyn ProfileFetcher>,
    max_concurrent: usize,
}

impl Analyzer {
    #[must_use]
    pub fn new(fetcher: Arc<dyn ProfileFetcher>) -> Self {
        Self {
            fetcher,
            max_concurrent: DEFAULT_MAX_CONCURRENT_FETCHES,
        }
    }

    #[must_use]
    pub fn from_app_config(fetcher: Arc<dyn ProfileFetcher>, config: &AppConfig) -> Self {
        Self::new(fetcher).with_max_concurrent(config.max_concurrent_fetches)
    }

    /// Caps how many competitor fetches are in flight at once. Values below 1
    /// are treated as 1.
    #[must_use]
    pub fn with_max_concurrent(mut self, max_concurrent: usize) -> Self {
        self.max_concurrent = max_concurrent.max(1);
        self
    }

    /// Analyzes `target` and its competitors within `deadline`.
    ///
    /// The deadline clock starts before the company fetch and also bounds the
    /// competitor fan-out, so the whole call returns within roughly
    /// `deadline`. The result has exactly one outcome per competitor
    /// identifier, in identifier order.
    ///
    /// # Errors
    ///
    /// - [`AnalysisError::InvalidTarget`]: `target` is not a website name; nothing is fetched.
    /// - [`AnalysisError::RootFetchFailed`]: the company fetch errored or panicked.
    /// - [`AnalysisError::RootFetchTimedOut`]: the company fetch did not finish in time.
    pub async fn analyze(
        &self,
        target: &str,
        deadline: Duration,
    ) -> Result<AnalysisResult, AnalysisError> {
        let target = validate_target(target)?;
        let started = Instant::now();
        let expires_at = started
            .checked_add(deadline)
            .unwrap_or_else(|| started + FAR_FUTURE);

        tracing::info!(website = %target, deadline_secs = deadline.as_secs(), "starting analysis");

        let company = self.fetch_company(&target, expires_at, deadline).await?;
        tracing::info!(
            website = %target,
            competitors = company.competitors.len(),
            "company profile fetched"
        );

        let outcomes = self.fetch_competitors(&company.competitors, expires_at).await;

        let summary = AnalysisSummary::from_outcomes(&outcomes);
        #[allow(clippy::cast_possible_truncation)]
        let elapsed_ms = started.elapsed().as_millis() as u64;
        tracing::info!(
            website = %target,
            competitors = summary.total(),
            fetched = summary.fetched,
            failed = summary.failed,
            timed_out = summary.timed_out,
            elapsed_ms,
            "analysis complete"
        );

        Ok(AnalysisResult {
            target,
            company,
            outcomes,
        })
    }

    async fn fetch_company(
        &self,
        target: &str,
        expires_at: Instant,
        deadline: Duration,
    ) -> Result<Profile, AnalysisError> {
        let fetch = AssertUnwindSafe(self.fetcher.fetch_profile(target)).catch_unwind();

        match tokio::time::timeout_at(expires_at, fetch).await {
            Ok(Ok(Ok(profile))) => Ok(profile),
            Ok(Ok(Err(e))) => {
                tracing::error!(website = %target, error = %e, "company profile fetch failed");
                Err(AnalysisError::RootFetchFailed {
                    target: target.to_owned(),
                    cause: e.to_string(),
                })
            }
            Ok(Err(_)) => {
                tracing::error!(website = %target, "company profile fetch panicked");
                Err(AnalysisError::RootFetchFailed {
                    target: target.to_owned(),
                    cause: "profile fetch panicked".to_owned(),
                })
            }
            Err(_) => {
                tracing::error!(
                    website = %target,
                    deadline_secs = deadline.as_secs(),
                    "company profile fetch timed out"
                );
                Err(AnalysisError::RootFetchTimedOut {
                    target: target.to_owned(),
                    deadline,
                })
            }
        }
    }

    /// Fetches every identifier in `ids`, at most `max_concurrent` at a time.
    ///
    /// Results land in the slot of the identifier they were dispatched for.
    /// When `expires_at` passes, the stream is dropped, which cancels every
    /// in-flight and queued fetch; their slots become [`FetchOutcome::TimedOut`].
    async fn fetch_competitors(&self, ids: &[String], expires_at: Instant) -> Vec<FetchOutcome> {
        if ids.is_empty() {
            return Vec::new();
        }
        let mut slots: Vec<Option<FetchOutcome>> = vec![None; ids.len()];

        let fetcher = Arc::clone(&self.fetcher);
        let mut pending = stream::iter(ids.iter().cloned().enumerate())
            .map(move |(index, id)| {
                let fetcher = Arc::clone(&fetcher);
                async move { (index, fetch_competitor(fetcher.as_ref(), &id).await) }
            })
            .buffer_unordered(self.max_concurrent);

        loop {
            match tokio::time::timeout_at(expires_at, pending.next()).await {
                Ok(Some((index, outcome))) => slots[index] = Some(outcome),
                Ok(None) => break,
                Err(_) => {
                    tracing::warn!(
                        outstanding = slots.iter().filter(|s| s.is_none()).count(),
                        "analysis deadline reached, cancelling outstanding competitor fetches"
                    );
                    break;
                }
            }
        }
        drop(pending);

        slots
            .into_iter()
            .zip(ids)
            .map(|(slot, id)| {
                slot.unwrap_or_else(|| {
                    tracing::warn!(competitor = %id, "competitor fetch timed out and was cancelled");
                    FetchOutcome::TimedOut { target: id.clone() }
                })
            })
            .collect()
    }
}

/// Fetches one competitor, folding every failure into an outcome.
async fn fetch_competitor(fetcher: &dyn ProfileFetcher, id: &str) -> FetchOutcome {
    let normalized = match validate_target(id) {
        Ok(normalized) => normalized,
        Err(e) => {
            tracing::warn!(competitor = %id, error = %e, "skipping invalid competitor identifier");
            return FetchOutcome::Failed {
                target: id.to_owned(),
                reason: e.to_string(),
            };
        }
    };

    match AssertUnwindSafe(fetcher.fetch_profile(&normalized))
        .catch_unwind()
        .await
    {
        Ok(Ok(profile)) => {
            tracing::debug!(competitor = %id, "competitor profile fetched");
            FetchOutcome::Fetched {
                target: id.to_owned(),
                profile,
            }
        }
        Ok(Err(e)) => {
            tracing::warn!(competitor = %id, error = %e, "competitor profile fetch failed");
            FetchOutcome::Failed {
                target: id.to_owned(),
                reason: e.to_string(),
            }
        }
        Err(_) => {
            tracing::error!(competitor = %id, "competitor profile fetch panicked");
            FetchOutcome::Failed {
                target: id.to_owned(),
                reason: "profile fetch panicked".to_owned(),
            }
        }
    }
}
