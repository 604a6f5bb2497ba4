use serde::{Deserialize, Serialize};

/// Research result for one website, as returned by the profile fetcher.
///
/// Only the analyzed company's `competitors` list is acted on; competitor
/// profiles may carry one but it is never followed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub description: String,
    /// Hierarchical category path, e.g. `"Retail>Online"`.
    pub category: String,
    pub year_founded: i32,
    pub employees: String,
    pub annual_revenue: String,
    pub global_rank: i64,
    pub visits: String,
    pub bounce_rate: String,
    pub avg_visit_duration: String,
    /// Competitor identifiers in display order. May contain duplicates.
    #[serde(default)]
    pub competitors: Vec<String>,
}

/// Result of fetching one competitor, keyed by the identifier it was
/// dispatched for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    Fetched { target: String, profile: Profile },
    Failed { target: String, reason: String },
    TimedOut { target: String },
}

impl FetchOutcome {
    #[must_use]
    pub fn target(&self) -> &str {
        match self {
            Self::Fetched { target, .. } | Self::Failed { target, .. } | Self::TimedOut { target } => {
                target
            }
        }
    }

    #[must_use]
    pub fn profile(&self) -> Option<&Profile> {
        match self {
            Self::Fetched { profile, .. } => Some(profile),
            Self::Failed { .. } | Self::TimedOut { .. } => None,
        }
    }

    /// `true` for failed and timed-out fetches.
    #[must_use]
    pub fn is_absent(&self) -> bool {
        self.profile().is_none()
    }

    #[must_use]
    pub fn into_profile(self) -> Option<Profile> {
        match self {
            Self::Fetched { profile, .. } => Some(profile),
            Self::Failed { .. } | Self::TimedOut { .. } => None,
        }
    }
}

/// The analyzed company plus one outcome per competitor identifier.
///
/// `outcomes[i]` belongs to `company.competitors[i]`; alignment is
/// positional, never by name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisResult {
    /// Normalized identifier the company profile was fetched for.
    pub target: String,
    pub company: Profile,
    pub outcomes: Vec<FetchOutcome>,
}

impl AnalysisResult {
    /// Converts into the wire document, replacing absent outcomes with `None`.
    #[must_use]
    pub fn into_response(self) -> AnalysisResponse {
        AnalysisResponse {
            company: self.company,
            competitors: self
                .outcomes
                .into_iter()
                .map(FetchOutcome::into_profile)
                .collect(),
        }
    }
}

/// JSON body of a successful `/scrape/{website_name}` call.
///
/// `competitors` serializes absent entries as `null` at their position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResponse {
    pub company: Profile,
    pub competitors: Vec<Option<Profile>>,
}


#[cfg(test)]
mod tests {
    use super::fixtures::profile;
    use super::*;

    #[test]
    fn profile_deserializes_without_competitors() {
        let json = serde_json::json!({
            "description": "Search engine",
            "category": "Computers/Search",
            "year_founded": 1998,
            "employees": "100,000+",
            "annual_revenue": "$100B+",
            "global_rank": 1,
            "visits": "80B",
            "bounce_rate": "28%",
            "avg_visit_duration": "00:10:00"
        });
        let parsed: Profile = serde_json::from_value(json).expect("profile");
        assert!(parsed.competitors.is_empty());
        assert_eq!(parsed.global_rank, 1);
    }

    #[test]
    fn profile_rejects_missing_attribute() {
        let json = serde_json::json!({ "description": "incomplete" });
        assert!(serde_json::from_value::<Profile>(json).is_err());
    }

    #[test]
    fn into_response_keeps_positions_and_nulls_absent_outcomes() {
        let result = AnalysisResult {
            target: "microsoft.com".to_string(),
            company: profile("Microsoft", &["apple.com", "google.com", "ibm.com"]),
            outcomes: vec![
                FetchOutcome::Fetched {
                    target: "apple.com".to_string(),
                    profile: profile("Apple", &[]),
                },
                FetchOutcome::TimedOut {
                    target: "google.com".to_string(),
                },
                FetchOutcome::Failed {
                    target: "ibm.com".to_string(),
                    reason: "HTTP 503".to_string(),
                },
            ],
        };

        let response = result.into_response();
        assert_eq!(response.competitors.len(), 3);
        assert_eq!(
            response.competitors[0].as_ref().map(|p| p.description.as_str()),
            Some("Apple")
        );
        assert!(response.competitors[1].is_none());
        assert!(response.competitors[2].is_none());

        let json = serde_json::to_value(&response).expect("serialize");
        assert!(json["competitors"][1].is_null());
        assert_eq!(json["company"]["competitors"][1], "google.com");
    }

    #[test]
    fn outcome_accessors() {
        let timed_out = FetchOutcome::TimedOut {
            target: "google.com".to_string(),
        };
        assert_eq!(timed_out.target(), "google.com");
        assert!(timed_out.is_absent());

        let fetched = FetchOutcome::Fetched {
            target: "apple.com".to_string(),
            profile: profile("Apple", &[]),
        };
        assert!(!fetched.is_absent());
        assert_eq!(fetched.profile().map(|p| p.year_founded), Some(1975));
    }
}
