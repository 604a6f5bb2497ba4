use rivalguru_core::FetchOutcome;

/// Per-kind outcome counts, for logging.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AnalysisSummary {
    pub fetched: usize,
    pub failed: usize,
    pub timed_out: usize,
}

impl AnalysisSummary {
    #[must_use]
    pub fn from_outcomes(outcomes: &[FetchOutcome]) -> Self {
        outcomes.iter().fold(Self::default(), |mut acc, outcome| {
            match outcome {
                FetchOutcome::Fetched { .. } => acc.fetched += 1,
                FetchOutcome::Failed { .. } => acc.failed += 1,
                FetchOutcome::TimedOut { .. } => acc.timed_out += 1,
            }
            acc
        })
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.fetched + self.failed + self.timed_out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_each_outcome_kind() {
        let outcomes = vec![
            FetchOutcome::Failed {
                target: "a.com".to_string(),
                reason: "boom".to_string(),
            },
            FetchOutcome::TimedOut {
                target: "b.com".to_string(),
            },
            FetchOutcome::TimedOut {
                target: "c.com".to_string(),
            },
        ];
        let summary = AnalysisSummary::from_outcomes(&outcomes);
        assert_eq!(summary.fetched, 0);
        assert_eq!(summary.failed, 1);
        assert_eq!(summary.timed_out, 2);
        assert_eq!(summary.total(), 3);
    }

    #[test]
    fn empty_outcomes_are_all_zero() {
        assert_eq!(AnalysisSummary::from_outcomes(&[]), AnalysisSummary::default());
    }
}
