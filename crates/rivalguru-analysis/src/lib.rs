//! Competitor analysis: fetch a company profile, then fan out to its
//! competitors under one shared deadline.

pub mod analyzer;
pub mod error;
pub mod summary;

pub use analyzer::Analyzer;
pub use error::AnalysisError;
pub use summary::AnalysisSummary;
