//! Typed search errors.
//!
//! `SearchError` represents pre-flight failures only. Runtime outcomes
//! (solution found, depth limit reached, budget exhausted, oracle contract
//! violations) are expressed via [`crate::report::TerminationReasonV1`] and
//! always produce a [`crate::report::SolveReportV1`].

/// Typed failure for pre-flight policy validation.
///
/// These errors are returned before any iteration runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    /// The policy asks for something the controller cannot do.
    InvalidPolicy { detail: String },
}

impl std::fmt::Display for SearchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidPolicy { detail } => write!(f, "invalid search policy: {detail}"),
        }
    }
}

impl std::error::Error for SearchError {}
