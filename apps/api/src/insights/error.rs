use thiserror::Error;

/// Failure modes of the insight refresh. Everything except `Configuration`
/// and `RunInProgress` is scoped to a single user.
#[derive(Debug, Error)]
pub enum InsightError {
    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("generation failed: {0}")]
    Generation(String),

    #[error("malformed generation response: {0}")]
    MalformedResponse(String),

    #[error("profile not eligible for insights: {0}")]
    InvalidProfile(String),

    #[error("persistence error: {0}")]
    Persistence(#[from] sqlx::Error),

    #[error("an insight refresh run is already in progress")]
    RunInProgress,
}

impl InsightError {
    /// Stable short label used in run summaries and logs.
    pub fn kind(&self) -> &'static str {
        match self {
            InsightError::Configuration(_) => "configuration",
            InsightError::Generation(_) => "generation",
            InsightError::MalformedResponse(_) => "malformed_response",
            InsightError::InvalidProfile(_) => "invalid_profile",
            InsightError::Persistence(_) => "persistence",
            InsightError::RunInProgress => "run_in_progress",
        }
    }
}
