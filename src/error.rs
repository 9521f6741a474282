use thiserror::Error;

#[derive(Debug, Error)]
pub enum AxonError {
    #[error("Config error: {0}")]
    Config(String),

    #[error("Unknown review status: {0}")]
    UnknownReviewStatus(String),

    #[error("Unknown review priority: {0}")]
    UnknownReviewPriority(String),

    #[error("Unknown event status: {0}")]
    UnknownEventStatus(String),

    #[error("Unknown priority tier: {0}")]
    UnknownPriorityTier(String),

    #[error("Reviewer count must be between 2 and 5, got {0}")]
    InvalidReviewerCount(u8),

    #[error("File rejected: {0}")]
    RejectedFile(String),

    #[error("Invalid date `{0}`")]
    InvalidDate(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Failure of the asynchronous submission boundary.
///
/// The wizard keeps the draft intact for every variant except
/// [`AlreadySubmitted`](SubmissionError::AlreadySubmitted).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmissionError {
    #[error("submission rejected: {0}")]
    Rejected(String),

    #[error("submission timed out after {after_ms}ms")]
    TimedOut { after_ms: u64 },

    #[error("submission cancelled")]
    Cancelled,

    #[error("submission is only available at the confirmation step")]
    NotAtConfirmation,

    #[error("a submission for this draft is already in flight")]
    InFlight,

    #[error("this draft has already been submitted")]
    AlreadySubmitted,
}
