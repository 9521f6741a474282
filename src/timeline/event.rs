use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::AxonError;
use crate::review::ColorBand;
use crate::wizard::SubmissionReceipt;

/// Status carried by a timeline event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventStatus {
    UnderReview,
    Completed,
    Accepted,
    InProgress,
    Rejected,
}

impl EventStatus {
    pub const ALL: [EventStatus; 5] = [
        EventStatus::UnderReview,
        EventStatus::Completed,
        EventStatus::Accepted,
        EventStatus::InProgress,
        EventStatus::Rejected,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            EventStatus::UnderReview => "under_review",
            EventStatus::Completed => "completed",
            EventStatus::Accepted => "accepted",
            EventStatus::InProgress => "in_progress",
            EventStatus::Rejected => "rejected",
        }
    }

    /// Badge text, e.g. `UNDER REVIEW`.
    pub fn label(self) -> String {
        self.as_str().replacen('_', " ", 1).to_uppercase()
    }

    pub fn treatment(self) -> ColorBand {
        match self {
            EventStatus::UnderReview => ColorBand::Amber,
            EventStatus::Completed | EventStatus::Accepted => ColorBand::Green,
            EventStatus::InProgress => ColorBand::Blue,
            EventStatus::Rejected => ColorBand::Red,
        }
    }
}

impl FromStr for EventStatus {
    type Err = AxonError;

    /// Exact, case-sensitive match against the wire names.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EventStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| AxonError::UnknownEventStatus(s.to_string()))
    }
}

impl fmt::Display for EventStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Icon tone for an event type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventTone {
    Neutral,
    Positive,
    Info,
    Negative,
}

/// Variant-specific payload of a timeline event, keyed by `type`.
///
/// Each variant carries exactly one participant and exactly one token
/// movement, so the token fields cannot overlap.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EventKind {
    Submission {
        author: String,
        tokens_staked: u32,
        reviewers: u8,
        due_date: Option<DateTime<Utc>>,
    },
    ReviewCompleted {
        reviewer: String,
        tokens_earned: u32,
        rating: Option<f32>,
    },
    SubmissionAccepted {
        author: String,
        tokens_released: u32,
        final_rating: Option<f32>,
    },
    ReviewAssignment {
        assigned_to: String,
        tokens_staked: u32,
        deadline: Option<DateTime<Utc>>,
    },
    SubmissionRejected {
        author: String,
        reason: Option<String>,
        tokens_slashed: u32,
    },
}

impl EventKind {
    pub fn type_name(&self) -> &'static str {
        match self {
            EventKind::Submission { .. } => "submission",
            EventKind::ReviewCompleted { .. } => "review_completed",
            EventKind::SubmissionAccepted { .. } => "submission_accepted",
            EventKind::ReviewAssignment { .. } => "review_assignment",
            EventKind::SubmissionRejected { .. } => "submission_rejected",
        }
    }

    pub fn author(&self) -> Option<&str> {
        match self {
            EventKind::Submission { author, .. }
            | EventKind::SubmissionAccepted { author, .. }
            | EventKind::SubmissionRejected { author, .. } => Some(author.as_str()),
            EventKind::ReviewCompleted { .. } | EventKind::ReviewAssignment { .. } => None,
        }
    }

    /// The reviewer tied to the event. For an assignment this is the assignee.
    pub fn reviewer(&self) -> Option<&str> {
        match self {
            EventKind::ReviewCompleted { reviewer, .. } => Some(reviewer.as_str()),
            EventKind::ReviewAssignment { assigned_to, .. } => Some(assigned_to.as_str()),
            EventKind::Submission { .. }
            | EventKind::SubmissionAccepted { .. }
            | EventKind::SubmissionRejected { .. } => None,
        }
    }

    pub fn tokens(&self) -> TokenMovement {
        match self {
            EventKind::Submission { tokens_staked, .. }
            | EventKind::ReviewAssignment { tokens_staked, .. } => {
                TokenMovement::Staked(*tokens_staked)
            }
            EventKind::ReviewCompleted { tokens_earned, .. } => {
                TokenMovement::Earned(*tokens_earned)
            }
            EventKind::SubmissionAccepted {
                tokens_released, ..
            } => TokenMovement::Released(*tokens_released),
            EventKind::SubmissionRejected { tokens_slashed, .. } => {
                TokenMovement::Slashed(*tokens_slashed)
            }
        }
    }

    pub fn tone(&self) -> EventTone {
        match self {
            EventKind::Submission { .. } => EventTone::Neutral,
            EventKind::ReviewCompleted { .. } | EventKind::SubmissionAccepted { .. } => {
                EventTone::Positive
            }
            EventKind::ReviewAssignment { .. } => EventTone::Info,
            EventKind::SubmissionRejected { .. } => EventTone::Negative,
        }
    }
}

/// The single token movement recorded by an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenMovement {
    Staked(u32),
    Earned(u32),
    Released(u32),
    Slashed(u32),
}

impl fmt::Display for TokenMovement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenMovement::Staked(n) => write!(f, "Tokens Staked: {n} AXON"),
            TokenMovement::Earned(n) => write!(f, "Tokens Earned: {n} AXON"),
            TokenMovement::Released(n) => write!(f, "Tokens Released: {n} AXON"),
            TokenMovement::Slashed(n) => write!(f, "Tokens Slashed: {n} AXON"),
        }
    }
}

/// An immutable record of a manuscript lifecycle occurrence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineEvent {
    pub id: u64,
    pub title: String,
    pub timestamp: DateTime<Utc>,
    pub status: EventStatus,
    #[serde(flatten)]
    pub kind: EventKind,
}

impl TimelineEvent {
    /// The `submission` event recorded for an accepted receipt.
    pub fn from_receipt(id: u64, author: impl Into<String>, receipt: &SubmissionReceipt) -> Self {
        Self {
            id,
            title: receipt.title.clone(),
            timestamp: receipt.submitted_at,
            status: EventStatus::UnderReview,
            kind: EventKind::Submission {
                author: author.into(),
                tokens_staked: receipt.stake,
                reviewers: receipt.reviewers,
                due_date: Some(receipt.due_at),
            },
        }
    }
}

/// Put the event for `receipt` at the head of `events` and return its id.
///
/// The id is one past the largest id already present.
pub fn record_submission(
    events: &mut Vec<TimelineEvent>,
    author: impl Into<String>,
    receipt: &SubmissionReceipt,
) -> u64 {
    let id = events
        .iter()
        .map(|e| e.id)
        .max()
        .map_or(1, |max| max.saturating_add(1));
    events.insert(0, TimelineEvent::from_receipt(id, author, receipt));
    id
}
