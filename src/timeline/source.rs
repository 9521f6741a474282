use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};

use super::event::{EventKind, EventStatus, TimelineEvent};
use crate::error::AxonError;

/// Supplies the ordered event log, newest first.
pub trait EventSource {
    fn events(&self) -> Result<Vec<TimelineEvent>, AxonError>;
}

/// Fixed activity log used until a live query is connected.
pub struct SampleEventSource;

fn at(rfc3339: &str) -> Result<DateTime<Utc>, AxonError> {
    DateTime::parse_from_rfc3339(rfc3339)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| AxonError::InvalidDate(rfc3339.to_string()))
}

impl EventSource for SampleEventSource {
    fn events(&self) -> Result<Vec<TimelineEvent>, AxonError> {
        Ok(vec![
            TimelineEvent {
                id: 1,
                title: "Advanced Neural Architecture Search".into(),
                timestamp: at("2024-01-15T10:30:00Z")?,
                status: EventStatus::UnderReview,
                kind: EventKind::Submission {
                    author: "Dr. Sarah Chen".into(),
                    tokens_staked: 50,
                    reviewers: 3,
                    due_date: Some(at("2024-02-15T23:59:00Z")?),
                },
            },
            TimelineEvent {
                id: 2,
                title: "Quantum Computing Applications in ML".into(),
                timestamp: at("2024-01-14T16:45:00Z")?,
                status: EventStatus::Completed,
                kind: EventKind::ReviewCompleted {
                    reviewer: "Dr. Michael Rodriguez".into(),
                    tokens_earned: 25,
                    rating: Some(4.8),
                },
            },
            TimelineEvent {
                id: 3,
                title: "Federated Learning with Privacy Preservation".into(),
                timestamp: at("2024-01-13T14:20:00Z")?,
                status: EventStatus::Accepted,
                kind: EventKind::SubmissionAccepted {
                    author: "Dr. Emily Watson".into(),
                    tokens_released: 75,
                    final_rating: Some(4.9),
                },
            },
            TimelineEvent {
                id: 4,
                title: "Transformer Architecture Improvements".into(),
                timestamp: at("2024-01-12T09:15:00Z")?,
                status: EventStatus::InProgress,
                kind: EventKind::ReviewAssignment {
                    assigned_to: "Dr. Sarah Chen".into(),
                    tokens_staked: 50,
                    deadline: Some(at("2024-01-26T23:59:00Z")?),
                },
            },
            TimelineEvent {
                id: 5,
                title: "Basic CNN Implementation Study".into(),
                timestamp: at("2024-01-11T11:30:00Z")?,
                status: EventStatus::Rejected,
                kind: EventKind::SubmissionRejected {
                    author: "John Smith".into(),
                    reason: Some("Insufficient novelty and methodology issues".into()),
                    tokens_slashed: 30,
                },
            },
        ])
    }
}

/// Event log read from a JSON array, order preserved.
pub struct JsonEventSource {
    path: PathBuf,
}

impl JsonEventSource {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl EventSource for JsonEventSource {
    fn events(&self) -> Result<Vec<TimelineEvent>, AxonError> {
        let contents = std::fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&contents)?)
    }
}
