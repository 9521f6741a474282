use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::watch;
use tokio::time::sleep;
use uuid::Uuid;

use super::draft::ManuscriptDraft;
use crate::error::SubmissionError;

/// Lifecycle of the single asynchronous submission boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitState {
    Idle,
    InFlight,
    Succeeded(SubmissionReceipt),
    Failed(SubmissionError),
}

impl SubmitState {
    /// Whether the submit control may be invoked.
    pub fn accepts_submit(&self) -> bool {
        matches!(self, SubmitState::Idle | SubmitState::Failed(_))
    }
}

impl fmt::Display for SubmitState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SubmitState::Idle => write!(f, "IDLE"),
            SubmitState::InFlight => write!(f, "IN_FLIGHT"),
            SubmitState::Succeeded(_) => write!(f, "SUCCEEDED"),
            SubmitState::Failed(_) => write!(f, "FAILED"),
        }
    }
}

/// Acknowledgement returned by a [`SubmissionSink`] for an accepted manuscript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionReceipt {
    pub submission_id: String,
    pub title: String,
    pub stake: u32,
    pub reviewers: u8,
    pub submitted_at: DateTime<Utc>,
    /// End of the expected review window for the chosen priority tier.
    pub due_at: DateTime<Utc>,
}

impl SubmissionReceipt {
    pub fn for_draft(draft: &ManuscriptDraft, stake: u32) -> Self {
        let now = Utc::now();
        let (_, max_days) = draft.priority.turnaround_days();
        Self {
            submission_id: Uuid::new_v4().to_string(),
            title: draft.title.clone(),
            stake,
            reviewers: draft.reviewer_count.get(),
            submitted_at: now,
            due_at: now + chrono::Duration::days(i64::from(max_days)),
        }
    }
}

/// Accepts a staged manuscript together with the stake displayed to the author.
pub trait SubmissionSink {
    async fn submit(
        &self,
        draft: &ManuscriptDraft,
        stake: u32,
    ) -> Result<SubmissionReceipt, SubmissionError>;
}

/// Stand-in for the network submission: waits, then accepts.
pub struct SimulatedSink {
    latency: Duration,
}

impl SimulatedSink {
    pub fn new(latency: Duration) -> Self {
        Self { latency }
    }
}

impl SubmissionSink for SimulatedSink {
    async fn submit(
        &self,
        draft: &ManuscriptDraft,
        stake: u32,
    ) -> Result<SubmissionReceipt, SubmissionError> {
        sleep(self.latency).await;
        Ok(SubmissionReceipt::for_draft(draft, stake))
    }
}

/// Cooperative cancellation for an in-flight submission.
#[derive(Debug, Clone)]
pub struct CancelToken(Arc<watch::Sender<bool>>);

impl Default for CancelToken {
    fn default() -> Self {
        Self::new()
    }
}

impl CancelToken {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(false);
        Self(Arc::new(tx))
    }

    pub fn cancel(&self) {
        self.0.send_replace(true);
    }

    pub fn is_cancelled(&self) -> bool {
        *self.0.borrow()
    }

    /// Resolves once [`cancel`](Self::cancel) has been called.
    pub async fn cancelled(&self) {
        let mut rx = self.0.subscribe();
        // The sender lives in `self`, so the channel cannot close while we wait.
        let _ = rx.wait_for(|cancelled| *cancelled).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wizard::{PriorityTier, ReviewerCount};

    #[test]
    fn receipt_due_date_uses_upper_turnaround() {
        let draft = ManuscriptDraft {
            title: "Sparse Transformers".into(),
            priority: PriorityTier::Urgent,
            reviewer_count: ReviewerCount::new(4).unwrap(),
            ..Default::default()
        };
        let receipt = SubmissionReceipt::for_draft(&draft, 220);
        assert_eq!((receipt.due_at - receipt.submitted_at).num_days(), 10);
        assert_eq!(receipt.reviewers, 4);
        assert_eq!(receipt.stake, 220);
        assert_eq!(receipt.title, "Sparse Transformers");
    }

    #[test]
    fn submit_state_gate() {
        assert!(SubmitState::Idle.accepts_submit());
        assert!(SubmitState::Failed(SubmissionError::Cancelled).accepts_submit());
        assert!(!SubmitState::InFlight.accepts_submit());
        assert_eq!(SubmitState::InFlight.to_string(), "IN_FLIGHT");
    }

    #[tokio::test]
    async fn simulated_sink_accepts_after_latency() {
        let sink = SimulatedSink::new(Duration::from_millis(1));
        let draft = ManuscriptDraft::default();
        let receipt = sink.submit(&draft, 95).await.unwrap();
        assert_eq!(receipt.stake, 95);
        assert!(!receipt.submission_id.is_empty());
    }

    #[tokio::test]
    async fn cancel_token_resolves_after_cancel() {
        let token = CancelToken::new();
        assert!(!token.is_cancelled());
        let waiter = token.clone();
        let handle = tokio::spawn(async move { waiter.cancelled().await });
        token.cancel();
        handle.await.unwrap();
        assert!(token.is_cancelled());
    }
}
