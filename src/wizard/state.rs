use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::time::timeout;
use tracing::{debug, info, warn};

use super::draft::{FileRef, ManuscriptDraft, PriorityTier, ReviewerCount, ValidationGap};
use super::submit::{CancelToken, SubmissionReceipt, SubmissionSink, SubmitState};
use crate::cost::StakingCostCalculator;
use crate::error::SubmissionError;

/// The four steps of the submission wizard.
///
/// Each session flows through: INFO → FILE → SETTINGS → CONFIRM
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Step {
    Info,
    File,
    Settings,
    Confirm,
}

impl Step {
    pub const ALL: [Step; 4] = [Step::Info, Step::File, Step::Settings, Step::Confirm];

    /// One-based position, always within `1..=4`.
    pub fn index(self) -> u8 {
        match self {
            Step::Info => 1,
            Step::File => 2,
            Step::Settings => 3,
            Step::Confirm => 4,
        }
    }

    pub fn next(self) -> Option<Step> {
        match self {
            Step::Info => Some(Step::File),
            Step::File => Some(Step::Settings),
            Step::Settings => Some(Step::Confirm),
            Step::Confirm => None,
        }
    }

    pub fn prev(self) -> Option<Step> {
        match self {
            Step::Info => None,
            Step::File => Some(Step::Info),
            Step::Settings => Some(Step::File),
            Step::Confirm => Some(Step::Settings),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Step::Info => "Manuscript Info",
            Step::File => "File Upload",
            Step::Settings => "Review Settings",
            Step::Confirm => "Confirmation",
        }
    }

    /// Badge state of `self` as seen from `current`.
    pub fn badge(self, current: Step) -> StepBadge {
        if self < current {
            StepBadge::Completed
        } else if self == current {
            StepBadge::Current
        } else {
            StepBadge::Upcoming
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Step::Info => write!(f, "INFO"),
            Step::File => write!(f, "FILE"),
            Step::Settings => write!(f, "SETTINGS"),
            Step::Confirm => write!(f, "CONFIRM"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepBadge {
    Completed,
    Current,
    Upcoming,
}

/// The result of asking the wizard to move forward.
#[derive(Debug, Clone, PartialEq)]
pub enum Advance {
    /// Moved to the given step.
    Moved(Step),
    /// Validation failed; the step did not change.
    Blocked(Vec<ValidationGap>),
    /// Already at the confirmation step, where only submit is available.
    AtFinalStep,
}

/// Drives one manuscript through the four-step submission flow.
///
/// The wizard exclusively owns its draft. Dropping the wizard abandons
/// the session and discards everything entered so far.
#[derive(Debug)]
pub struct SubmissionWizard {
    draft: ManuscriptDraft,
    step: Step,
    staking_cost: u32,
    submit_state: SubmitState,
    submit_timeout: Duration,
}

impl SubmissionWizard {
    pub fn new(draft: ManuscriptDraft, submit_timeout: Duration) -> Self {
        let staking_cost = StakingCostCalculator::cost(draft.reviewer_count, draft.priority);
        Self {
            draft,
            step: Step::Info,
            staking_cost,
            submit_state: SubmitState::Idle,
            submit_timeout,
        }
    }

    pub fn step(&self) -> Step {
        self.step
    }

    pub fn draft(&self) -> &ManuscriptDraft {
        &self.draft
    }

    pub fn submit_state(&self) -> &SubmitState {
        &self.submit_state
    }

    /// The staking cost currently displayed for the review settings.
    pub fn staking_cost(&self) -> u32 {
        self.staking_cost
    }

    /// Progress through the flow as a percentage.
    pub fn progress_percent(&self) -> u8 {
        self.step.index() * 25
    }

    // Edits are frozen while a submission is in flight or once it succeeded.
    fn editable(&self) -> bool {
        self.submit_state.accepts_submit()
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        if self.editable() {
            self.draft.title = title.into();
        }
    }

    pub fn set_abstract(&mut self, text: impl Into<String>) {
        if self.editable() {
            self.draft.abstract_text = text.into();
        }
    }

    pub fn set_keywords(&mut self, keywords: impl Into<String>) {
        if self.editable() {
            self.draft.keywords = keywords.into();
        }
    }

    pub fn set_category(&mut self, category: impl Into<String>) {
        if self.editable() {
            self.draft.category = category.into();
        }
    }

    pub fn attach_file(&mut self, file: FileRef) {
        if self.editable() {
            debug!(name = %file.name, size = file.size_bytes, "file attached");
            self.draft.file = Some(file);
        }
    }

    pub fn remove_file(&mut self) {
        if self.editable() {
            self.draft.file = None;
        }
    }

    pub fn set_reviewer_count(&mut self, count: ReviewerCount) {
        if self.editable() {
            self.draft.reviewer_count = count;
            self.recompute_cost();
        }
    }

    pub fn set_priority(&mut self, priority: PriorityTier) {
        if self.editable() {
            self.draft.priority = priority;
            self.recompute_cost();
        }
    }

    fn recompute_cost(&mut self) {
        self.staking_cost =
            StakingCostCalculator::cost(self.draft.reviewer_count, self.draft.priority);
        debug!(cost = self.staking_cost, "staking cost recomputed");
    }

    /// Inputs still missing before `step` may be left.
    ///
    /// The settings step always carries valid defaults. The confirmation
    /// step has no forward transition.
    pub fn validation_gaps(&self, step: Step) -> Vec<ValidationGap> {
        match step {
            Step::Info => self.draft.info_gaps(),
            Step::File => self.draft.file_gaps(),
            Step::Settings | Step::Confirm => Vec::new(),
        }
    }

    pub fn can_proceed(&self, step: Step) -> bool {
        step != Step::Confirm && self.validation_gaps(step).is_empty()
    }

    /// Move forward one step if the current step validates.
    pub fn advance(&mut self) -> Advance {
        if !self.editable() {
            return Advance::Blocked(Vec::new());
        }
        let Some(next) = self.step.next() else {
            return Advance::AtFinalStep;
        };
        if !self.can_proceed(self.step) {
            let gaps = self.validation_gaps(self.step);
            warn!(step = %self.step, gaps = gaps.len(), "advance blocked");
            return Advance::Blocked(gaps);
        }
        debug!(from = %self.step, to = %next, "advance");
        self.step = next;
        Advance::Moved(next)
    }

    /// Move back one step, stopping at the first. Never validated.
    pub fn retreat(&mut self) -> Step {
        if !self.editable() {
            return self.step;
        }
        if let Some(prev) = self.step.prev() {
            debug!(from = %self.step, to = %prev, "retreat");
            self.step = prev;
        }
        self.step
    }

    /// Hand the draft and the displayed stake to `sink`.
    ///
    /// A single attempt is made. On success the draft is discarded and the
    /// receipt returned; the caller moves on to the timeline. On failure the
    /// wizard stays at the confirmation step with the draft intact and may be
    /// submitted again.
    pub async fn submit(
        &mut self,
        sink: &impl SubmissionSink,
        cancel: &CancelToken,
    ) -> Result<SubmissionReceipt, SubmissionError> {
        match &self.submit_state {
            SubmitState::InFlight => return Err(SubmissionError::InFlight),
            SubmitState::Succeeded(_) => return Err(SubmissionError::AlreadySubmitted),
            SubmitState::Idle | SubmitState::Failed(_) => {}
        }
        if self.step != Step::Confirm {
            return Err(SubmissionError::NotAtConfirmation);
        }

        let stake = self.staking_cost;
        let limit = self.submit_timeout;
        info!(title = %self.draft.title, stake, "submitting manuscript");
        let mut in_flight = InFlightGuard::enter(&mut self.submit_state);

        let outcome = tokio::select! {
            result = timeout(limit, sink.submit(&self.draft, stake)) => match result {
                Ok(inner) => inner,
                Err(_) => Err(SubmissionError::TimedOut {
                    after_ms: whole_millis(limit),
                }),
            },
            _ = cancel.cancelled() => Err(SubmissionError::Cancelled),
        };

        match outcome {
            Ok(receipt) => {
                info!(id = %receipt.submission_id, "submission accepted");
                self.draft = ManuscriptDraft::default();
                in_flight.settle(SubmitState::Succeeded(receipt.clone()));
                Ok(receipt)
            }
            Err(err) => {
                warn!(error = %err, "submission failed");
                in_flight.settle(SubmitState::Failed(err.clone()));
                Err(err)
            }
        }
    }
}

fn whole_millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

/// Holds the submit state at `InFlight` for the duration of one attempt.
///
/// If the attempt is dropped before it settles, the state falls back to
/// `Failed(Cancelled)` so the draft becomes editable again.
struct InFlightGuard<'a> {
    state: &'a mut SubmitState,
}

impl<'a> InFlightGuard<'a> {
    fn enter(state: &'a mut SubmitState) -> Self {
        *state = SubmitState::InFlight;
        Self { state }
    }

    fn settle(&mut self, next: SubmitState) {
        *self.state = next;
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        if *self.state == SubmitState::InFlight {
            warn!("submission dropped while in flight");
            *self.state = SubmitState::Failed(SubmissionError::Cancelled);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::{Cell, RefCell};

    fn make_wizard() -> SubmissionWizard {
        SubmissionWizard::new(ManuscriptDraft::default(), Duration::from_secs(5))
    }

    fn fill_info(wizard: &mut SubmissionWizard) {
        wizard.set_title("Advanced Neural Architecture Search");
        wizard.set_abstract("We search architectures.");
        wizard.set_keywords("nas, automl");
        wizard.set_category("Machine Learning");
    }

    fn wizard_at_confirm() -> SubmissionWizard {
        let mut wizard = make_wizard();
        fill_info(&mut wizard);
        wizard.advance();
        wizard.attach_file(FileRef::new("paper.pdf", 1024));
        wizard.advance();
        wizard.advance();
        assert_eq!(wizard.step(), Step::Confirm);
        wizard
    }

    struct RecordingSink {
        calls: Cell<u32>,
        stakes: RefCell<Vec<u32>>,
        fail: bool,
    }

    impl RecordingSink {
        fn ok() -> Self {
            Self { calls: Cell::new(0), stakes: RefCell::new(Vec::new()), fail: false }
        }
        fn failing() -> Self {
            Self { fail: true, ..Self::ok() }
        }
    }

    impl SubmissionSink for RecordingSink {
        async fn submit(
            &self,
            draft: &ManuscriptDraft,
            stake: u32,
        ) -> Result<SubmissionReceipt, SubmissionError> {
            self.calls.set(self.calls.get() + 1);
            self.stakes.borrow_mut().push(stake);
            if self.fail {
                Err(SubmissionError::Rejected("insufficient balance".into()))
            } else {
                Ok(SubmissionReceipt::for_draft(draft, stake))
            }
        }
    }

    struct HangingSink;

    impl SubmissionSink for HangingSink {
        async fn submit(
            &self,
            _draft: &ManuscriptDraft,
            _stake: u32,
        ) -> Result<SubmissionReceipt, SubmissionError> {
            std::future::pending().await
        }
    }

    #[test]
    fn starts_at_info_with_default_cost() {
        let wizard = make_wizard();
        assert_eq!(wizard.step(), Step::Info);
        assert_eq!(wizard.staking_cost(), 95);
        assert_eq!(wizard.progress_percent(), 25);
        assert_eq!(*wizard.submit_state(), SubmitState::Idle);
    }

    #[test]
    fn info_step_requires_all_four_fields() {
        // Every subset of the four fields; only the full set may proceed.
        for mask in 0u8..16 {
            let mut wizard = make_wizard();
            if mask & 1 != 0 {
                wizard.set_title("t");
            }
            if mask & 2 != 0 {
                wizard.set_abstract("a");
            }
            if mask & 4 != 0 {
                wizard.set_keywords("k");
            }
            if mask & 8 != 0 {
                wizard.set_category("c");
            }
            assert_eq!(wizard.can_proceed(Step::Info), mask == 15, "mask {mask:04b}");
        }
    }

    #[test]
    fn blocked_advance_keeps_step() {
        let mut wizard = make_wizard();
        wizard.set_title("Only a title");
        let result = wizard.advance();
        assert_eq!(
            result,
            Advance::Blocked(vec![
                ValidationGap::Abstract,
                ValidationGap::Keywords,
                ValidationGap::Category
            ])
        );
        assert_eq!(wizard.step(), Step::Info);
    }

    #[test]
    fn file_step_requires_file() {
        let mut wizard = make_wizard();
        fill_info(&mut wizard);
        assert_eq!(wizard.advance(), Advance::Moved(Step::File));
        assert!(!wizard.can_proceed(Step::File));
        assert_eq!(wizard.advance(), Advance::Blocked(vec![ValidationGap::File]));

        wizard.attach_file(FileRef::new("paper.pdf", 2048));
        assert!(wizard.can_proceed(Step::File));

        wizard.remove_file();
        assert!(!wizard.can_proceed(Step::File));
    }

    #[test]
    fn settings_step_always_proceeds() {
        let wizard = make_wizard();
        assert!(wizard.can_proceed(Step::Settings));
        assert!(!wizard.can_proceed(Step::Confirm));
    }

    #[test]
    fn happy_path_walks_all_steps() {
        let mut wizard = wizard_at_confirm();
        assert_eq!(wizard.progress_percent(), 100);
        assert_eq!(wizard.advance(), Advance::AtFinalStep);
        assert_eq!(wizard.step(), Step::Confirm);
    }

    #[test]
    fn retreat_is_floored_and_unvalidated() {
        let mut wizard = wizard_at_confirm();
        wizard.remove_file();
        assert_eq!(wizard.retreat(), Step::Settings);
        assert_eq!(wizard.retreat(), Step::File);
        assert_eq!(wizard.retreat(), Step::Info);
        assert_eq!(wizard.retreat(), Step::Info);
    }

    #[test]
    fn step_index_stays_in_range() {
        let mut wizard = make_wizard();
        fill_info(&mut wizard);
        wizard.attach_file(FileRef::new("paper.tex", 10));
        let moves = [true, true, true, true, true, false, false, false, false, false, true, false];
        for forward in moves {
            if forward {
                wizard.advance();
            } else {
                wizard.retreat();
            }
            assert!((1..=4).contains(&wizard.step().index()));
        }
    }

    #[test]
    fn cost_follows_settings() {
        let mut wizard = make_wizard();
        wizard.set_reviewer_count(ReviewerCount::new(5).unwrap());
        assert_eq!(wizard.staking_cost(), 125);
        wizard.set_priority(PriorityTier::Urgent);
        assert_eq!(wizard.staking_cost(), 250);
        wizard.set_reviewer_count(ReviewerCount::new(2).unwrap());
        assert_eq!(wizard.staking_cost(), 160);
    }

    #[test]
    fn step_badges() {
        assert_eq!(Step::Info.badge(Step::Settings), StepBadge::Completed);
        assert_eq!(Step::Settings.badge(Step::Settings), StepBadge::Current);
        assert_eq!(Step::Confirm.badge(Step::Settings), StepBadge::Upcoming);
        assert_eq!(Step::File.label(), "File Upload");
    }

    #[tokio::test]
    async fn submit_passes_displayed_cost_and_discards_draft() {
        let mut wizard = wizard_at_confirm();
        wizard.set_priority(PriorityTier::Urgent);
        let displayed = wizard.staking_cost();
        let sink = RecordingSink::ok();

        let receipt = wizard.submit(&sink, &CancelToken::new()).await.unwrap();

        assert_eq!(receipt.stake, displayed);
        assert_eq!(*sink.stakes.borrow(), vec![190]);
        assert_eq!(*wizard.draft(), ManuscriptDraft::default());
        assert!(matches!(wizard.submit_state(), SubmitState::Succeeded(_)));

        let again = wizard.submit(&sink, &CancelToken::new()).await;
        assert_eq!(again, Err(SubmissionError::AlreadySubmitted));
        assert_eq!(sink.calls.get(), 1);
    }

    #[tokio::test]
    async fn submit_failure_keeps_draft_at_confirm() {
        let mut wizard = wizard_at_confirm();
        let before = wizard.draft().clone();
        let sink = RecordingSink::failing();

        let err = wizard.submit(&sink, &CancelToken::new()).await.unwrap_err();

        assert_eq!(err, SubmissionError::Rejected("insufficient balance".into()));
        assert_eq!(wizard.step(), Step::Confirm);
        assert_eq!(*wizard.draft(), before);
        assert!(matches!(wizard.submit_state(), SubmitState::Failed(_)));

        // A later click is a fresh single attempt.
        let _ = wizard.submit(&sink, &CancelToken::new()).await;
        assert_eq!(sink.calls.get(), 2);
    }

    #[tokio::test]
    async fn submit_requires_confirmation_step() {
        let mut wizard = make_wizard();
        let sink = RecordingSink::ok();
        let result = wizard.submit(&sink, &CancelToken::new()).await;
        assert_eq!(result, Err(SubmissionError::NotAtConfirmation));
        assert_eq!(sink.calls.get(), 0);
        assert_eq!(*wizard.submit_state(), SubmitState::Idle);
    }

    #[tokio::test]
    async fn submit_times_out() {
        let mut wizard = wizard_at_confirm();
        wizard.submit_timeout = Duration::from_millis(20);

        let err = wizard.submit(&HangingSink, &CancelToken::new()).await.unwrap_err();

        assert_eq!(err, SubmissionError::TimedOut { after_ms: 20 });
        assert_eq!(wizard.step(), Step::Confirm);
        assert!(!wizard.draft().title.is_empty());
    }

    #[tokio::test]
    async fn submit_can_be_cancelled() {
        let mut wizard = wizard_at_confirm();
        let cancel = CancelToken::new();
        cancel.cancel();

        let err = wizard.submit(&HangingSink, &cancel).await.unwrap_err();

        assert_eq!(err, SubmissionError::Cancelled);
        assert_eq!(*wizard.submit_state(), SubmitState::Failed(SubmissionError::Cancelled));
    }

    #[tokio::test]
    async fn dropped_submit_releases_the_draft() {
        let mut wizard = wizard_at_confirm();

        let attempt = timeout(
            Duration::from_millis(10),
            wizard.submit(&HangingSink, &CancelToken::new()),
        )
        .await;
        assert!(attempt.is_err());

        assert!(wizard.submit_state().accepts_submit());
        assert_eq!(*wizard.submit_state(), SubmitState::Failed(SubmissionError::Cancelled));
        wizard.set_title("Revised title");
        assert_eq!(wizard.draft().title, "Revised title");
        assert_eq!(wizard.retreat(), Step::Settings);
    }

    #[test]
    fn timeout_millis_saturate() {
        assert_eq!(whole_millis(Duration::from_millis(20)), 20);
        assert_eq!(whole_millis(Duration::MAX), u64::MAX);
    }

    #[test]
    fn blocked_advance_reports_gaps_only_when_gate_closed() {
        let mut wizard = make_wizard();
        fill_info(&mut wizard);
        assert!(wizard.can_proceed(Step::Info));
        assert_eq!(wizard.advance(), Advance::Moved(Step::File));
        assert!(!wizard.can_proceed(Step::File));
        assert_eq!(wizard.advance(), Advance::Blocked(vec![ValidationGap::File]));
    }
}
