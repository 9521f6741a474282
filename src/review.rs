//! Review queue items and their display classification.
//!
//! Status and priority are closed sets. Values outside them are rejected
//! when a [`ReviewItem`] is deserialized or parsed, never defaulted at
//! render time.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::AxonError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReviewStatus {
    Pending,
    InProgress,
    Completed,
    Overdue,
}

impl ReviewStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            ReviewStatus::Pending => "pending",
            ReviewStatus::InProgress => "in-progress",
            ReviewStatus::Completed => "completed",
            ReviewStatus::Overdue => "overdue",
        }
    }

    /// Badge text: first letter upper-cased, dash replaced by a space.
    pub fn label(self) -> String {
        let spaced = self.as_str().replacen('-', " ", 1);
        let mut chars = spaced.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }

    /// Follow-up action offered to the reviewer, if any.
    pub fn action(self) -> Option<ReviewAction> {
        match self {
            ReviewStatus::Pending => Some(ReviewAction::StartReview),
            ReviewStatus::InProgress => Some(ReviewAction::Continue),
            ReviewStatus::Completed | ReviewStatus::Overdue => None,
        }
    }
}

impl FromStr for ReviewStatus {
    type Err = AxonError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(ReviewStatus::Pending),
            "in-progress" => Ok(ReviewStatus::InProgress),
            "completed" => Ok(ReviewStatus::Completed),
            "overdue" => Ok(ReviewStatus::Overdue),
            other => Err(AxonError::UnknownReviewStatus(other.to_string())),
        }
    }
}

impl fmt::Display for ReviewStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReviewPriority {
    High,
    Medium,
    Low,
}

impl FromStr for ReviewPriority {
    type Err = AxonError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "high" => Ok(ReviewPriority::High),
            "medium" => Ok(ReviewPriority::Medium),
            "low" => Ok(ReviewPriority::Low),
            other => Err(AxonError::UnknownReviewPriority(other.to_string())),
        }
    }
}

impl fmt::Display for ReviewPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReviewPriority::High => write!(f, "high"),
            ReviewPriority::Medium => write!(f, "medium"),
            ReviewPriority::Low => write!(f, "low"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewAction {
    StartReview,
    Continue,
}

impl fmt::Display for ReviewAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReviewAction::StartReview => write!(f, "Start Review"),
            ReviewAction::Continue => write!(f, "Continue"),
        }
    }
}

/// Color family used for status badges.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorBand {
    Amber,
    Blue,
    Green,
    Red,
}

/// Strength of the priority accent on a review card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmphasisBand {
    Critical,
    Elevated,
    Routine,
}

pub fn status_treatment(status: ReviewStatus) -> ColorBand {
    match status {
        ReviewStatus::Pending => ColorBand::Amber,
        ReviewStatus::InProgress => ColorBand::Blue,
        ReviewStatus::Completed => ColorBand::Green,
        ReviewStatus::Overdue => ColorBand::Red,
    }
}

pub fn priority_treatment(priority: ReviewPriority) -> EmphasisBand {
    match priority {
        ReviewPriority::High => EmphasisBand::Critical,
        ReviewPriority::Medium => EmphasisBand::Elevated,
        ReviewPriority::Low => EmphasisBand::Routine,
    }
}

/// A manuscript awaiting or under review by the current reviewer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewItem {
    pub id: String,
    pub title: String,
    pub authors: Vec<String>,
    pub submitted_date: NaiveDate,
    pub due_date: NaiveDate,
    pub status: ReviewStatus,
    pub field: String,
    pub stake_amount: u32,
    pub priority: ReviewPriority,
}

/// Supplies the reviewer's queue.
pub trait ReviewSource {
    fn reviews(&self) -> Result<Vec<ReviewItem>, AxonError>;
}

/// Fixed queue used until a live data source is connected.
pub struct SampleReviewQueue;

fn day(iso: &str) -> Result<NaiveDate, AxonError> {
    NaiveDate::parse_from_str(iso, "%Y-%m-%d").map_err(|_| AxonError::InvalidDate(iso.to_string()))
}

impl ReviewSource for SampleReviewQueue {
    fn reviews(&self) -> Result<Vec<ReviewItem>, AxonError> {
        let item = |id: &str,
                    title: &str,
                    authors: &[&str],
                    submitted: NaiveDate,
                    due: NaiveDate,
                    status: ReviewStatus,
                    field: &str,
                    stake: u32,
                    priority: ReviewPriority| ReviewItem {
            id: id.into(),
            title: title.into(),
            authors: authors.iter().map(|a| a.to_string()).collect(),
            submitted_date: submitted,
            due_date: due,
            status,
            field: field.into(),
            stake_amount: stake,
            priority,
        };

        Ok(vec![
            item(
                "AXN-2024-001",
                "Novel Approaches to Quantum Error Correction Using Machine Learning Algorithms",
                &["Dr. Sarah Chen", "Prof. Michael Rodriguez", "Dr. Aisha Patel"],
                day("2024-01-15")?,
                day("2024-01-22")?,
                ReviewStatus::InProgress,
                "Quantum Computing",
                100,
                ReviewPriority::High,
            ),
            item(
                "AXN-2024-002",
                "Blockchain-Based Supply Chain Transparency in Pharmaceutical Manufacturing",
                &["Dr. James Wilson", "Dr. Lisa Thompson"],
                day("2024-01-18")?,
                day("2024-01-25")?,
                ReviewStatus::Pending,
                "Supply Chain",
                75,
                ReviewPriority::Medium,
            ),
            item(
                "AXN-2024-003",
                "Deep Learning Applications in Climate Change Prediction Models",
                &["Prof. Elena Volkov", "Dr. David Kim", "Research Team Alpha"],
                day("2024-01-10")?,
                day("2024-01-20")?,
                ReviewStatus::Completed,
                "Climate Science",
                120,
                ReviewPriority::High,
            ),
        ])
    }
}

/// Review queue loaded from a JSON array of items.
pub struct JsonReviewQueue {
    path: PathBuf,
}

impl JsonReviewQueue {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl ReviewSource for JsonReviewQueue {
    fn reviews(&self) -> Result<Vec<ReviewItem>, AxonError> {
        let contents = std::fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&contents)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn status_treatment_is_total() {
        assert_eq!(status_treatment(ReviewStatus::Pending), ColorBand::Amber);
        assert_eq!(status_treatment(ReviewStatus::InProgress), ColorBand::Blue);
        assert_eq!(status_treatment(ReviewStatus::Completed), ColorBand::Green);
        assert_eq!(status_treatment(ReviewStatus::Overdue), ColorBand::Red);
    }

    #[test]
    fn priority_treatment_is_total() {
        assert_eq!(priority_treatment(ReviewPriority::High), EmphasisBand::Critical);
        assert_eq!(priority_treatment(ReviewPriority::Medium), EmphasisBand::Elevated);
        assert_eq!(priority_treatment(ReviewPriority::Low), EmphasisBand::Routine);
    }

    #[test]
    fn status_labels_and_actions() {
        assert_eq!(ReviewStatus::InProgress.label(), "In progress");
        assert_eq!(ReviewStatus::Overdue.label(), "Overdue");
        assert_eq!(ReviewStatus::Pending.action(), Some(ReviewAction::StartReview));
        assert_eq!(ReviewStatus::InProgress.action(), Some(ReviewAction::Continue));
        assert_eq!(ReviewStatus::Completed.action(), None);
    }

    #[test]
    fn unknown_values_fail_to_parse() {
        assert!("in_progress".parse::<ReviewStatus>().is_err());
        assert!("urgent".parse::<ReviewPriority>().is_err());
        assert_eq!("in-progress".parse::<ReviewStatus>().unwrap(), ReviewStatus::InProgress);
    }

    #[test]
    fn deserialize_rejects_unknown_status() {
        let json = r#"{
            "id": "AXN-1", "title": "T", "authors": ["A"],
            "submitted_date": "2024-01-01", "due_date": "2024-01-08",
            "status": "archived", "field": "F", "stake_amount": 10, "priority": "low"
        }"#;
        assert!(serde_json::from_str::<ReviewItem>(json).is_err());
    }

    #[test]
    fn deserialize_rejects_malformed_date() {
        let json = r#"{
            "id": "AXN-1", "title": "T", "authors": ["A"],
            "submitted_date": "2024-01-01", "due_date": "next week",
            "status": "pending", "field": "F", "stake_amount": 10, "priority": "low"
        }"#;
        assert!(serde_json::from_str::<ReviewItem>(json).is_err());
    }

    #[test]
    fn sample_dates_are_ordered() {
        for item in SampleReviewQueue.reviews().unwrap() {
            assert!(item.submitted_date < item.due_date, "{}", item.id);
        }
        assert!(matches!(day("2024-02-30"), Err(AxonError::InvalidDate(_))));
    }

    #[test]
    fn sample_queue_preserves_author_order() {
        let reviews = SampleReviewQueue.reviews().unwrap();
        assert_eq!(reviews.len(), 3);
        assert_eq!(reviews[0].authors[0], "Dr. Sarah Chen");
        assert_eq!(reviews[0].authors[2], "Dr. Aisha Patel");
        assert_eq!(reviews[1].status, ReviewStatus::Pending);
    }

    #[test]
    fn json_queue_loads_items() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        let items = SampleReviewQueue.reviews().unwrap();
        write!(file, "{}", serde_json::to_string(&items).unwrap()).unwrap();

        let loaded = JsonReviewQueue::new(file.path()).reviews().unwrap();
        assert_eq!(loaded, items);
    }
}
