use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AxonError;

/// Research categories offered by the manuscript info step.
pub const CATEGORIES: &[&str] = &[
    "Machine Learning",
    "Computer Vision",
    "Natural Language Processing",
    "Robotics",
    "Quantum Computing",
    "Bioinformatics",
    "Cryptography",
    "Software Engineering",
];

/// Urgency classification affecting staking cost and turnaround time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PriorityTier {
    #[default]
    Standard,
    Urgent,
}

impl PriorityTier {
    /// Expected review turnaround window in days, `(min, max)`.
    pub fn turnaround_days(self) -> (u32, u32) {
        match self {
            PriorityTier::Standard => (14, 21),
            PriorityTier::Urgent => (7, 10),
        }
    }
}

impl fmt::Display for PriorityTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PriorityTier::Standard => write!(f, "standard"),
            PriorityTier::Urgent => write!(f, "urgent"),
        }
    }
}

impl FromStr for PriorityTier {
    type Err = AxonError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "standard" => Ok(PriorityTier::Standard),
            "urgent" => Ok(PriorityTier::Urgent),
            other => Err(AxonError::UnknownPriorityTier(other.to_string())),
        }
    }
}

/// Number of reviewers requested for a manuscript, always within `2..=5`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct ReviewerCount(u8);

impl ReviewerCount {
    pub const MIN: u8 = 2;
    pub const MAX: u8 = 5;

    pub fn new(count: u8) -> Result<Self, AxonError> {
        if (Self::MIN..=Self::MAX).contains(&count) {
            Ok(Self(count))
        } else {
            Err(AxonError::InvalidReviewerCount(count))
        }
    }

    pub fn get(self) -> u8 {
        self.0
    }

    /// Every selectable reviewer count, in ascending order.
    pub fn all() -> impl Iterator<Item = ReviewerCount> {
        (Self::MIN..=Self::MAX).map(ReviewerCount)
    }
}

impl Default for ReviewerCount {
    fn default() -> Self {
        Self(3)
    }
}

impl TryFrom<u8> for ReviewerCount {
    type Error = AxonError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ReviewerCount> for u8 {
    fn from(count: ReviewerCount) -> u8 {
        count.0
    }
}

impl fmt::Display for ReviewerCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Reference to a selected manuscript file. Contents are never read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRef {
    pub name: String,
    pub size_bytes: u64,
}

impl FileRef {
    pub fn new(name: impl Into<String>, size_bytes: u64) -> Self {
        Self {
            name: name.into(),
            size_bytes,
        }
    }

    /// Size in megabytes with two decimals, e.g. `"2.50 MB"`.
    pub fn display_size(&self) -> String {
        format!("{:.2} MB", self.size_bytes as f64 / 1024.0 / 1024.0)
    }
}

/// A required wizard input that is still missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationGap {
    Title,
    Abstract,
    Keywords,
    Category,
    File,
}

impl fmt::Display for ValidationGap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationGap::Title => write!(f, "title is required"),
            ValidationGap::Abstract => write!(f, "abstract is required"),
            ValidationGap::Keywords => write!(f, "keywords are required"),
            ValidationGap::Category => write!(f, "research category is required"),
            ValidationGap::File => write!(f, "a manuscript file must be selected"),
        }
    }
}

/// The manuscript being staged by one wizard session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManuscriptDraft {
    pub title: String,
    #[serde(rename = "abstract")]
    pub abstract_text: String,
    pub keywords: String,
    pub category: String,
    pub file: Option<FileRef>,
    pub reviewer_count: ReviewerCount,
    pub priority: PriorityTier,
}

impl ManuscriptDraft {
    pub fn with_settings(reviewer_count: ReviewerCount, priority: PriorityTier) -> Self {
        Self {
            reviewer_count,
            priority,
            ..Default::default()
        }
    }

    /// Missing fields of the manuscript info step, in form order.
    pub fn info_gaps(&self) -> Vec<ValidationGap> {
        [
            (&self.title, ValidationGap::Title),
            (&self.abstract_text, ValidationGap::Abstract),
            (&self.keywords, ValidationGap::Keywords),
            (&self.category, ValidationGap::Category),
        ]
        .into_iter()
        .filter(|(value, _)| value.is_empty())
        .map(|(_, gap)| gap)
        .collect()
    }

    pub fn file_gaps(&self) -> Vec<ValidationGap> {
        if self.file.is_some() {
            Vec::new()
        } else {
            vec![ValidationGap::File]
        }
    }
}
