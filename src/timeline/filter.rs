//! Search and status filtering over the timeline event log.
//!
//! An event is kept when the query matches its title, author or reviewer
//! (case-insensitively, as a substring) and the status filter accepts its
//! status. Output order always follows input order.

use std::fmt;
use std::str::FromStr;

use tracing::debug;

use super::event::{EventStatus, TimelineEvent};
use crate::error::AxonError;

/// Either the `all` wildcard or one exact event status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StatusFilter {
    #[default]
    All,
    Exact(EventStatus),
}

impl StatusFilter {
    pub fn accepts(self, status: EventStatus) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Exact(wanted) => wanted == status,
        }
    }
}

impl FromStr for StatusFilter {
    type Err = AxonError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "all" {
            Ok(StatusFilter::All)
        } else {
            s.parse().map(StatusFilter::Exact)
        }
    }
}

impl fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatusFilter::All => write!(f, "all"),
            StatusFilter::Exact(status) => write!(f, "{status}"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TimelineEventFilter {
    needle: String,
    status: StatusFilter,
}

impl TimelineEventFilter {
    pub fn new(query: &str, status: StatusFilter) -> Self {
        Self {
            needle: query.to_lowercase(),
            status,
        }
    }

    pub fn text_matches(&self, event: &TimelineEvent) -> bool {
        let contains = |field: &str| field.to_lowercase().contains(&self.needle);
        contains(event.title.as_str())
            || event.kind.author().is_some_and(contains)
            || event.kind.reviewer().is_some_and(contains)
    }

    pub fn matches(&self, event: &TimelineEvent) -> bool {
        self.text_matches(event) && self.status.accepts(event.status)
    }

    /// The matching events, in their original relative order.
    pub fn apply<'a>(&self, events: &'a [TimelineEvent]) -> Vec<&'a TimelineEvent> {
        let kept: Vec<&TimelineEvent> = events.iter().filter(|e| self.matches(e)).collect();
        debug!(
            query = %self.needle,
            status = %self.status,
            total = events.len(),
            kept = kept.len(),
            "timeline filtered"
        );
        kept
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timeline::{EventSource, SampleEventSource};

    fn sample() -> Vec<TimelineEvent> {
        SampleEventSource.events().unwrap()
    }

    fn ids(events: &[&TimelineEvent]) -> Vec<u64> {
        events.iter().map(|e| e.id).collect()
    }

    #[test]
    fn empty_query_and_wildcard_is_identity() {
        let events = sample();
        let kept = TimelineEventFilter::new("", StatusFilter::All).apply(&events);
        assert_eq!(ids(&kept), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn query_matches_author_and_assignee() {
        let events = sample();
        let kept = TimelineEventFilter::new("chen", StatusFilter::All).apply(&events);
        assert_eq!(ids(&kept), vec![1, 4]);
        assert_eq!(kept[0].kind.type_name(), "submission");
        assert_eq!(kept[1].kind.type_name(), "review_assignment");
    }

    #[test]
    fn query_is_case_insensitive() {
        let events = sample();
        let kept = TimelineEventFilter::new("QUANTUM", StatusFilter::All).apply(&events);
        assert_eq!(ids(&kept), vec![2]);
        let kept = TimelineEventFilter::new("rodriguez", StatusFilter::All).apply(&events);
        assert_eq!(ids(&kept), vec![2]);
    }

    #[test]
    fn status_filter_is_exact() {
        let events = sample();
        let rejected: StatusFilter = "rejected".parse().unwrap();
        let kept = TimelineEventFilter::new("", rejected).apply(&events);
        assert_eq!(ids(&kept), vec![5]);
        assert_eq!(kept[0].kind.author(), Some("John Smith"));
    }

    #[test]
    fn status_filter_parse() {
        assert_eq!("all".parse::<StatusFilter>().unwrap(), StatusFilter::All);
        assert_eq!(
            "in_progress".parse::<StatusFilter>().unwrap(),
            StatusFilter::Exact(EventStatus::InProgress)
        );
        assert!("All".parse::<StatusFilter>().is_err());
    }

    #[test]
    fn query_and_status_are_conjunctive() {
        let events = sample();
        let filter = TimelineEventFilter::new("chen", StatusFilter::Exact(EventStatus::InProgress));
        assert_eq!(ids(&filter.apply(&events)), vec![4]);
    }

    #[test]
    fn no_match_yields_empty_result() {
        let events = sample();
        let kept = TimelineEventFilter::new("zebrafish", StatusFilter::All).apply(&events);
        assert!(kept.is_empty());
    }

    #[test]
    fn filtering_is_idempotent() {
        let events = sample();
        let filter = TimelineEventFilter::new("learning", StatusFilter::All);
        let once: Vec<TimelineEvent> = filter.apply(&events).into_iter().cloned().collect();
        let twice: Vec<TimelineEvent> = filter.apply(&once).into_iter().cloned().collect();
        assert_eq!(once, twice);
        assert!(!once.is_empty());
    }
}
