mod event;
mod filter;
mod source;

pub use event::{
    EventKind, EventStatus, EventTone, TimelineEvent, record_submission,
};
pub use filter::{StatusFilter, TimelineEventFilter};
pub use source::{EventSource, JsonEventSource, SampleEventSource};
