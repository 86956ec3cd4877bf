//! Gait events and event streams
//!
//! An [`EventStream`] is produced once by a detector and only read afterwards.
//! All events in one stream belong to one [`EventFamily`].

use crate::error::{Error, Result};
use serde::Serialize;
use std::fmt;

/// Kind of a detected gait event
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub enum EventKind {
    /// Local maximum of the smoothed signal
    Peak,
    /// Local minimum of the smoothed signal
    Valley,
    /// Entry into the named contact-mode label
    Transition(String),
}

impl EventKind {
    pub fn family(&self) -> EventFamily {
        match self {
            EventKind::Peak | EventKind::Valley => EventFamily::Extrema,
            EventKind::Transition(_) => EventFamily::Transition,
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventKind::Peak => write!(f, "Peak"),
            EventKind::Valley => write!(f, "Valley"),
            EventKind::Transition(label) => write!(f, "Transition({label})"),
        }
    }
}

/// Family shared by all events of one stream
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum EventFamily {
    Extrema,
    Transition,
}

/// A single detected event
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Event {
    pub timestamp: f64,
    /// Signal value at the event; `None` for transitions
    pub value: Option<f64>,
    pub kind: EventKind,
}

impl Event {
    pub fn peak(timestamp: f64, value: f64) -> Self {
        Self {
            timestamp,
            value: Some(value),
            kind: EventKind::Peak,
        }
    }

    pub fn valley(timestamp: f64, value: f64) -> Self {
        Self {
            timestamp,
            value: Some(value),
            kind: EventKind::Valley,
        }
    }

    pub fn transition(timestamp: f64, label: impl Into<String>) -> Self {
        Self {
            timestamp,
            value: None,
            kind: EventKind::Transition(label.into()),
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.value {
            Some(value) => write!(f, "{} at {} (value {})", self.kind, self.timestamp, value),
            None => write!(f, "{} at {}", self.kind, self.timestamp),
        }
    }
}

/// Ordered, immutable sequence of events of one family
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct EventStream {
    events: Vec<Event>,
}

impl EventStream {
    /// Create a stream, validating timestamp order and family homogeneity
    pub fn new(events: Vec<Event>) -> Result<Self> {
        if let Some(pos) = events
            .windows(2)
            .position(|w| w[1].timestamp < w[0].timestamp)
        {
            return Err(Error::InvalidInput(format!(
                "events must be ordered by timestamp (index {} -> {})",
                pos,
                pos + 1
            )));
        }
        if let Some(first) = events.first() {
            let family = first.kind.family();
            if events.iter().any(|e| e.kind.family() != family) {
                return Err(Error::InvalidInput(
                    "events of one stream must share one kind family".to_string(),
                ));
            }
        }
        Ok(Self { events })
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Event> {
        self.events.iter()
    }

    /// Family of this stream, `None` when empty
    pub fn family(&self) -> Option<EventFamily> {
        self.events.first().map(|e| e.kind.family())
    }

    /// Number of events of the given kind
    pub fn count(&self, kind: &EventKind) -> usize {
        self.events.iter().filter(|e| &e.kind == kind).count()
    }

    /// New stream holding only the events of `kind`
    pub fn of_kind(&self, kind: &EventKind) -> EventStream {
        EventStream {
            events: self
                .events
                .iter()
                .filter(|e| &e.kind == kind)
                .cloned()
                .collect(),
        }
    }

    /// interval(k) = |t(k+1) - t(k)|; one fewer entry than events
    pub fn intervals(&self) -> Vec<f64> {
        self.events
            .windows(2)
            .map(|w| (w[1].timestamp - w[0].timestamp).abs())
            .collect()
    }

    /// interval(k) for a single position; `None` for the last event
    pub fn interval(&self, k: usize) -> Option<f64> {
        let next = self.events.get(k + 1)?;
        Some((next.timestamp - self.events[k].timestamp).abs())
    }
}

impl<'a> IntoIterator for &'a EventStream {
    type Item = &'a Event;
    type IntoIter = std::slice::Iter<'a, Event>;

    fn into_iter(self) -> Self::IntoIter {
        self.events.iter()
    }
}
