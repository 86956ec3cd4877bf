//! Contact-mode transition detection
//!
//! Emits a `Transition(label)` event at every entry into the target label:
//! the first defined sample whose label equals the target after a sample that
//! did not, or the very first defined sample if it already carries the
//! target. Missing labels are skipped and leave the state untouched.

use gait_core::{CategoricalStateSeries, Error, Event, EventStream, Result};
use std::collections::BTreeMap;
use tracing::{debug, instrument};

/// Label seen at the previous defined sample, relative to the target
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PreviousLabel {
    /// No defined sample seen yet
    Unseen,
    Target,
    Other,
}

/// Edge detector for entries into one target label
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionDetector {
    target: String,
}

impl TransitionDetector {
    pub fn new(target: impl Into<String>) -> Result<Self> {
        let target = target.into();
        if target.is_empty() {
            return Err(Error::configuration("target_labels", "label must not be empty"));
        }
        Ok(Self { target })
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    #[instrument(skip(self, series), fields(target = %self.target, len = series.len()))]
    pub fn detect(&self, series: &CategoricalStateSeries) -> Result<EventStream> {
        let mut previous = PreviousLabel::Unseen;
        let mut events = Vec::new();

        for (timestamp, label) in series.iter() {
            let Some(label) = label else { continue };
            let current = if label == self.target {
                PreviousLabel::Target
            } else {
                PreviousLabel::Other
            };

            if current == PreviousLabel::Target && previous != PreviousLabel::Target {
                events.push(Event::transition(timestamp, self.target.as_str()));
            }
            previous = current;
        }

        debug!(events = events.len(), "transition detection finished");
        EventStream::new(events)
    }
}

/// Run one independent detector per target label over the same series.
///
/// With the `parallel` feature the detectors run on the rayon pool.
pub fn detect_all<S: AsRef<str> + Sync>(
    series: &CategoricalStateSeries,
    targets: &[S],
) -> Result<BTreeMap<String, EventStream>> {
    let detectors = targets
        .iter()
        .map(|t| TransitionDetector::new(t.as_ref()))
        .collect::<Result<Vec<_>>>()?;

    #[cfg(feature = "parallel")]
    let streams = {
        use rayon::prelude::*;
        detectors
            .par_iter()
            .map(|d| d.detect(series).map(|s| (d.target.clone(), s)))
            .collect::<Result<Vec<_>>>()?
    };

    #[cfg(not(feature = "parallel"))]
    let streams = detectors
        .iter()
        .map(|d| d.detect(series).map(|s| (d.target.clone(), s)))
        .collect::<Result<Vec<_>>>()?;

    Ok(streams.into_iter().collect())
}
