//! Sliding-window extrema detection with debounce
//!
//! A sample is a peak candidate when it is the maximum of the centered
//! window `[i - W, i + W]` and strictly above the peak threshold, and a
//! valley candidate when it is the window minimum and strictly below the
//! valley threshold. Flat windows (max == min) hold no extremum.
//!
//! Candidates pass through a two-state hysteresis: once a peak is emitted,
//! further peaks are suppressed until a valley has been emitted, and vice
//! versa. This removes duplicate triggers from noise riding on a crest.

use crate::kernel::window_min_max;
use crate::threshold::ThresholdPolicy;
use crate::traits::{DetectorProperties, ExtremaDetector};
use gait_core::{Error, Event, EventStream, Result, TimeSeries};
use tracing::{debug, instrument};

/// Default window half-width (samples)
pub const DEFAULT_HALF_WIDTH: usize = 10;

/// Kind of the most recently emitted event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LastEmitted {
    None,
    Peak,
    Valley,
}

/// Sliding-window detector with peak/valley debounce
#[derive(Debug, Clone, PartialEq)]
pub struct SlidingExtremaDetector {
    half_width: usize,
    policy: ThresholdPolicy,
}

impl SlidingExtremaDetector {
    /// Create a detector; `half_width` must be at least 1
    pub fn new(half_width: usize, policy: ThresholdPolicy) -> Result<Self> {
        if half_width == 0 {
            return Err(Error::configuration("half_width", "must be at least 1"));
        }
        Ok(Self { half_width, policy })
    }

    /// Detector with the default half-width of 10 samples
    pub fn with_policy(policy: ThresholdPolicy) -> Self {
        Self {
            half_width: DEFAULT_HALF_WIDTH,
            policy,
        }
    }

    pub fn half_width(&self) -> usize {
        self.half_width
    }

    pub fn policy(&self) -> &ThresholdPolicy {
        &self.policy
    }
}

impl DetectorProperties for SlidingExtremaDetector {
    fn algorithm_name(&self) -> &'static str {
        "sliding-debounced"
    }

    fn minimum_sample_size(&self) -> usize {
        2 * self.half_width + 1
    }
}

impl ExtremaDetector for SlidingExtremaDetector {
    #[instrument(skip(self, series), fields(half_width = self.half_width, len = series.len()))]
    fn detect(&self, series: &TimeSeries) -> Result<EventStream> {
        let n = series.len();
        if n < self.minimum_sample_size() {
            debug!(
                required = self.minimum_sample_size(),
                "series shorter than detection window, nothing to detect"
            );
            return Ok(EventStream::empty());
        }

        let w = self.half_width;
        let values = series.values();
        let mut last = LastEmitted::None;
        let mut events = Vec::new();

        for i in w..n - w {
            let Some(center) = values[i] else { continue };
            let Some((min, max)) = window_min_max(&values[i - w..=i + w]) else {
                continue;
            };
            if min == max {
                continue;
            }

            let thresholds = self.policy.lookup(i);
            let is_peak = center == max && center > thresholds.peak;
            let is_valley = center == min && center < thresholds.valley;

            if is_peak && last != LastEmitted::Peak {
                events.push(Event::peak(series.timestamp(i), center));
                last = LastEmitted::Peak;
            } else if is_valley && last != LastEmitted::Valley {
                events.push(Event::valley(series.timestamp(i), center));
                last = LastEmitted::Valley;
            }
        }

        debug!(events = events.len(), "extrema detection finished");
        EventStream::new(events)
    }
}
