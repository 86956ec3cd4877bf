//! Paired-window peak/valley matching
//!
//! A stricter alternative to the sliding detector: every forward window
//! `[i, i + S)` is reduced to its arg-max and arg-min, and the window yields
//! a matched (peak, valley) pair only when
//!
//! - the maximum precedes the minimum,
//! - they are fewer than `max_separation` samples apart,
//! - the amplitude `max - min` exceeds `amplitude_threshold`,
//! - the maximum is above and the minimum below the thresholds in force at `i`.
//!
//! Consecutive windows mostly rediscover the same pair, so candidates are
//! collapsed against the last accepted pair: a candidate is dropped when its
//! peak does not come after the accepted valley, or when either of its
//! events lies within `min_gap` of the accepted event of the same kind.

use crate::kernel::window_extremes;
use crate::threshold::ThresholdPolicy;
use crate::traits::{DetectorProperties, ExtremaDetector};
use gait_core::{Error, Event, EventStream, Result, TimeSeries};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Parameters for paired-window matching
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PairedParameters {
    /// Forward window length in samples
    pub window_size: usize,
    /// Upper bound (exclusive) on the peak-to-valley index distance
    pub max_separation: usize,
    /// Minimum peak-to-valley amplitude (exclusive)
    pub amplitude_threshold: f64,
    /// Minimum spacing, in timestamp units, between accepted events of one kind
    pub min_gap: f64,
}

impl Default for PairedParameters {
    fn default() -> Self {
        Self {
            window_size: 150,
            max_separation: 150,
            amplitude_threshold: 0.0125,
            min_gap: 0.3,
        }
    }
}

impl PairedParameters {
    pub fn validate(&self) -> Result<()> {
        if self.window_size < 2 {
            return Err(Error::configuration(
                "window_size",
                format!("paired window must hold at least 2 samples, got {}", self.window_size),
            ));
        }
        if self.max_separation == 0 {
            return Err(Error::configuration("max_separation", "must be at least 1"));
        }
        if !self.amplitude_threshold.is_finite() || self.amplitude_threshold < 0.0 {
            return Err(Error::configuration(
                "amplitude_threshold",
                format!("must be a non-negative number, got {}", self.amplitude_threshold),
            ));
        }
        if !self.min_gap.is_finite() || self.min_gap < 0.0 {
            return Err(Error::configuration(
                "min_gap",
                format!("must be a non-negative number, got {}", self.min_gap),
            ));
        }
        Ok(())
    }
}

/// A peak and the valley it was matched with
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchedPair {
    pub peak: Event,
    pub valley: Event,
}

impl MatchedPair {
    pub fn amplitude(&self) -> f64 {
        match (self.peak.value, self.valley.value) {
            (Some(p), Some(v)) => p - v,
            _ => 0.0,
        }
    }
}

/// Detector matching peaks with the valley that follows them
#[derive(Debug, Clone, PartialEq)]
pub struct PairedWindowDetector {
    params: PairedParameters,
    policy: ThresholdPolicy,
}

impl PairedWindowDetector {
    pub fn new(params: PairedParameters, policy: ThresholdPolicy) -> Result<Self> {
        params.validate()?;
        Ok(Self { params, policy })
    }

    pub fn parameters(&self) -> &PairedParameters {
        &self.params
    }

    /// Accepted (peak, valley) pairs in time order
    #[instrument(skip(self, series), fields(window = self.params.window_size, len = series.len()))]
    pub fn detect_pairs(&self, series: &TimeSeries) -> Result<Vec<MatchedPair>> {
        let s = self.params.window_size;
        let values = series.values();
        let mut accepted: Vec<MatchedPair> = Vec::new();
        let mut candidates = 0usize;

        for start in 0..series.len().saturating_sub(s) {
            let Some(ext) = window_extremes(&values[start..start + s]) else {
                continue;
            };
            if ext.max_index >= ext.min_index
                || ext.min_index - ext.max_index >= self.params.max_separation
                || ext.amplitude() <= self.params.amplitude_threshold
            {
                continue;
            }
            let thresholds = self.policy.lookup(start);
            if !(ext.max > thresholds.peak && ext.min < thresholds.valley) {
                continue;
            }
            candidates += 1;

            let peak_at = series.timestamp(start + ext.max_index);
            let valley_at = series.timestamp(start + ext.min_index);
            if let Some(last) = accepted.last() {
                if peak_at <= last.valley.timestamp
                    || peak_at - last.peak.timestamp < self.params.min_gap
                    || valley_at - last.valley.timestamp < self.params.min_gap
                {
                    continue;
                }
            }

            accepted.push(MatchedPair {
                peak: Event::peak(peak_at, ext.max),
                valley: Event::valley(valley_at, ext.min),
            });
        }

        debug!(
            candidates,
            accepted = accepted.len(),
            "paired-window matching finished"
        );
        Ok(accepted)
    }
}

impl DetectorProperties for PairedWindowDetector {
    fn algorithm_name(&self) -> &'static str {
        "paired-window"
    }

    fn minimum_sample_size(&self) -> usize {
        self.params.window_size + 1
    }
}

impl ExtremaDetector for PairedWindowDetector {
    fn detect(&self, series: &TimeSeries) -> Result<EventStream> {
        let pairs = self.detect_pairs(series)?;
        let events = pairs
            .into_iter()
            .flat_map(|pair| [pair.peak, pair.valley])
            .collect();
        EventStream::new(events)
    }
}
