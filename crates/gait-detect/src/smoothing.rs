//! Centered moving-average smoothing
//!
//! Each output sample is the arithmetic mean of the `window` input samples
//! centered on it. The first and last `window / 2` outputs are missing since
//! no partial windows are averaged, and any window that contains a missing
//! input sample produces a missing output sample.

use gait_core::{Error, Result, Sample, TimeSeries};
use tracing::{debug, instrument};

/// Default smoothing window (samples)
pub const DEFAULT_WINDOW: usize = 21;

/// Centered moving-average filter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MovingAverage {
    window: usize,
}

impl MovingAverage {
    /// Create a filter with an odd, positive window size
    pub fn new(window: usize) -> Result<Self> {
        if window == 0 || window % 2 == 0 {
            return Err(Error::configuration(
                "window_size",
                format!("must be a positive odd number, got {window}"),
            ));
        }
        Ok(Self { window })
    }

    pub fn window(&self) -> usize {
        self.window
    }

    /// Number of unusable samples at each end of the output
    pub fn margin(&self) -> usize {
        self.window / 2
    }

    /// Smooth a series; the window must not exceed the series length
    #[instrument(skip(self, series), fields(window = self.window, len = series.len()))]
    pub fn smooth(&self, series: &TimeSeries) -> Result<TimeSeries> {
        if self.window > series.len() {
            return Err(Error::configuration(
                "window_size",
                format!(
                    "window {} is larger than the series ({} samples)",
                    self.window,
                    series.len()
                ),
            ));
        }

        let smoothed = self.smooth_values(series.values());
        debug!(
            defined = smoothed.iter().filter(|v| v.is_some()).count(),
            "moving average computed"
        );
        series.with_values(smoothed)
    }

    /// Each window is summed on its own so identical windows give
    /// bit-identical means; a missing sample makes the whole sum `None`.
    fn smooth_values(&self, values: &[Sample]) -> Vec<Sample> {
        let half = self.margin();
        let width = self.window as f64;
        let mut out = vec![None; values.len()];

        for (start, window) in values.windows(self.window).enumerate() {
            out[start + half] = window
                .iter()
                .copied()
                .sum::<Option<f64>>()
                .map(|sum| sum / width);
        }

        out
    }
}

impl Default for MovingAverage {
    fn default() -> Self {
        Self {
            window: DEFAULT_WINDOW,
        }
    }
}
