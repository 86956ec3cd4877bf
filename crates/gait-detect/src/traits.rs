//! Core traits for gait event detection

use gait_core::{EventStream, Result, TimeSeries};

/// Properties of a detector that don't depend on the input
pub trait DetectorProperties {
    /// Get the name of the detection algorithm
    fn algorithm_name(&self) -> &'static str;

    /// Smallest series length for which the detector can emit anything.
    ///
    /// Shorter inputs produce an empty stream rather than an error.
    fn minimum_sample_size(&self) -> usize;
}

/// Detector producing an alternating, debounced Peak/Valley stream
///
/// Implementations guarantee that no two adjacent events in the returned
/// stream share a kind.
pub trait ExtremaDetector: DetectorProperties {
    /// Detect extrema in a (usually smoothed) series
    fn detect(&self, series: &TimeSeries) -> Result<EventStream>;
}
