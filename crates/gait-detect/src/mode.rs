//! Detection mode selection
//!
//! Both strategies honour the same contract, so callers pick one at
//! configuration time and drive it through [`ExtremaDetector`].

use crate::extrema::SlidingExtremaDetector;
use crate::paired::PairedWindowDetector;
use crate::traits::{DetectorProperties, ExtremaDetector};
use gait_core::{EventStream, Result, TimeSeries};

/// An extrema detector chosen by configuration
#[derive(Debug, Clone, PartialEq)]
pub enum ModeDetector {
    SlidingDebounced(SlidingExtremaDetector),
    PairedWindow(PairedWindowDetector),
}

impl From<SlidingExtremaDetector> for ModeDetector {
    fn from(detector: SlidingExtremaDetector) -> Self {
        Self::SlidingDebounced(detector)
    }
}

impl From<PairedWindowDetector> for ModeDetector {
    fn from(detector: PairedWindowDetector) -> Self {
        Self::PairedWindow(detector)
    }
}

impl DetectorProperties for ModeDetector {
    fn algorithm_name(&self) -> &'static str {
        match self {
            Self::SlidingDebounced(d) => d.algorithm_name(),
            Self::PairedWindow(d) => d.algorithm_name(),
        }
    }

    fn minimum_sample_size(&self) -> usize {
        match self {
            Self::SlidingDebounced(d) => d.minimum_sample_size(),
            Self::PairedWindow(d) => d.minimum_sample_size(),
        }
    }
}

impl ExtremaDetector for ModeDetector {
    fn detect(&self, series: &TimeSeries) -> Result<EventStream> {
        match self {
            Self::SlidingDebounced(d) => d.detect(series),
            Self::PairedWindow(d) => d.detect(series),
        }
    }
}
