//! Gait event detection
//!
//! This crate turns sampled gait recordings into event streams.
//!
//! # Stages
//!
//! - **Smoothing**: [`MovingAverage`], a centered moving average with explicit
//!   missing-sample propagation
//! - **Thresholds**: [`ThresholdPolicy`], constant or segmented peak/valley bars
//! - **Extrema**: two interchangeable strategies behind [`ExtremaDetector`]
//!   - [`SlidingExtremaDetector`]: centered-window extrema with debounce
//!   - [`PairedWindowDetector`]: forward-window peak/valley matching with
//!     duplicate suppression
//! - **Transitions**: [`TransitionDetector`], entries into a contact-mode label
//!
//! ## Usage
//!
//! ```rust
//! use gait_detect::{ExtremaDetector, MovingAverage, SlidingExtremaDetector, ThresholdPolicy};
//! use gait_core::TimeSeries;
//!
//! let speed: Vec<f64> = (0..400).map(|i| 4.45 + 0.3 * (i as f64 * 0.05).sin()).collect();
//! let timestamps: Vec<f64> = (0..400).map(|i| i as f64).collect();
//! let series = TimeSeries::from_raw(timestamps, speed).unwrap();
//!
//! let smoothed = MovingAverage::new(21).unwrap().smooth(&series).unwrap();
//! let policy = ThresholdPolicy::constant(4.55, 4.35).unwrap();
//! let events = SlidingExtremaDetector::new(10, policy).unwrap().detect(&smoothed).unwrap();
//!
//! println!("Detected {} extrema", events.len());
//! ```

pub mod extrema;
pub mod kernel;
pub mod mode;
pub mod paired;
pub mod smoothing;
pub mod threshold;
pub mod traits;
pub mod transitions;

pub use extrema::{SlidingExtremaDetector, DEFAULT_HALF_WIDTH};
pub use mode::ModeDetector;
pub use paired::{MatchedPair, PairedParameters, PairedWindowDetector};
pub use smoothing::{MovingAverage, DEFAULT_WINDOW};
pub use threshold::{Breakpoint, ThresholdPair, ThresholdPolicy};
pub use traits::{DetectorProperties, ExtremaDetector};
pub use transitions::{detect_all, TransitionDetector};
