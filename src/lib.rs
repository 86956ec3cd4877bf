//! # Gait Events
//!
//! Gait event detection and quality control for instrumented-treadmill
//! recordings.
//!
//! A recording's belt speed is smoothed and searched for peaks and valleys,
//! its contact-mode column is scanned for entries into target labels, every
//! resulting event stream has its inter-event intervals checked, and the
//! interval sequences are correlated against each other.
//!
//! ## Crates
//!
//! - [`gait_core`]: series, events and the shared error type
//! - [`gait_detect`]: smoothing, thresholds, extrema and transition detectors
//! - [`gait_analysis`]: quality control and correlation analysis
//!
//! This crate adds the configuration, the pipeline entry point and the
//! loader and report writers around them.
//!
//! ## Example
//!
//! ```rust
//! use gait_events::{run, PipelineConfig, Recording};
//! use gait_core::{CategoricalStateSeries, TimeSeries};
//!
//! let n = 2000;
//! let timestamps: Vec<f64> = (0..n).map(|i| i as f64).collect();
//! let speed: Vec<f64> = (0..n)
//!     .map(|i| 4.45 + 0.2 * (2.0 * std::f64::consts::PI * i as f64 / 200.0).sin())
//!     .collect();
//! let labels: Vec<&str> = (0..n).map(|i| if i % 200 < 100 { "SC" } else { "DC" }).collect();
//!
//! let recording = Recording::new(
//!     TimeSeries::from_raw(timestamps.clone(), speed).unwrap(),
//!     CategoricalStateSeries::from_labels(timestamps, &labels).unwrap(),
//! ).unwrap();
//!
//! let output = run(&PipelineConfig::default(), &recording).unwrap();
//! assert_eq!(output.stream("peaks").unwrap().len(), 10);
//! assert_eq!(output.stream("SC").unwrap().len(), 10);
//! ```

pub mod config;
pub mod error;
pub mod loader;
pub mod pipeline;
pub mod report;

pub use config::{
    CorrelationConfig, DetectionMode, InputConfig, PipelineConfig, ThresholdPolicyConfig,
};
pub use error::{Error, Result};
pub use loader::{load_recording, read_recording};
pub use pipeline::{Pipeline, PipelineOutput, Recording, StreamOutput, PEAKS, VALLEYS};
pub use report::{summary_json, write_event_report, write_reports, write_summary, SUMMARY_FILE};

// Re-export member crates
pub use gait_analysis;
pub use gait_core;
pub use gait_detect;

/// Validate `config` and run it over `recording`
pub fn run(config: &PipelineConfig, recording: &Recording) -> Result<PipelineOutput> {
    config.build()?.run(recording)
}
