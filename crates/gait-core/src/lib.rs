//! Core types for gait event analysis
//!
//! This crate provides the value objects shared by the detection and
//! analysis crates:
//!
//! - [`TimeSeries`] and [`CategoricalStateSeries`]: immutable sampled recordings
//!   with explicit missing values
//! - [`Event`], [`EventKind`] and [`EventStream`]: detector output
//! - [`Error`] and [`Result`]: the unified error type
//!
//! ```rust
//! use gait_core::{Event, EventStream};
//!
//! let stream = EventStream::new(vec![Event::peak(0.0, 2.1), Event::valley(180.0, 1.4)]).unwrap();
//! assert_eq!(stream.intervals(), vec![180.0]);
//! ```

pub mod error;
pub mod events;
pub mod numeric;
pub mod series;

pub use error::{Error, Result};
pub use events::{Event, EventFamily, EventKind, EventStream};
pub use numeric::{mean, round_to, INTERVAL_DECIMALS, VALUE_DECIMALS};
pub use series::{CategoricalStateSeries, Sample, TimeSeries};
