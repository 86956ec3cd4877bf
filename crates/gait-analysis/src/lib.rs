//! Quality control and correlation analysis for gait event streams
//!
//! - [`QualityControl`] flags implausible inter-event intervals and produces
//!   report-ready [`AnnotatedEventStream`]s
//! - [`CorrelationAnalyzer`] relates the interval sequence of one stream to
//!   those of others with [`pearson`] and [`linear_regression`]
//!
//! ```rust
//! use gait_analysis::{QualityControl, QualityFlag};
//! use gait_core::{Event, EventStream};
//!
//! let lift_downs = EventStream::new(vec![
//!     Event::transition(0.0, "SC"),
//!     Event::transition(550.0, "SC"),
//!     Event::transition(700.0, "SC"),
//! ]).unwrap();
//!
//! let annotated = QualityControl::default().annotate(&lift_downs).unwrap();
//! assert_eq!(annotated.rows()[0].flag, Some(QualityFlag::Error));
//! assert_eq!(annotated.rows()[1].flag, Some(QualityFlag::Normal));
//! assert_eq!(annotated.rows()[2].flag, None);
//! ```

pub mod analyzer;
pub mod correlation;
pub mod quality;
pub mod regression;

pub use analyzer::{AnalysisResult, CorrelationAnalyzer, NamedStream, PairAnalysis};
pub use correlation::pearson;
pub use quality::{
    AnnotatedEvent, AnnotatedEventStream, QualityControl, QualityFlag, QualitySummary,
    DEFAULT_ERROR_HIGH, DEFAULT_ERROR_LOW,
};
pub use regression::{linear_regression, Regression};
