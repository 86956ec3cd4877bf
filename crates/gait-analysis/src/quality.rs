//! Interval quality control
//!
//! Each event except the last gets the interval to its successor, rounded to
//! [`INTERVAL_DECIMALS`], and a flag derived from that rounded interval:
//!
//! | interval                 | flag      |
//! |--------------------------|-----------|
//! | `> error_high`           | `Error`   |
//! | `< error_low`            | `Warning` |
//! | otherwise                | `Normal`  |

use gait_core::{
    round_to, Error, Event, EventKind, EventStream, Result, INTERVAL_DECIMALS, VALUE_DECIMALS,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

/// Default upper bound on a plausible interval
pub const DEFAULT_ERROR_HIGH: f64 = 400.0;

/// Default lower bound on a plausible interval.
///
/// Much smaller than any real stride or contact interval in the same time
/// unit as [`DEFAULT_ERROR_HIGH`]; likely a unit slip. Kept for compatibility
/// with existing reports.
pub const DEFAULT_ERROR_LOW: f64 = 0.25;

/// Quality verdict for one interval
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QualityFlag {
    Normal,
    Warning,
    Error,
}

impl QualityFlag {
    pub fn is_flagged(self) -> bool {
        !matches!(self, QualityFlag::Normal)
    }
}

impl fmt::Display for QualityFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QualityFlag::Normal => write!(f, "Normal"),
            QualityFlag::Warning => write!(f, "Warning"),
            QualityFlag::Error => write!(f, "Error"),
        }
    }
}

/// Interval bounds used to flag implausible event spacing
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QualityControl {
    pub error_high: f64,
    pub error_low: f64,
}

impl Default for QualityControl {
    fn default() -> Self {
        Self {
            error_high: DEFAULT_ERROR_HIGH,
            error_low: DEFAULT_ERROR_LOW,
        }
    }
}

impl QualityControl {
    pub fn new(error_high: f64, error_low: f64) -> Result<Self> {
        let qc = Self {
            error_high,
            error_low,
        };
        qc.validate()?;
        Ok(qc)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.error_high.is_finite() {
            return Err(Error::configuration("error_high", "must be finite"));
        }
        if !self.error_low.is_finite() || self.error_low < 0.0 {
            return Err(Error::configuration(
                "error_low",
                "must be finite and non-negative",
            ));
        }
        if self.error_low >= self.error_high {
            return Err(Error::configuration(
                "error_low",
                format!(
                    "must be below error_high ({} >= {})",
                    self.error_low, self.error_high
                ),
            ));
        }
        Ok(())
    }

    /// Whether the lower bound is still the suspect default
    pub fn uses_default_error_low(&self) -> bool {
        self.error_low == DEFAULT_ERROR_LOW
    }

    pub fn classify(&self, interval: f64) -> QualityFlag {
        if interval > self.error_high {
            QualityFlag::Error
        } else if interval < self.error_low {
            QualityFlag::Warning
        } else {
            QualityFlag::Normal
        }
    }

    /// Attach rounded values, intervals and flags to every event
    pub fn annotate(&self, stream: &EventStream) -> Result<AnnotatedEventStream> {
        self.validate()?;

        let mut summary = QualitySummary::default();
        let rows: Vec<AnnotatedEvent> = stream
            .iter()
            .enumerate()
            .map(|(k, event)| {
                let interval = stream.interval(k).map(|i| round_to(i, INTERVAL_DECIMALS));
                let flag = interval.map(|i| self.classify(i));
                if let Some(flag) = flag {
                    summary.record(flag);
                }
                AnnotatedEvent::new(event, interval, flag)
            })
            .collect();

        debug!(
            events = rows.len(),
            errors = summary.errors,
            warnings = summary.warnings,
            "quality control finished"
        );
        Ok(AnnotatedEventStream { rows, summary })
    }
}

/// One report row
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnnotatedEvent {
    pub timestamp: f64,
    /// Event value rounded to [`VALUE_DECIMALS`]
    pub value: Option<f64>,
    pub kind: EventKind,
    /// Rounded interval to the next event; `None` for the last event
    pub interval: Option<f64>,
    pub flag: Option<QualityFlag>,
}

impl AnnotatedEvent {
    fn new(event: &Event, interval: Option<f64>, flag: Option<QualityFlag>) -> Self {
        Self {
            timestamp: event.timestamp,
            value: event.value.map(|v| round_to(v, VALUE_DECIMALS)),
            kind: event.kind.clone(),
            interval,
            flag,
        }
    }

    pub fn is_flagged(&self) -> bool {
        self.flag.is_some_and(QualityFlag::is_flagged)
    }
}

/// Flag counts over one stream's intervals
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct QualitySummary {
    pub errors: usize,
    pub warnings: usize,
    pub normal: usize,
}

impl QualitySummary {
    fn record(&mut self, flag: QualityFlag) {
        match flag {
            QualityFlag::Normal => self.normal += 1,
            QualityFlag::Warning => self.warnings += 1,
            QualityFlag::Error => self.errors += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.errors + self.warnings + self.normal
    }
}

/// Event stream with quality annotations
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AnnotatedEventStream {
    rows: Vec<AnnotatedEvent>,
    summary: QualitySummary,
}

impl AnnotatedEventStream {
    pub fn rows(&self) -> &[AnnotatedEvent] {
        &self.rows
    }

    pub fn summary(&self) -> QualitySummary {
        self.summary
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Rounded intervals in event order
    pub fn intervals(&self) -> Vec<f64> {
        self.rows.iter().filter_map(|row| row.interval).collect()
    }

    /// Rows whose interval was flagged as a warning or an error
    pub fn flagged(&self) -> impl Iterator<Item = &AnnotatedEvent> + '_ {
        self.rows.iter().filter(|row| row.is_flagged())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stream_at(timestamps: &[f64]) -> EventStream {
        EventStream::new(
            timestamps
                .iter()
                .map(|&t| Event::transition(t, "SC"))
                .collect(),
        )
        .unwrap()
    }

    #[test]
    fn test_classify() {
        let qc = QualityControl::default();
        assert_eq!(qc.classify(500.0), QualityFlag::Error);
        assert_eq!(qc.classify(0.1), QualityFlag::Warning);
        assert_eq!(qc.classify(50.0), QualityFlag::Normal);
        // Bounds themselves are normal
        assert_eq!(qc.classify(400.0), QualityFlag::Normal);
        assert_eq!(qc.classify(0.25), QualityFlag::Normal);
    }

    #[test]
    fn test_validation() {
        assert!(QualityControl::new(400.0, 0.25).is_ok());
        assert_eq!(
            QualityControl::new(1.0, 1.0).unwrap_err().parameter(),
            Some("error_low")
        );
        assert_eq!(
            QualityControl::new(10.0, -1.0).unwrap_err().parameter(),
            Some("error_low")
        );
        assert_eq!(
            QualityControl::new(f64::INFINITY, 0.0).unwrap_err().parameter(),
            Some("error_high")
        );
    }

    #[test]
    fn test_annotate() {
        let qc = QualityControl::default();
        let annotated = qc.annotate(&stream_at(&[0.0, 0.1, 50.1, 550.1])).unwrap();

        let flags: Vec<_> = annotated.rows().iter().map(|r| r.flag).collect();
        assert_eq!(
            flags,
            vec![
                Some(QualityFlag::Warning),
                Some(QualityFlag::Normal),
                Some(QualityFlag::Error),
                None
            ]
        );
        assert_eq!(annotated.intervals(), vec![0.1, 50.0, 500.0]);
        assert_eq!(
            annotated.summary(),
            QualitySummary {
                errors: 1,
                warnings: 1,
                normal: 1
            }
        );
        assert_eq!(annotated.flagged().count(), 2);
    }

    #[test]
    fn test_rounding_applies_before_classification() {
        let qc = QualityControl::new(400.0, 1.0).unwrap();
        // 0.99996 rounds to 1.0, which is not below the bound
        let annotated = qc.annotate(&stream_at(&[0.0, 0.99996])).unwrap();
        assert_eq!(annotated.rows()[0].interval, Some(1.0));
        assert_eq!(annotated.rows()[0].flag, Some(QualityFlag::Normal));
    }

    #[test]
    fn test_values_rounded() {
        let stream =
            EventStream::new(vec![Event::peak(0.0, 1.234567), Event::valley(5.0, -0.000004)])
                .unwrap();
        let annotated = QualityControl::default().annotate(&stream).unwrap();
        assert_eq!(annotated.rows()[0].value, Some(1.23457));
        assert_eq!(annotated.rows()[1].value, Some(-0.0));
    }

    #[test]
    fn test_short_streams() {
        let qc = QualityControl::default();
        assert!(qc.annotate(&EventStream::empty()).unwrap().is_empty());

        let single = qc.annotate(&stream_at(&[3.0])).unwrap();
        assert_eq!(single.len(), 1);
        assert!(single.intervals().is_empty());
        assert_eq!(single.summary().total(), 0);
    }
}
