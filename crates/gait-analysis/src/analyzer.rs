//! Interval correlation across event streams
//!
//! Every predictor stream's intervals are compared with the reference
//! stream's intervals. Sequences are aligned by ordinal position and
//! truncated to the shortest one, so the k-th interval of one stream is
//! paired with the k-th interval of the other whether or not the two belong
//! to the same stride. This is an approximation: a missed or spurious event
//! early in either stream shifts every later pairing.

use crate::correlation::pearson;
use crate::quality::AnnotatedEventStream;
use crate::regression::{linear_regression, Regression};
use gait_core::Result;
use serde::Serialize;
use tracing::{debug, instrument};

/// A stream under analysis, identified by its report name
#[derive(Debug, Clone, Copy)]
pub struct NamedStream<'a> {
    pub name: &'a str,
    pub stream: &'a AnnotatedEventStream,
}

impl<'a> NamedStream<'a> {
    pub fn new(name: &'a str, stream: &'a AnnotatedEventStream) -> Self {
        Self { name, stream }
    }
}

/// One predictor compared against the reference
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PairAnalysis {
    pub predictor: String,
    /// Pearson coefficient of predictor and reference intervals
    pub correlation: Option<f64>,
    /// Reference intervals regressed on predictor intervals
    pub regression: Option<Regression>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisResult {
    pub reference: String,
    /// Number of aligned intervals every comparison used
    pub sample_size: usize,
    pub comparisons: Vec<PairAnalysis>,
}

impl AnalysisResult {
    pub fn comparison(&self, predictor: &str) -> Option<&PairAnalysis> {
        self.comparisons.iter().find(|c| c.predictor == predictor)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct CorrelationAnalyzer;

impl CorrelationAnalyzer {
    pub fn new() -> Self {
        Self
    }

    /// Compare each predictor's intervals with the reference's.
    ///
    /// Returns `Ok(None)` when any input stream has no events. Undefined
    /// statistics (too few intervals, constant intervals) come back as
    /// `None` fields rather than errors.
    #[instrument(skip_all, fields(reference = reference.name, predictors = predictors.len()))]
    pub fn analyze(
        &self,
        reference: NamedStream<'_>,
        predictors: &[NamedStream<'_>],
    ) -> Result<Option<AnalysisResult>> {
        if reference.stream.is_empty() || predictors.iter().any(|p| p.stream.is_empty()) {
            debug!("empty input stream, correlation skipped");
            return Ok(None);
        }

        let reference_intervals = reference.stream.intervals();
        let predictor_intervals: Vec<Vec<f64>> =
            predictors.iter().map(|p| p.stream.intervals()).collect();

        let k = predictor_intervals
            .iter()
            .map(Vec::len)
            .chain(std::iter::once(reference_intervals.len()))
            .min()
            .unwrap_or(0);
        let y = &reference_intervals[..k];

        let comparisons = predictors
            .iter()
            .zip(&predictor_intervals)
            .map(|(p, intervals)| {
                let x = &intervals[..k];
                Ok(PairAnalysis {
                    predictor: p.name.to_string(),
                    correlation: pearson(x, y)?,
                    regression: linear_regression(x, y)?,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        debug!(sample_size = k, "correlation analysis finished");
        Ok(Some(AnalysisResult {
            reference: reference.name.to_string(),
            sample_size: k,
            comparisons,
        }))
    }
}
