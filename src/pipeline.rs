//! The detection and quality-control pipeline
//!
//! ```text
//! speed ──► smoothing ──► extrema ──► peaks / valleys ─┐
//!                                                      ├─► quality ──► correlation
//! contact mode ──────────► transitions ──► per label ──┘
//! ```

use crate::error::{Error, Result};
use gait_analysis::{
    AnalysisResult, AnnotatedEventStream, CorrelationAnalyzer, NamedStream, QualityControl,
};
use gait_core::{CategoricalStateSeries, EventKind, EventStream, TimeSeries};
use gait_detect::{
    DetectorProperties, ExtremaDetector, ModeDetector, MovingAverage, TransitionDetector,
};
use serde::Serialize;
use tracing::{debug, info, instrument, warn};

/// Stream name of the detected speed peaks
pub const PEAKS: &str = "peaks";

/// Stream name of the detected speed valleys
pub const VALLEYS: &str = "valleys";

/// One loaded recording: speed and contact mode on a shared time base
#[derive(Debug, Clone, PartialEq)]
pub struct Recording {
    speed: TimeSeries,
    contact: CategoricalStateSeries,
}

impl Recording {
    pub fn new(speed: TimeSeries, contact: CategoricalStateSeries) -> Result<Self> {
        if speed.timestamps() != contact.timestamps() {
            return Err(gait_core::Error::InvalidInput(
                "speed and contact-mode series must share timestamps".to_string(),
            )
            .into());
        }
        Ok(Self { speed, contact })
    }

    pub fn speed(&self) -> &TimeSeries {
        &self.speed
    }

    pub fn contact(&self) -> &CategoricalStateSeries {
        &self.contact
    }

    pub fn len(&self) -> usize {
        self.speed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.speed.is_empty()
    }
}

/// Annotated events of one named stream
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StreamOutput {
    pub name: String,
    pub events: AnnotatedEventStream,
}

/// Everything one pipeline run produces
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PipelineOutput {
    pub detection_mode: &'static str,
    /// Valleys, peaks, then one stream per target label
    pub streams: Vec<StreamOutput>,
    /// `None` when any compared stream is empty
    pub analysis: Option<AnalysisResult>,
}

impl PipelineOutput {
    pub fn stream(&self, name: &str) -> Option<&AnnotatedEventStream> {
        self.streams
            .iter()
            .find(|s| s.name == name)
            .map(|s| &s.events)
    }
}

/// Validated stages, built by [`PipelineConfig::build`](crate::PipelineConfig::build)
#[derive(Debug, Clone)]
pub struct Pipeline {
    smoother: MovingAverage,
    detector: ModeDetector,
    transitions: Vec<TransitionDetector>,
    quality: QualityControl,
    reference: String,
    predictors: Vec<String>,
}

impl Pipeline {
    pub(crate) fn new(
        smoother: MovingAverage,
        detector: ModeDetector,
        transitions: Vec<TransitionDetector>,
        quality: QualityControl,
        reference: String,
        predictors: Vec<String>,
    ) -> Self {
        Self {
            smoother,
            detector,
            transitions,
            quality,
            reference,
            predictors,
        }
    }

    pub fn detector(&self) -> &ModeDetector {
        &self.detector
    }

    #[instrument(skip_all, fields(mode = self.detector.algorithm_name(), samples = recording.len()))]
    pub fn run(&self, recording: &Recording) -> Result<PipelineOutput> {
        if self.quality.uses_default_error_low() {
            warn!(
                error_low = self.quality.error_low,
                "default error_low is far below any plausible interval; check its unit"
            );
        }

        let smoothed = self.smoother.smooth(recording.speed())?;
        let extrema = self.detector.detect(&smoothed)?;
        debug!(extrema = extrema.len(), "extrema detected");

        let mut raw: Vec<(String, EventStream)> = vec![
            (VALLEYS.to_string(), extrema.of_kind(&EventKind::Valley)),
            (PEAKS.to_string(), extrema.of_kind(&EventKind::Peak)),
        ];
        for detector in &self.transitions {
            raw.push((
                detector.target().to_string(),
                detector.detect(recording.contact())?,
            ));
        }

        let streams = raw
            .iter()
            .map(|(name, stream)| {
                Ok(StreamOutput {
                    name: name.clone(),
                    events: self.quality.annotate(stream)?,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        for s in &streams {
            let summary = s.events.summary();
            info!(
                stream = %s.name,
                events = s.events.len(),
                errors = summary.errors,
                warnings = summary.warnings,
                "stream annotated"
            );
        }

        let analysis = self.correlate(&streams)?;
        Ok(PipelineOutput {
            detection_mode: self.detector.algorithm_name(),
            streams,
            analysis,
        })
    }

    fn correlate(&self, streams: &[StreamOutput]) -> Result<Option<AnalysisResult>> {
        let reference = named_stream(streams, &self.reference)?;
        let predictors = self
            .predictors
            .iter()
            .map(|p| named_stream(streams, p))
            .collect::<Result<Vec<_>>>()?;

        Ok(CorrelationAnalyzer::new().analyze(reference, &predictors)?)
    }
}

fn named_stream<'a>(streams: &'a [StreamOutput], name: &str) -> Result<NamedStream<'a>> {
    streams
        .iter()
        .find(|s| s.name == name)
        .map(|s| NamedStream::new(&s.name, &s.events))
        .ok_or_else(|| {
            Error::from(gait_core::Error::Computation(format!(
                "stream `{name}` was not produced"
            )))
        })
}
