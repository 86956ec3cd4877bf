//! Pipeline configuration
//!
//! A [`PipelineConfig`] is read from JSON. Every field has a default, so an
//! empty object `{}` is a complete configuration. [`PipelineConfig::build`]
//! validates everything up front and returns the ready-to-run [`Pipeline`].

use crate::error::Result;
use crate::pipeline::{Pipeline, PEAKS, VALLEYS};
use gait_analysis::QualityControl;
use gait_core::Error as CoreError;
use gait_detect::{
    Breakpoint, ModeDetector, MovingAverage, PairedParameters, PairedWindowDetector,
    SlidingExtremaDetector, ThresholdPolicy, TransitionDetector, DEFAULT_HALF_WIDTH,
    DEFAULT_WINDOW,
};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::io::Read;
use std::path::{Path, PathBuf};

/// Layout of the tab-delimited recording
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// Recording to load; only the command-line tool requires it
    pub path: Option<PathBuf>,
    pub delimiter: char,
    /// Lines skipped before the first data row
    pub header_lines: usize,
    pub time_column: usize,
    pub signal_column: usize,
    pub label_column: usize,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            path: None,
            delimiter: '\t',
            header_lines: 44,
            time_column: 0,
            signal_column: 19,
            label_column: 31,
        }
    }
}

impl InputConfig {
    pub fn delimiter_byte(&self) -> std::result::Result<u8, CoreError> {
        if self.delimiter.is_ascii() {
            Ok(self.delimiter as u8)
        } else {
            Err(CoreError::configuration(
                "input.delimiter",
                format!("delimiter must be a single ASCII character, got {:?}", self.delimiter),
            ))
        }
    }
}

/// Extrema detection strategy
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DetectionMode {
    #[default]
    SlidingDebounced,
    PairedWindow,
}

/// Serializable form of [`ThresholdPolicy`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ThresholdPolicyConfig {
    Constant { peak: f64, valley: f64 },
    Segmented { breakpoints: Vec<Breakpoint> },
}

impl Default for ThresholdPolicyConfig {
    fn default() -> Self {
        Self::Constant {
            peak: 4.55,
            valley: 4.35,
        }
    }
}

impl ThresholdPolicyConfig {
    pub fn build(&self) -> std::result::Result<ThresholdPolicy, CoreError> {
        match self {
            Self::Constant { peak, valley } => ThresholdPolicy::constant(*peak, *valley),
            Self::Segmented { breakpoints } => ThresholdPolicy::from_breakpoints(breakpoints.clone()),
        }
    }
}

/// Which interval sequences are compared
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CorrelationConfig {
    /// Response stream; defaults to the first target label
    pub reference: Option<String>,
    pub predictors: Vec<String>,
}

impl Default for CorrelationConfig {
    fn default() -> Self {
        Self {
            reference: None,
            predictors: vec![VALLEYS.to_string(), PEAKS.to_string()],
        }
    }
}

/// Complete pipeline configuration
///
/// Paired-window options (`min_gap`, `amplitude_threshold`, ...) live under
/// `paired` and the interval limits (`error_high`, `error_low`) under
/// `quality`. `paired.window_size` is the forward matching window and is
/// distinct from the top-level smoothing `window_size`. Unknown keys are
/// rejected, so a limit placed at the top level is an error rather than
/// silently ignored.
///
/// ```json
/// {
///   "detection_mode": "paired_window",
///   "paired": { "min_gap": 0.3, "amplitude_threshold": 0.0125 },
///   "quality": { "error_high": 400.0, "error_low": 0.25 }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PipelineConfig {
    pub input: InputConfig,
    /// Moving-average window, odd
    pub window_size: usize,
    /// Sliding-detector half-width W; windows span 2W + 1 samples
    pub half_width: usize,
    pub detection_mode: DetectionMode,
    /// Only used in paired-window mode
    pub paired: PairedParameters,
    pub threshold_policy: ThresholdPolicyConfig,
    /// Contact-mode labels whose entries become transition streams
    pub target_labels: Vec<String>,
    pub quality: QualityControl,
    pub correlation: CorrelationConfig,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            input: InputConfig::default(),
            window_size: DEFAULT_WINDOW,
            half_width: DEFAULT_HALF_WIDTH,
            detection_mode: DetectionMode::default(),
            paired: PairedParameters::default(),
            threshold_policy: ThresholdPolicyConfig::default(),
            target_labels: vec!["SC".to_string(), "Aerial".to_string()],
            quality: QualityControl::default(),
            correlation: CorrelationConfig::default(),
        }
    }
}

impl PipelineConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        Ok(serde_json::from_reader(reader)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(std::io::BufReader::new(file))
    }

    pub fn validate(&self) -> Result<()> {
        self.build().map(|_| ())
    }

    /// Validate every option and assemble the stages
    pub fn build(&self) -> Result<Pipeline> {
        self.input.delimiter_byte()?;

        let smoother = MovingAverage::new(self.window_size)?;
        let policy = self.threshold_policy.build()?;
        let detector: ModeDetector = match self.detection_mode {
            DetectionMode::SlidingDebounced => {
                SlidingExtremaDetector::new(self.half_width, policy)?.into()
            }
            DetectionMode::PairedWindow => PairedWindowDetector::new(self.paired, policy)?.into(),
        };

        let mut seen = HashSet::new();
        let mut transitions = Vec::with_capacity(self.target_labels.len());
        for label in &self.target_labels {
            if label == PEAKS || label == VALLEYS {
                return Err(CoreError::configuration(
                    "target_labels",
                    format!("`{label}` is reserved for extrema streams"),
                )
                .into());
            }
            if !seen.insert(label.as_str()) {
                return Err(CoreError::configuration(
                    "target_labels",
                    format!("duplicate label `{label}`"),
                )
                .into());
            }
            transitions.push(TransitionDetector::new(label.as_str())?);
        }

        self.quality.validate()?;

        let reference = match &self.correlation.reference {
            Some(name) => name.clone(),
            None => self.target_labels.first().cloned().ok_or_else(|| {
                CoreError::configuration(
                    "correlation.reference",
                    "no reference given and no target labels to default to",
                )
            })?,
        };
        if self.correlation.predictors.is_empty() {
            return Err(
                CoreError::configuration("correlation.predictors", "at least one is required")
                    .into(),
            );
        }
        let known = |name: &str| name == PEAKS || name == VALLEYS || seen.contains(name);
        if !known(reference.as_str()) {
            return Err(CoreError::configuration(
                "correlation.reference",
                format!("unknown stream `{reference}`"),
            )
            .into());
        }
        if let Some(unknown) = self.correlation.predictors.iter().find(|p| !known(p.as_str())) {
            return Err(CoreError::configuration(
                "correlation.predictors",
                format!("unknown stream `{unknown}`"),
            )
            .into());
        }

        Ok(Pipeline::new(
            smoother,
            detector,
            transitions,
            self.quality,
            reference,
            self.correlation.predictors.clone(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    #[test]
    fn test_empty_object_is_default() {
        let config = PipelineConfig::from_json("{}").unwrap();
        assert_eq!(config, PipelineConfig::default());
        assert_eq!(config.input.header_lines, 44);
        assert_eq!(config.input.signal_column, 19);
        assert_eq!(config.input.label_column, 31);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_segmented_policy_from_json() {
        let config = PipelineConfig::from_json(
            r#"{
                "detection_mode": "paired_window",
                "threshold_policy": {
                    "kind": "segmented",
                    "breakpoints": [
                        { "position": 0, "thresholds": { "peak": 1.935, "valley": 1.9235 } },
                        { "position": 8500, "thresholds": { "peak": 1.9425, "valley": 1.929 } }
                    ]
                },
                "paired": { "window_size": 150, "max_separation": 150,
                            "amplitude_threshold": 0.0125, "min_gap": 0.3 }
            }"#,
        )
        .unwrap();

        assert_eq!(config.detection_mode, DetectionMode::PairedWindow);
        let policy = config.threshold_policy.build().unwrap();
        assert_eq!(policy.segment_count(), 2);
        assert_eq!(policy.lookup(9000).peak, 1.9425);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_options_name_the_parameter() {
        let even = PipelineConfig {
            window_size: 20,
            ..Default::default()
        };
        assert_eq!(even.validate().unwrap_err().parameter(), Some("window_size"));

        let inverted = PipelineConfig {
            threshold_policy: ThresholdPolicyConfig::Constant {
                peak: 4.0,
                valley: 4.5,
            },
            ..Default::default()
        };
        assert_eq!(
            inverted.validate().unwrap_err().parameter(),
            Some("threshold_policy")
        );

        let reserved = PipelineConfig {
            target_labels: vec!["peaks".to_string()],
            ..Default::default()
        };
        assert_eq!(
            reserved.validate().unwrap_err().parameter(),
            Some("target_labels")
        );

        let unknown = PipelineConfig {
            correlation: CorrelationConfig {
                reference: Some("DC".to_string()),
                ..Default::default()
            },
            ..Default::default()
        };
        assert_eq!(
            unknown.validate().unwrap_err().parameter(),
            Some("correlation.reference")
        );

        let bad_quality = PipelineConfig {
            quality: QualityControl {
                error_high: 1.0,
                error_low: 2.0,
            },
            ..Default::default()
        };
        assert_eq!(
            bad_quality.validate().unwrap_err().parameter(),
            Some("error_low")
        );
    }

    #[test]
    fn test_reference_needs_a_target_or_explicit_name() {
        let config = PipelineConfig {
            target_labels: Vec::new(),
            ..Default::default()
        };
        assert_eq!(
            config.validate().unwrap_err().parameter(),
            Some("correlation.reference")
        );

        let explicit = PipelineConfig {
            target_labels: Vec::new(),
            correlation: CorrelationConfig {
                reference: Some(PEAKS.to_string()),
                predictors: vec![VALLEYS.to_string()],
            },
            ..Default::default()
        };
        assert!(explicit.validate().is_ok());
    }

    #[test]
    fn test_nested_limits_and_misplaced_keys() {
        let config = PipelineConfig::from_json(
            r#"{
                "paired": { "min_gap": 0.5, "amplitude_threshold": 0.02 },
                "quality": { "error_high": 300.0, "error_low": 10.0 }
            }"#,
        )
        .unwrap();
        assert_eq!(config.paired.min_gap, 0.5);
        assert_eq!(config.paired.amplitude_threshold, 0.02);
        assert_eq!(config.paired.window_size, PairedParameters::default().window_size);
        assert_eq!(config.quality.error_high, 300.0);
        assert_eq!(config.quality.error_low, 10.0);

        for misplaced in [r#"{ "min_gap": 0.5 }"#, r#"{ "error_high": 300.0 }"#] {
            let err = PipelineConfig::from_json(misplaced).unwrap_err();
            assert!(matches!(err, crate::error::Error::Json(_)), "{misplaced}");
        }
    }

    #[test]
    fn test_non_ascii_delimiter() {
        let config = PipelineConfig {
            input: InputConfig {
                delimiter: '§',
                ..Default::default()
            },
            ..Default::default()
        };
        assert_eq!(
            config.validate().unwrap_err().parameter(),
            Some("input.delimiter")
        );
    }
}
