//! Position-dependent peak/valley thresholds
//!
//! A [`ThresholdPolicy`] maps a sample position to the pair of thresholds
//! used by the extrema detectors. Policies are validated when built, so a
//! policy with `peak <= valley` never reaches a detector.

use gait_core::{Error, Result};
use serde::{Deserialize, Serialize};

const PARAMETER: &str = "threshold_policy";

/// Peak and valley decision thresholds; `peak > valley` always holds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThresholdPair {
    pub peak: f64,
    pub valley: f64,
}

impl ThresholdPair {
    pub fn new(peak: f64, valley: f64) -> Result<Self> {
        if !peak.is_finite() || !valley.is_finite() {
            return Err(Error::configuration(
                PARAMETER,
                format!("thresholds must be finite (peak {peak}, valley {valley})"),
            ));
        }
        if peak <= valley {
            return Err(Error::configuration(
                PARAMETER,
                format!("peak threshold {peak} must be greater than valley threshold {valley}"),
            ));
        }
        Ok(Self { peak, valley })
    }
}

/// Start of a threshold segment
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Breakpoint {
    /// First sample position the pair applies to
    pub position: usize,
    pub thresholds: ThresholdPair,
}

/// Rule mapping a sample position to its threshold pair
#[derive(Debug, Clone, PartialEq)]
pub enum ThresholdPolicy {
    /// Same pair for every position
    Constant(ThresholdPair),
    /// Piecewise-constant pairs, breakpoints sorted by position
    Segmented(Vec<Breakpoint>),
}

impl ThresholdPolicy {
    /// Constant policy, validating `peak > valley`
    pub fn constant(peak: f64, valley: f64) -> Result<Self> {
        Ok(Self::Constant(ThresholdPair::new(peak, valley)?))
    }

    /// Segmented policy from `(position, peak, valley)` triples.
    ///
    /// Positions must be strictly increasing and every pair valid.
    pub fn segmented(segments: &[(usize, f64, f64)]) -> Result<Self> {
        let breakpoints = segments
            .iter()
            .map(|&(position, peak, valley)| {
                Ok(Breakpoint {
                    position,
                    thresholds: ThresholdPair::new(peak, valley)?,
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Self::from_breakpoints(breakpoints)
    }

    /// Segmented policy from already-built breakpoints
    pub fn from_breakpoints(breakpoints: Vec<Breakpoint>) -> Result<Self> {
        if breakpoints.is_empty() {
            return Err(Error::configuration(
                PARAMETER,
                "segmented policy needs at least one breakpoint",
            ));
        }
        if breakpoints.windows(2).any(|w| w[1].position <= w[0].position) {
            return Err(Error::configuration(
                PARAMETER,
                "breakpoint positions must be strictly increasing",
            ));
        }
        for bp in &breakpoints {
            ThresholdPair::new(bp.thresholds.peak, bp.thresholds.valley)?;
        }
        Ok(Self::Segmented(breakpoints))
    }

    /// Thresholds in force at `position`.
    ///
    /// For segmented policies this is the pair of the last breakpoint at or
    /// before `position`, or the first pair when `position` precedes them all.
    pub fn lookup(&self, position: usize) -> ThresholdPair {
        match self {
            Self::Constant(pair) => *pair,
            Self::Segmented(breakpoints) => {
                let after = breakpoints.partition_point(|bp| bp.position <= position);
                breakpoints[after.saturating_sub(1)].thresholds
            }
        }
    }

    /// Number of distinct segments
    pub fn segment_count(&self) -> usize {
        match self {
            Self::Constant(_) => 1,
            Self::Segmented(breakpoints) => breakpoints.len(),
        }
    }
}
