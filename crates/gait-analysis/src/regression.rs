//! Ordinary least squares for a single predictor

use crate::correlation::Moments;
use gait_core::{Error, Result};
use serde::Serialize;
use statrs::distribution::{ContinuousCDF, StudentsT};

/// Guards the t statistic against division by zero when |r| == 1
const TINY: f64 = 1.0e-20;

/// Fit of `y = slope * x + intercept`
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Regression {
    pub slope: f64,
    pub intercept: f64,
    /// Correlation coefficient; `None` when `y` is constant
    pub r: Option<f64>,
    /// Two-sided p-value for a zero slope
    pub p_value: f64,
    /// Standard error of the slope
    pub std_err: f64,
}

/// Regress `y` on `x`.
///
/// Returns `Ok(None)` when the fit is undefined: fewer than two points, or a
/// constant `x`. A constant `y` yields slope 0, intercept `mean(y)` and an
/// undefined `r`. With exactly two points the fit is exact and the p-value is
/// 0 (or 1 for a constant `y`).
pub fn linear_regression(x: &[f64], y: &[f64]) -> Result<Option<Regression>> {
    let m = Moments::compute(x, y)?;
    if m.n < 2 || m.sxx == 0.0 {
        return Ok(None);
    }

    let slope = m.sxy / m.sxx;
    let intercept = m.mean_y - slope * m.mean_x;

    if m.syy == 0.0 {
        return Ok(Some(Regression {
            slope,
            intercept,
            r: None,
            p_value: 1.0,
            std_err: 0.0,
        }));
    }

    let r = m.correlation();
    let r_value = r.unwrap_or(0.0);
    let df = (m.n - 2) as f64;

    if m.n == 2 {
        return Ok(Some(Regression {
            slope,
            intercept,
            r,
            p_value: 0.0,
            std_err: 0.0,
        }));
    }

    let t = r_value * (df / ((1.0 - r_value + TINY) * (1.0 + r_value + TINY))).sqrt();
    let t_dist = StudentsT::new(0.0, 1.0, df)
        .map_err(|e| Error::Computation(format!("Failed to create t-distribution: {}", e)))?;
    let p_value = (2.0 * t_dist.cdf(-t.abs())).clamp(0.0, 1.0);
    let std_err = ((1.0 - r_value * r_value).max(0.0) * m.syy / m.sxx / df).sqrt();

    Ok(Some(Regression {
        slope,
        intercept,
        r,
        p_value,
        std_err,
    }))
}
