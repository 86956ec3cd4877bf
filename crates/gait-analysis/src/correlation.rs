//! Pearson correlation

use gait_core::{mean, Error, Result};

/// Centered sums of squares and cross-products of two equal-length samples
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Moments {
    pub n: usize,
    pub mean_x: f64,
    pub mean_y: f64,
    pub sxx: f64,
    pub syy: f64,
    pub sxy: f64,
}

impl Moments {
    pub(crate) fn compute(x: &[f64], y: &[f64]) -> Result<Self> {
        if x.len() != y.len() {
            return Err(Error::size_mismatch(x.len(), y.len(), "paired samples"));
        }
        let n = x.len();
        let (Some(mean_x), Some(mean_y)) = (mean(x), mean(y)) else {
            return Ok(Self {
                n,
                mean_x: 0.0,
                mean_y: 0.0,
                sxx: 0.0,
                syy: 0.0,
                sxy: 0.0,
            });
        };

        let (mut sxx, mut syy, mut sxy) = (0.0, 0.0, 0.0);
        for (&xi, &yi) in x.iter().zip(y) {
            let dx = xi - mean_x;
            let dy = yi - mean_y;
            sxx += dx * dx;
            syy += dy * dy;
            sxy += dx * dy;
        }

        Ok(Self {
            n,
            mean_x,
            mean_y,
            sxx,
            syy,
            sxy,
        })
    }

    /// `None` when fewer than two points or either side has zero variance
    pub(crate) fn correlation(&self) -> Option<f64> {
        if self.n < 2 || self.sxx == 0.0 || self.syy == 0.0 {
            return None;
        }
        Some((self.sxy / (self.sxx * self.syy).sqrt()).clamp(-1.0, 1.0))
    }
}

/// Pearson correlation coefficient of `x` and `y`.
///
/// Returns `Ok(None)` when the coefficient is undefined: fewer than two
/// observations, or a constant sample.
pub fn pearson(x: &[f64], y: &[f64]) -> Result<Option<f64>> {
    Ok(Moments::compute(x, y)?.correlation())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_perfect_correlation() {
        let x = [10.0, 12.0, 9.0, 11.0];
        assert_relative_eq!(pearson(&x, &x).unwrap().unwrap(), 1.0);

        let negated: Vec<f64> = x.iter().map(|v| -2.0 * v + 3.0).collect();
        assert_relative_eq!(pearson(&x, &negated).unwrap().unwrap(), -1.0);
    }

    #[test]
    fn test_known_value() {
        let r = pearson(&[1.0, 2.0, 3.0, 4.0, 5.0], &[2.0, 4.0, 5.0, 4.0, 5.0])
            .unwrap()
            .unwrap();
        assert_relative_eq!(r, 0.774_596_669_241_483_4, epsilon = 1e-12);
    }

    #[test]
    fn test_undefined_cases() {
        assert_eq!(pearson(&[], &[]).unwrap(), None);
        assert_eq!(pearson(&[1.0], &[2.0]).unwrap(), None);
        assert_eq!(pearson(&[1.0, 1.0, 1.0], &[1.0, 2.0, 3.0]).unwrap(), None);
        assert_eq!(pearson(&[1.0, 2.0, 3.0], &[4.0, 4.0, 4.0]).unwrap(), None);
    }

    #[test]
    fn test_length_mismatch() {
        assert!(matches!(
            pearson(&[1.0, 2.0], &[1.0]),
            Err(Error::InvalidInput(_))
        ));
    }
}
