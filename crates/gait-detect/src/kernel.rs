//! Window kernels over series with missing samples
//!
//! Missing samples are ignored by every kernel here; a window with no
//! defined sample yields `None`.

use gait_core::Sample;

/// Minimum and maximum of the defined samples in a window
pub fn window_min_max(window: &[Sample]) -> Option<(f64, f64)> {
    window.iter().flatten().fold(None, |acc, &v| match acc {
        None => Some((v, v)),
        Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
    })
}

/// Positions and values of the window extremes
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindowExtremes {
    pub max_index: usize,
    pub max: f64,
    pub min_index: usize,
    pub min: f64,
}

impl WindowExtremes {
    pub fn amplitude(&self) -> f64 {
        self.max - self.min
    }
}

/// Arg-max and arg-min of the defined samples; ties resolve to the first occurrence
pub fn window_extremes(window: &[Sample]) -> Option<WindowExtremes> {
    let mut found: Option<WindowExtremes> = None;
    for (i, v) in window.iter().enumerate() {
        let Some(v) = *v else { continue };
        match found.as_mut() {
            None => {
                found = Some(WindowExtremes {
                    max_index: i,
                    max: v,
                    min_index: i,
                    min: v,
                })
            }
            Some(ext) => {
                if v > ext.max {
                    ext.max = v;
                    ext.max_index = i;
                }
                if v < ext.min {
                    ext.min = v;
                    ext.min_index = i;
                }
            }
        }
    }
    found
}
