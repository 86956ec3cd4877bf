//! Sampled recordings: numeric and categorical series
//!
//! Both series types are built once from loaded input and never mutated.
//! Missing samples are explicit (`None`) rather than NaN sentinels; NaN
//! values handed to the constructors are converted to `None`.

use crate::error::{Error, Result};
use serde::Serialize;

/// A single numeric sample; `None` marks a missing value
pub type Sample = Option<f64>;

fn check_timestamps(timestamps: &[f64]) -> Result<()> {
    if timestamps.iter().any(|t| !t.is_finite()) {
        return Err(Error::non_finite("timestamps"));
    }
    if let Some(pos) = timestamps.windows(2).position(|w| w[1] <= w[0]) {
        return Err(Error::InvalidInput(format!(
            "timestamps must be strictly increasing (index {} -> {})",
            pos,
            pos + 1
        )));
    }
    Ok(())
}

/// Ordered (timestamp, value) samples at a fixed nominal rate
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimeSeries {
    timestamps: Vec<f64>,
    values: Vec<Sample>,
}

impl TimeSeries {
    /// Create a series, validating that timestamps are finite and strictly increasing
    pub fn new(timestamps: Vec<f64>, values: Vec<Sample>) -> Result<Self> {
        if timestamps.len() != values.len() {
            return Err(Error::size_mismatch(
                timestamps.len(),
                values.len(),
                "time series values",
            ));
        }
        check_timestamps(&timestamps)?;

        let values = values
            .into_iter()
            .map(|v| v.filter(|x| !x.is_nan()))
            .collect();

        Ok(Self { timestamps, values })
    }

    /// Create a series from raw floats, treating NaN as missing
    pub fn from_raw(timestamps: Vec<f64>, values: Vec<f64>) -> Result<Self> {
        let values = values.into_iter().map(Some).collect();
        Self::new(timestamps, values)
    }

    /// Create a series at unit-spaced timestamps `0, 1, 2, ...`
    pub fn from_values(values: Vec<Sample>) -> Self {
        let timestamps = (0..values.len()).map(|i| i as f64).collect();
        let values = values
            .into_iter()
            .map(|v| v.filter(|x| !x.is_nan()))
            .collect();
        Self { timestamps, values }
    }

    /// Build a series sharing this series' timestamps with new values.
    ///
    /// Used by stages that derive an equal-length series (e.g. smoothing).
    pub fn with_values(&self, values: Vec<Sample>) -> Result<Self> {
        if values.len() != self.len() {
            return Err(Error::size_mismatch(self.len(), values.len(), "derived series"));
        }
        let values = values
            .into_iter()
            .map(|v| v.filter(|x| !x.is_nan()))
            .collect();
        Ok(Self {
            timestamps: self.timestamps.clone(),
            values,
        })
    }

    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }

    pub fn timestamps(&self) -> &[f64] {
        &self.timestamps
    }

    pub fn values(&self) -> &[Sample] {
        &self.values
    }

    pub fn timestamp(&self, index: usize) -> f64 {
        self.timestamps[index]
    }

    pub fn value(&self, index: usize) -> Sample {
        self.values[index]
    }

    /// Number of defined (non-missing) samples
    pub fn defined_count(&self) -> usize {
        self.values.iter().filter(|v| v.is_some()).count()
    }

    /// Nominal sample interval, taken from the first two timestamps
    pub fn nominal_interval(&self) -> Option<f64> {
        match self.timestamps.as_slice() {
            [first, second, ..] => Some(second - first),
            _ => None,
        }
    }
}

/// Ordered (timestamp, label) samples over the same timestamp domain as a [`TimeSeries`]
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoricalStateSeries {
    timestamps: Vec<f64>,
    labels: Vec<Option<String>>,
}

impl CategoricalStateSeries {
    /// Create a label series, validating timestamps like [`TimeSeries::new`].
    ///
    /// Empty labels are treated as missing.
    pub fn new(timestamps: Vec<f64>, labels: Vec<Option<String>>) -> Result<Self> {
        if timestamps.len() != labels.len() {
            return Err(Error::size_mismatch(
                timestamps.len(),
                labels.len(),
                "categorical labels",
            ));
        }
        check_timestamps(&timestamps)?;

        let labels = labels
            .into_iter()
            .map(|l| l.filter(|s| !s.is_empty()))
            .collect();

        Ok(Self { timestamps, labels })
    }

    /// Create from string slices at explicit timestamps, every label defined
    pub fn from_labels<S: AsRef<str>>(timestamps: Vec<f64>, labels: &[S]) -> Result<Self> {
        let labels = labels.iter().map(|l| Some(l.as_ref().to_string())).collect();
        Self::new(timestamps, labels)
    }

    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }

    pub fn timestamps(&self) -> &[f64] {
        &self.timestamps
    }

    pub fn labels(&self) -> &[Option<String>] {
        &self.labels
    }

    /// Iterate (timestamp, label) pairs, missing labels included as `None`
    pub fn iter(&self) -> impl Iterator<Item = (f64, Option<&str>)> + '_ {
        self.timestamps
            .iter()
            .zip(&self.labels)
            .map(|(&t, l)| (t, l.as_deref()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nan_becomes_missing() {
        let series = TimeSeries::from_raw(vec![0.0, 1.0, 2.0], vec![1.0, f64::NAN, 3.0]).unwrap();
        assert_eq!(series.values(), &[Some(1.0), None, Some(3.0)]);
        assert_eq!(series.defined_count(), 2);
    }

    #[test]
    fn test_rejects_non_increasing_timestamps() {
        let err = TimeSeries::from_raw(vec![0.0, 2.0, 2.0], vec![1.0, 2.0, 3.0]).unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));

        let err = TimeSeries::from_raw(vec![0.0, f64::INFINITY], vec![1.0, 2.0]).unwrap_err();
        assert!(err.to_string().contains("NaN or infinite"));
    }

    #[test]
    fn test_length_mismatch() {
        let err = TimeSeries::from_raw(vec![0.0, 1.0], vec![1.0]).unwrap_err();
        assert!(err.to_string().contains("Size mismatch"));

        let err = CategoricalStateSeries::from_labels(vec![0.0], &["SC", "DC"]).unwrap_err();
        assert!(err.to_string().contains("categorical labels"));
    }

    #[test]
    fn test_nominal_interval() {
        let series = TimeSeries::from_raw(vec![10.0, 10.5, 11.0], vec![0.0; 3]).unwrap();
        assert_eq!(series.nominal_interval(), Some(0.5));
        assert_eq!(TimeSeries::from_values(vec![Some(1.0)]).nominal_interval(), None);
    }

    #[test]
    fn test_empty_labels_are_missing() {
        let series = CategoricalStateSeries::new(
            vec![0.0, 1.0],
            vec![Some(String::new()), Some("SC".to_string())],
        )
        .unwrap();
        let collected: Vec<_> = series.iter().collect();
        assert_eq!(collected, vec![(0.0, None), (1.0, Some("SC"))]);
    }
}
