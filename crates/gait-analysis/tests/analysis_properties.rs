//! Property-based tests for quality control and interval correlation

use approx::assert_relative_eq;
use gait_analysis::{
    linear_regression, pearson, CorrelationAnalyzer, NamedStream, QualityControl, QualityFlag,
};
use gait_core::{Event, EventStream};
use proptest::prelude::*;

fn stream_from_gaps(gaps: &[f64]) -> EventStream {
    let mut t = 0.0;
    let mut events = vec![Event::transition(t, "SC")];
    for gap in gaps {
        t += gap;
        events.push(Event::transition(t, "SC"));
    }
    EventStream::new(events).unwrap()
}

proptest! {
    #[test]
    fn prop_every_interval_is_classified(
        gaps in prop::collection::vec(0.0f64..1000.0, 0..60),
        error_low in 0.0f64..10.0,
        span in 1.0f64..500.0,
    ) {
        let qc = QualityControl::new(error_low + span, error_low).unwrap();
        let annotated = qc.annotate(&stream_from_gaps(&gaps)).unwrap();

        prop_assert_eq!(annotated.len(), gaps.len() + 1);
        prop_assert_eq!(annotated.summary().total(), gaps.len());
        prop_assert!(annotated.rows().last().unwrap().flag.is_none());

        for row in annotated.rows() {
            if let (Some(interval), Some(flag)) = (row.interval, row.flag) {
                let expected = if interval > qc.error_high {
                    QualityFlag::Error
                } else if interval < qc.error_low {
                    QualityFlag::Warning
                } else {
                    QualityFlag::Normal
                };
                prop_assert_eq!(flag, expected);
            }
        }
    }

    #[test]
    fn prop_correlation_is_bounded_and_symmetric(
        pairs in prop::collection::vec((-100.0f64..100.0, -100.0f64..100.0), 0..50),
    ) {
        let (x, y): (Vec<f64>, Vec<f64>) = pairs.into_iter().unzip();
        let xy = pearson(&x, &y).unwrap();
        let yx = pearson(&y, &x).unwrap();

        prop_assert_eq!(xy.is_some(), yx.is_some());
        if let (Some(a), Some(b)) = (xy, yx) {
            prop_assert!((-1.0..=1.0).contains(&a));
            prop_assert!((a - b).abs() < 1e-9);
        }
    }

    #[test]
    fn prop_regression_recovers_exact_lines(
        x in prop::collection::vec(-50.0f64..50.0, 3..40),
        slope in -5.0f64..5.0,
        intercept in -20.0f64..20.0,
    ) {
        let spread = x.iter().cloned().fold(f64::NEG_INFINITY, f64::max)
            - x.iter().cloned().fold(f64::INFINITY, f64::min);
        prop_assume!(spread > 1.0);
        prop_assume!(slope.abs() > 0.01);

        let y: Vec<f64> = x.iter().map(|v| slope * v + intercept).collect();
        let fit = linear_regression(&x, &y).unwrap().unwrap();

        prop_assert!((fit.slope - slope).abs() < 1e-6);
        prop_assert!((fit.intercept - intercept).abs() < 1e-5);
        prop_assert!((0.0..=1.0).contains(&fit.p_value));
        prop_assert!(fit.p_value < 1e-6);
    }
}

#[test]
fn test_valley_intervals_against_lift_downs() {
    // Stride-to-stride variation shared by both streams
    let strides = [182.0, 176.5, 190.25, 185.0, 179.75, 188.0, 181.5];
    let lift_downs = stream_from_gaps(&strides);
    let valleys = stream_from_gaps(&strides.map(|s| s + 0.5));
    let peaks = stream_from_gaps(&[180.0, 180.0, 180.0]);

    let qc = QualityControl::default();
    let lift_downs = qc.annotate(&lift_downs).unwrap();
    let valleys = qc.annotate(&valleys).unwrap();
    let peaks = qc.annotate(&peaks).unwrap();

    let result = CorrelationAnalyzer::new()
        .analyze(
            NamedStream::new("SC", &lift_downs),
            &[NamedStream::new("valleys", &valleys), NamedStream::new("peaks", &peaks)],
        )
        .unwrap()
        .unwrap();

    assert_eq!(result.reference, "SC");
    assert_eq!(result.sample_size, 3);

    let valleys = result.comparison("valleys").unwrap();
    assert_relative_eq!(valleys.correlation.unwrap(), 1.0, epsilon = 1e-9);
    let fit = valleys.regression.unwrap();
    assert_relative_eq!(fit.slope, 1.0, epsilon = 1e-9);
    assert_relative_eq!(fit.intercept, -0.5, epsilon = 1e-6);

    // Constant peak intervals: nothing to regress on
    let peaks = result.comparison("peaks").unwrap();
    assert_eq!(peaks.correlation, None);
    assert_eq!(peaks.regression, None);
}

#[test]
fn test_result_serializes_undefined_fields_as_null() {
    let stream = QualityControl::default()
        .annotate(&stream_from_gaps(&[5.0]))
        .unwrap();
    let result = CorrelationAnalyzer::new()
        .analyze(
            NamedStream::new("SC", &stream),
            &[NamedStream::new("valleys", &stream)],
        )
        .unwrap()
        .unwrap();

    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(json["sample_size"], 1);
    assert!(json["comparisons"][0]["correlation"].is_null());
    assert!(json["comparisons"][0]["regression"].is_null());
}
